use crate::sync::sleep;
use rand::Rng;
use std::time::Duration;

///Demora simulada antes de producir o despues de consumir un item.
/// No toca estado compartido, solo representa trabajo externo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayPolicy {
    #[default]
    None,
    Fixed(Duration),
    Uniform { min: Duration, max: Duration },
}

impl DelayPolicy {
    ///Demora base en ms mas un jitter opcional: con jitter el rango es `[base, base + jitter]`.
    pub fn from_millis(base_ms: u64, jitter_ms: u64) -> Self {
        let base = Duration::from_millis(base_ms);
        match (base_ms, jitter_ms) {
            (0, 0) => DelayPolicy::None,
            (_, 0) => DelayPolicy::Fixed(base),
            _ => DelayPolicy::Uniform {
                min: base,
                max: base + Duration::from_millis(jitter_ms),
            },
        }
    }

    pub fn next_delay(&self) -> Duration {
        match *self {
            DelayPolicy::None => Duration::ZERO,
            DelayPolicy::Fixed(delay) => delay,
            DelayPolicy::Uniform { min, max } => {
                let span = u64::try_from(max.saturating_sub(min).as_nanos()).unwrap_or(u64::MAX);
                min + Duration::from_nanos(rand::thread_rng().gen_range(0..=span))
            }
        }
    }

    pub fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            sleep(delay);
        }
    }
}
