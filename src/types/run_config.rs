use crate::types::delay_policy::DelayPolicy;
use clap::ValueEnum;
use snafu::{ensure, Snafu};
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

pub const DEFAULT_BUFFER_CAPACITY: usize = 5;
pub const DEFAULT_TARGET_COUNT: u64 = 50;
pub const DEFAULT_PRODUCER_DELAY: Duration = Duration::from_millis(10);
pub const DEFAULT_CONSUMER_DELAY: Duration = Duration::from_millis(20);

///Errores de configuracion, se detectan antes de lanzar cualquier thread.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ConfigError {
    #[snafu(display("capacidad de buffer invalida: {capacity} (debe ser mayor a 0)"))]
    ZeroCapacity { capacity: usize },

    #[snafu(display("cantidad de items invalida: {target_count} (debe ser mayor a 0)"))]
    ZeroTarget { target_count: u64 },

    #[snafu(display("rango de demora invalido para el {role}: min {min:?} > max {max:?}"))]
    InvalidDelayRange {
        role: &'static str,
        min: Duration,
        max: Duration,
    },

    #[snafu(display("el intervalo del monitor debe ser mayor a 0"))]
    ZeroMonitorInterval,
}

///Como se intercambian los items entre productor y consumidor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExchangeMode {
    ///Dos semaforos contadores y un mutex sobre el buffer, cantidad fija de items.
    #[default]
    Semaphore,
    ///Cola bloqueante con capacidad propia, el productor la cierra al terminar.
    Queue,
}

impl Display for ExchangeMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ExchangeMode::Semaphore => write!(f, "semaforo"),
            ExchangeMode::Queue => write!(f, "cola"),
        }
    }
}

///Configuracion de una corrida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub buffer_capacity: usize,
    pub target_count: u64,
    pub producer_delay: DelayPolicy,
    pub consumer_delay: DelayPolicy,
    pub mode: ExchangeMode,
    pub monitor_interval: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            target_count: DEFAULT_TARGET_COUNT,
            producer_delay: DelayPolicy::Fixed(DEFAULT_PRODUCER_DELAY),
            consumer_delay: DelayPolicy::Fixed(DEFAULT_CONSUMER_DELAY),
            mode: ExchangeMode::Semaphore,
            monitor_interval: None,
        }
    }
}

impl RunConfig {
    pub fn with_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub fn with_target_count(mut self, target_count: u64) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_delays(mut self, producer_delay: DelayPolicy, consumer_delay: DelayPolicy) -> Self {
        self.producer_delay = producer_delay;
        self.consumer_delay = consumer_delay;
        self
    }

    ///Sin demoras simuladas, intercambio lo mas rapido posible.
    pub fn without_delays(self) -> Self {
        self.with_delays(DelayPolicy::None, DelayPolicy::None)
    }

    pub fn with_mode(mut self, mode: ExchangeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_monitor(mut self, interval: Duration) -> Self {
        self.monitor_interval = Some(interval);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.buffer_capacity > 0,
            ZeroCapacitySnafu {
                capacity: self.buffer_capacity
            }
        );
        ensure!(
            self.target_count > 0,
            ZeroTargetSnafu {
                target_count: self.target_count
            }
        );
        validate_delay("productor", &self.producer_delay)?;
        validate_delay("consumidor", &self.consumer_delay)?;
        if let Some(interval) = self.monitor_interval {
            ensure!(!interval.is_zero(), ZeroMonitorIntervalSnafu);
        }
        Ok(())
    }
}

fn validate_delay(role: &'static str, delay: &DelayPolicy) -> Result<(), ConfigError> {
    if let DelayPolicy::Uniform { min, max } = *delay {
        ensure!(min <= max, InvalidDelayRangeSnafu { role, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::types::delay_policy::DelayPolicy;
    use crate::types::run_config::{ConfigError, ExchangeMode, RunConfig};
    use std::time::Duration;

    #[test]
    fn test_default_is_valid() {
        let config = RunConfig::default();
        assert_eq!(5, config.buffer_capacity);
        assert_eq!(50, config.target_count);
        assert_eq!(ExchangeMode::Semaphore, config.mode);
        assert_eq!(Ok(()), config.validate());
    }

    #[test]
    fn test_zero_capacity() {
        let config = RunConfig::default().with_capacity(0);
        assert_eq!(
            Err(ConfigError::ZeroCapacity { capacity: 0 }),
            config.validate()
        );
    }

    #[test]
    fn test_zero_target() {
        let config = RunConfig::default().with_target_count(0);
        assert_eq!(
            Err(ConfigError::ZeroTarget { target_count: 0 }),
            config.validate()
        );
    }

    #[test]
    fn test_inverted_delay_range() {
        let inverted = DelayPolicy::Uniform {
            min: Duration::from_millis(5),
            max: Duration::from_millis(1),
        };
        let config = RunConfig::default().with_delays(DelayPolicy::None, inverted);
        let err = config.validate().expect_err("el rango invertido deberia fallar");
        assert!(err.to_string().contains("consumidor"));
    }

    #[test]
    fn test_zero_monitor_interval() {
        let config = RunConfig::default().with_monitor(Duration::ZERO);
        assert_eq!(Err(ConfigError::ZeroMonitorInterval), config.validate());
    }
}
