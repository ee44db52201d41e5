use buffer_acotado::types::delay_policy::DelayPolicy;
use buffer_acotado::{start, ConfigError, ExchangeMode, FinishedRun, RunConfig};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

///Productor-consumidor sobre un buffer acotado.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Capacidad del buffer compartido.
    #[arg(long, default_value_t = 5)]
    capacity: usize,

    /// Cantidad de items a producir y consumir.
    #[arg(long, default_value_t = 50)]
    items: u64,

    /// Tiempo de generacion de cada item (ms).
    #[arg(long, default_value_t = 10)]
    producer_delay_ms: u64,

    /// Tiempo de procesamiento de cada item (ms).
    #[arg(long, default_value_t = 20)]
    consumer_delay_ms: u64,

    /// Variacion aleatoria que se suma a ambas demoras (ms).
    #[arg(long, default_value_t = 0)]
    jitter_ms: u64,

    /// Mecanismo de intercambio entre productor y consumidor.
    #[arg(long, value_enum, default_value_t = ExchangeMode::Semaphore)]
    mode: ExchangeMode,

    /// Si se indica, muestra el largo del buffer cada tantos ms.
    #[arg(long)]
    monitor_ms: Option<u64>,
}

impl Args {
    fn into_config(self) -> RunConfig {
        let mut config = RunConfig::default()
            .with_capacity(self.capacity)
            .with_target_count(self.items)
            .with_delays(
                DelayPolicy::from_millis(self.producer_delay_ms, self.jitter_ms),
                DelayPolicy::from_millis(self.consumer_delay_ms, self.jitter_ms),
            )
            .with_mode(self.mode);
        if let Some(monitor_ms) = self.monitor_ms {
            config = config.with_monitor(Duration::from_millis(monitor_ms));
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let config = Args::parse().into_config();
    match pc_start(config) {
        Ok(finished) => {
            println!("{}", finished.report());
            let counters = finished.read_counters();
            if counters.is_drained() && counters.is_fifo() {
                ExitCode::SUCCESS
            } else {
                warn!(%counters, "la corrida no consumio todos los items en orden");
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!(%err, "configuracion invalida");
            ExitCode::from(2)
        }
    }
}

///Comienza la ejecucion: lanza productor y consumidor y espera a que ambos terminen.
fn pc_start(config: RunConfig) -> Result<FinishedRun, ConfigError> {
    let handle = start(config)?;
    let finished = handle.join();
    info!(
        elapsed = ?finished.elapsed(),
        "todos los items fueron producidos y consumidos"
    );
    Ok(finished)
}
