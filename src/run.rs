use crate::blocking_queue::BlockingQueue;
use crate::consumer::{consumer, queue_consumer};
use crate::monitor::monitor;
use crate::producer::{producer, queue_producer};
use crate::sync::{thread, Arc, RwLock};
use crate::types::consume_tally::ConsumeTally;
use crate::types::item::Item;
use crate::types::run_config::{ConfigError, ExchangeMode, RunConfig};
use crate::types::run_counters::RunCounters;
use crate::types::shared_buffer::SharedBuffer;
use std::fmt::{self, Display, Formatter};
use std::panic::resume_unwind;
use std::time::{Duration, Instant};
use tracing::{debug, info};

///Buffer por el que pasan los items, segun el modo de la corrida.
#[derive(Clone)]
enum Exchange {
    Semaphore(Arc<SharedBuffer>),
    Queue(Arc<BlockingQueue<Item>>),
}

impl Exchange {
    fn len(&self) -> usize {
        match self {
            Exchange::Semaphore(shared) => shared.buffer.len(),
            Exchange::Queue(queue) => queue.len(),
        }
    }

    fn max_len(&self) -> usize {
        match self {
            Exchange::Semaphore(shared) => shared.buffer.max_len(),
            Exchange::Queue(queue) => queue.max_len(),
        }
    }
}

struct MonitorHandle {
    stop: Arc<RwLock<bool>>,
    thread: thread::JoinHandle<usize>,
}

///Corrida en curso. Los contadores solo se pueden leer despues de `join`.
pub struct RunHandle {
    config: RunConfig,
    exchange: Exchange,
    producer: thread::JoinHandle<u64>,
    consumer: thread::JoinHandle<ConsumeTally>,
    monitor: Option<MonitorHandle>,
    started_at: Instant,
}

///Corrida terminada: ambos threads llegaron a su estado final.
#[derive(Debug)]
pub struct FinishedRun {
    mode: ExchangeMode,
    counters: RunCounters,
    elapsed: Duration,
}

///Valida la configuracion y lanza productor, consumidor y, si se pidio, el monitor.
/// Un error de configuracion se devuelve antes de crear cualquier thread.
pub fn start(config: RunConfig) -> Result<RunHandle, ConfigError> {
    config.validate()?;
    info!(
        mode = %config.mode,
        capacity = config.buffer_capacity,
        target_count = config.target_count,
        "iniciando corrida"
    );
    let started_at = Instant::now();
    let target_count = config.target_count;
    let producer_delay = config.producer_delay;
    let consumer_delay = config.consumer_delay;

    let (exchange, producer_thread, consumer_thread) = match config.mode {
        ExchangeMode::Semaphore => {
            let shared = Arc::new(SharedBuffer::new(config.buffer_capacity));
            let shared_producer = shared.clone();
            let producer_thread = thread::spawn(move || {
                producer(shared_producer, target_count, producer_delay)
            });
            let shared_consumer = shared.clone();
            let consumer_thread = thread::spawn(move || {
                consumer(shared_consumer, target_count, consumer_delay)
            });
            (Exchange::Semaphore(shared), producer_thread, consumer_thread)
        }
        ExchangeMode::Queue => {
            let queue = Arc::new(BlockingQueue::new(config.buffer_capacity));
            let queue_producer_ref = queue.clone();
            let producer_thread = thread::spawn(move || {
                queue_producer(queue_producer_ref, target_count, producer_delay)
            });
            let queue_consumer_ref = queue.clone();
            let consumer_thread =
                thread::spawn(move || queue_consumer(queue_consumer_ref, consumer_delay));
            (Exchange::Queue(queue), producer_thread, consumer_thread)
        }
    };

    let monitor_handle = config.monitor_interval.map(|interval| {
        let stop = Arc::new(RwLock::new(false));
        let stop_clone = stop.clone();
        let probe = exchange.clone();
        let capacity = config.buffer_capacity;
        let monitor_thread = thread::spawn(move || {
            monitor(stop_clone, interval, capacity, move || probe.len())
        });
        MonitorHandle {
            stop,
            thread: monitor_thread,
        }
    });

    Ok(RunHandle {
        config,
        exchange,
        producer: producer_thread,
        consumer: consumer_thread,
        monitor: monitor_handle,
        started_at,
    })
}

impl RunHandle {
    ///Espera a que productor y consumidor terminen, frena el monitor y arma los contadores.
    /// Si alguno de los threads aborto por una violacion de protocolo, primero se joinean
    /// todos y despues se propaga el panic (el del productor antes que el del consumidor).
    pub fn join(self) -> FinishedRun {
        let producer_result = self.producer.join();
        let consumer_result = self.consumer.join();
        let elapsed = self.started_at.elapsed();

        let monitor_result = self.monitor.map(|monitor| {
            {
                let mut stop_write = monitor
                    .stop
                    .write()
                    .expect("no se pudo escribir en el stop del monitor");
                *stop_write = true;
            }
            monitor.thread.join()
        });

        let produced_count = match producer_result {
            Ok(produced) => produced,
            Err(panic) => resume_unwind(panic),
        };
        let tally = match consumer_result {
            Ok(tally) => tally,
            Err(panic) => resume_unwind(panic),
        };
        let mut max_observed_length = self.exchange.max_len();
        match monitor_result {
            Some(Ok(max_seen)) => max_observed_length = max_observed_length.max(max_seen),
            Some(Err(panic)) => resume_unwind(panic),
            None => {}
        }

        let counters = RunCounters::new(
            self.config.target_count,
            produced_count,
            tally,
            self.exchange.len(),
            max_observed_length,
        );
        debug!(%counters, "corrida terminada");
        FinishedRun {
            mode: self.config.mode,
            counters,
            elapsed,
        }
    }
}

impl FinishedRun {
    pub fn read_counters(&self) -> &RunCounters {
        &self.counters
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn mode(&self) -> ExchangeMode {
        self.mode
    }

    pub fn report(&self) -> RunReport<'_> {
        RunReport { run: self }
    }
}

///Resumen final para mostrar al usuario.
pub struct RunReport<'a> {
    run: &'a FinishedRun,
}

impl Display for RunReport<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let counters = &self.run.counters;
        writeln!(f, "--- Ejecucion concluida (modelo {}) ---", self.run.mode)?;
        writeln!(
            f,
            "Items esperados: {}, items producidos: {}, items consumidos: {}.",
            counters.target_count, counters.produced_count, counters.consumed_count
        )?;
        writeln!(
            f,
            "Tamanio final del buffer: {} (debe ser 0).",
            counters.final_buffer_length
        )?;
        write!(
            f,
            "Tiempo total de ejecucion (ms): {:.3}",
            self.run.elapsed.as_secs_f64() * 1000.0
        )
    }
}
