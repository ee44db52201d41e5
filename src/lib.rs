//! Productor-consumidor sobre un buffer acotado.
//!
//! Un productor y un consumidor intercambian una cantidad fija de items a traves de un
//! buffer de capacidad fija, coordinados por dos semaforos contadores (lugares libres e
//! items disponibles) y un mutex sobre el buffer. Tambien se ofrece una cola bloqueante
//! cerrable que controla la capacidad por si misma.

pub mod blocking_queue;
pub mod consumer;
pub mod monitor;
mod panic_guard;
pub mod producer;
pub mod run;
pub mod semaphore;
pub mod types;

pub use run::{start, FinishedRun, RunHandle, RunReport};
pub use types::run_config::{ConfigError, ExchangeMode, RunConfig};
pub use types::run_counters::RunCounters;

mod sync {
    use std::time::Duration;

    #[cfg(not(loom))]
    pub(crate) use std::sync::{Arc, Condvar, Mutex, RwLock};

    #[cfg(loom)]
    pub(crate) use loom::sync::{Arc, Condvar, Mutex, RwLock};

    #[cfg(not(loom))]
    pub(crate) use std::sync::atomic::{AtomicBool, Ordering};

    #[cfg(loom)]
    pub(crate) use loom::sync::atomic::{AtomicBool, Ordering};

    #[cfg(not(loom))]
    pub(crate) use std::thread;

    #[cfg(loom)]
    pub(crate) use loom::thread;

    #[cfg(not(loom))]
    pub(crate) fn sleep(d: Duration) {
        thread::sleep(d);
    }

    #[cfg(loom)]
    pub(crate) fn sleep(_d: Duration) {
        loom::thread::yield_now();
    }
}
