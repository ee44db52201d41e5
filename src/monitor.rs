use crate::sync::{sleep, Arc, RwLock};
use std::time::Duration;
use tracing::info;

///Cada cierto intervalo de tiempo muestrea el largo del buffer hasta que se pida parar.
/// Devuelve el mayor largo observado.
pub fn monitor<F>(stop: Arc<RwLock<bool>>, interval: Duration, capacity: usize, probe: F) -> usize
where
    F: Fn() -> usize,
{
    let mut max_seen = 0;
    let mut cond: bool;
    {
        let stop_read = stop.read().expect("no se pudo leer el stop");
        cond = *stop_read;
    }
    while !cond {
        let len = probe();
        assert!(
            len <= capacity,
            "violacion de protocolo: el buffer tiene {} items con capacidad {}",
            len,
            capacity
        );
        info!(len, capacity, "buffer actual");
        max_seen = max_seen.max(len);
        sleep(interval);
        {
            let stop_read = stop.read().expect("no se pudo leer el stop");
            cond = *stop_read;
        }
    }
    max_seen
}

#[cfg(not(loom))]
#[cfg(test)]
mod tests {
    use crate::monitor::monitor;
    use crate::sync::{sleep, thread, Arc, RwLock};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_monitor_reports_max_len() {
        let stop = Arc::new(RwLock::new(false));
        let len = Arc::new(AtomicUsize::new(0));

        let stop_clone = stop.clone();
        let len_clone = len.clone();
        let monitor_thread = thread::spawn(move || {
            monitor(stop_clone, Duration::from_millis(1), 4, move || {
                len_clone.load(Ordering::SeqCst)
            })
        });

        len.store(3, Ordering::SeqCst);
        sleep(Duration::from_millis(30));
        len.store(1, Ordering::SeqCst);
        sleep(Duration::from_millis(30));
        {
            let mut stop_write = stop.write().expect("no se pudo escribir en stop");
            *stop_write = true;
        }

        let max_seen = monitor_thread
            .join()
            .expect("no se pudo joinear el thread del monitor");
        assert_eq!(3, max_seen);
    }

    #[test]
    fn test_monitor_already_stopped() {
        let stop = Arc::new(RwLock::new(true));
        assert_eq!(0, monitor(stop, Duration::from_millis(1), 1, || 1));
    }

    #[test]
    #[should_panic(expected = "violacion de protocolo")]
    fn test_monitor_detects_overflow() {
        let stop = Arc::new(RwLock::new(false));
        monitor(stop, Duration::from_millis(1), 2, || 3);
    }
}
