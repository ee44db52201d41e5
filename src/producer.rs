use crate::sync::Arc;
use tracing::{debug, trace, warn};

use crate::blocking_queue::BlockingQueue;
use crate::panic_guard::PanicGuard;
use crate::types::delay_policy::DelayPolicy;
use crate::types::item::Item;
use crate::types::shared_buffer::SharedBuffer;

/// Se comporta como el productor de un patron productor-consumidor sobre el buffer
/// protegido por semaforos. Genera los items `1..=target_count` y devuelve cuantos produjo.
/// Si el consumidor aborta, deja de producir. Si este thread aborta, despierta al consumidor.
pub fn producer(shared: Arc<SharedBuffer>, target_count: u64, delay: DelayPolicy) -> u64 {
    let _guard = PanicGuard::new(|| shared.abort());
    debug!(target_count, "iniciando productor");
    let mut produced = 0;
    for item in 1..=target_count {
        //tiempo de generacion del evento
        delay.wait();

        shared.not_full.acquire();
        if shared.is_aborted() {
            warn!(produced, "el consumidor aborto, se deja de producir");
            break;
        }
        shared.buffer.push(item);
        shared.not_empty.release();

        produced += 1;
        trace!(item, "producido");
    }
    debug!(produced, "apagando productor");
    produced
}

///Productor sobre la cola bloqueante: no balancea permisos, cierra la cola al terminar.
pub fn queue_producer(queue: Arc<BlockingQueue<Item>>, target_count: u64, delay: DelayPolicy) -> u64 {
    let _guard = PanicGuard::new(|| queue.close());
    debug!(target_count, "iniciando productor de cola");
    let mut produced = 0;
    for item in 1..=target_count {
        delay.wait();
        if let Err(closed) = queue.push(item) {
            warn!(item = closed.0, "la cola se cerro antes de terminar de producir");
            break;
        }
        produced += 1;
        trace!(item, "producido");
    }
    queue.close();
    debug!(produced, "apagando productor de cola");
    produced
}

#[cfg(test)]
mod tests {
    use crate::sync::{thread, Arc};

    use crate::producer;
    use crate::types::delay_policy::DelayPolicy;
    use crate::types::shared_buffer::SharedBuffer;

    #[test]
    #[cfg(not(loom))]
    fn test_all_is_read_small_buffer() {
        test_all_is_read(1, 20);
    }

    #[test]
    #[cfg(not(loom))]
    fn test_all_is_read_big_buffer() {
        test_all_is_read(100, 50);
    }

    #[test]
    #[cfg(loom)]
    fn test_all_is_read_loom() {
        loom::model(move || {
            test_all_is_read(1, 2);
        });
    }

    ///Consume a mano desde el hilo del test, siguiendo el protocolo de semaforos.
    fn test_all_is_read(buffer_size: usize, target_count: u64) {
        let shared = Arc::new(SharedBuffer::new(buffer_size));

        let shared_clone = shared.clone();
        let producer_thread = thread::spawn(move || {
            producer::producer(shared_clone, target_count, DelayPolicy::None)
        });

        let mut expected = 1;
        while expected <= target_count {
            shared.not_empty.acquire();
            let item = shared.buffer.pop();
            shared.not_full.release();
            assert_eq!(expected, item);
            assert!(shared.buffer.len() <= buffer_size);
            expected += 1;
        }

        let produced = producer_thread
            .join()
            .expect("error al joinear producer thread");
        assert_eq!(target_count, produced);
        assert!(shared.buffer.is_empty());
        assert_eq!(buffer_size, shared.not_full.available());
        assert_eq!(0, shared.not_empty.available());
    }

    #[test]
    #[cfg(not(loom))]
    fn test_producer_stops_when_buffer_full() {
        let shared = Arc::new(SharedBuffer::new(2));
        let shared_clone = shared.clone();
        let producer_thread = thread::spawn(move || {
            producer::producer(shared_clone, 3, DelayPolicy::None)
        });

        while shared.not_empty.available() < 2 {
            thread::yield_now();
        }
        assert_eq!(2, shared.buffer.len());
        assert_eq!(0, shared.not_full.available());

        shared.not_empty.acquire();
        assert_eq!(1, shared.buffer.pop());
        shared.not_full.release();

        producer_thread
            .join()
            .expect("error al joinear producer thread");
        assert_eq!(2, shared.buffer.len());
        assert_eq!(2, shared.buffer.max_len());
    }

    #[test]
    #[cfg(not(loom))]
    fn test_queue_producer_closes_queue() {
        use crate::blocking_queue::BlockingQueue;

        let queue = Arc::new(BlockingQueue::new(4));
        let produced = producer::queue_producer(queue.clone(), 3, DelayPolicy::None);
        assert_eq!(3, produced);
        assert!(queue.is_closed());
        assert_eq!(Some(1), queue.pop());
        assert_eq!(Some(2), queue.pop());
        assert_eq!(Some(3), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    #[cfg(not(loom))]
    fn test_queue_producer_on_closed_queue() {
        use crate::blocking_queue::BlockingQueue;

        let queue = Arc::new(BlockingQueue::new(4));
        queue.close();
        assert_eq!(0, producer::queue_producer(queue, 3, DelayPolicy::None));
    }

    #[test]
    #[cfg(not(loom))]
    fn test_producer_stops_when_consumer_aborts() {
        let shared = Arc::new(SharedBuffer::new(1));
        let shared_clone = shared.clone();
        let producer_thread = thread::spawn(move || {
            producer::producer(shared_clone, 1u64 << 61, DelayPolicy::None)
        });

        while shared.not_empty.available() < 1 {
            thread::yield_now();
        }
        //el productor queda esperando lugar hasta que el otro lado aborta
        shared.abort();

        let produced = producer_thread
            .join()
            .expect("error al joinear producer thread");
        assert_eq!(1, produced);
        assert_eq!(1, shared.buffer.len());
    }

    #[test]
    #[cfg(not(loom))]
    fn test_queue_producer_stops_when_consumer_panics() {
        use crate::blocking_queue::BlockingQueue;
        use crate::panic_guard::PanicGuard;

        let queue = Arc::new(BlockingQueue::new(2));
        let queue_clone = queue.clone();
        let producer_thread = thread::spawn(move || {
            producer::queue_producer(queue_clone, 10, DelayPolicy::None)
        });

        while queue.len() < 2 {
            thread::yield_now();
        }
        let queue_clone = queue.clone();
        let failing_consumer = thread::spawn(move || {
            let _guard = PanicGuard::new(|| queue_clone.close());
            panic!("el consumidor fallo");
        });
        assert!(failing_consumer.join().is_err());

        let produced = producer_thread
            .join()
            .expect("error al joinear producer thread");
        assert_eq!(2, produced);
        assert!(queue.is_closed());
    }
}
