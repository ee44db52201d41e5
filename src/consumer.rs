use crate::blocking_queue::BlockingQueue;
use crate::panic_guard::PanicGuard;
use crate::sync::Arc;
use crate::types::consume_tally::ConsumeTally;
use crate::types::delay_policy::DelayPolicy;
use crate::types::item::Item;
use crate::types::shared_buffer::SharedBuffer;
use tracing::{debug, trace, warn};

///Consume hasta `target_count` items del buffer protegido por semaforos.
/// El lugar se libera antes de procesar el item, asi el productor no espera al procesamiento.
/// Si el productor aborta, deja de consumir. Si este thread aborta, despierta al productor.
pub fn consumer(shared: Arc<SharedBuffer>, target_count: u64, delay: DelayPolicy) -> ConsumeTally {
    let _guard = PanicGuard::new(|| shared.abort());
    debug!(target_count, "iniciando consumidor");
    let mut tally = ConsumeTally::new();
    for _ in 0..target_count {
        shared.not_empty.acquire();
        if shared.is_aborted() {
            warn!(consumed = tally.consumed_count, "el productor aborto, se deja de consumir");
            break;
        }
        let item = shared.buffer.pop();
        shared.not_full.release();

        trace!(item, "consumido");
        //tiempo de procesamiento
        delay.wait();
        tally.record(item);
    }
    debug!(consumed = tally.consumed_count, "fin de consumidor");
    tally
}

///Consume de la cola bloqueante hasta que se cierre y quede vacia.
/// No necesita saber cuantos items se van a producir. Si aborta, cierra la cola.
pub fn queue_consumer(queue: Arc<BlockingQueue<Item>>, delay: DelayPolicy) -> ConsumeTally {
    let _guard = PanicGuard::new(|| queue.close());
    debug!("iniciando consumidor de cola");
    let mut tally = ConsumeTally::new();
    while let Some(item) = queue.pop() {
        trace!(item, "consumido");
        delay.wait();
        tally.record(item);
    }
    debug!(consumed = tally.consumed_count, "fin de consumidor de cola");
    tally
}
