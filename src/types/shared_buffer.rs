use crate::semaphore::CountingSemaphore;
use crate::sync::{AtomicBool, Ordering};
use crate::types::bounded_buffer::BoundedBuffer;

///Estado compartido entre productor y consumidor en el modo de semaforos.
/// `not_full` cuenta los lugares libres y arranca en la capacidad,
/// `not_empty` cuenta los items disponibles y arranca en 0.
pub struct SharedBuffer {
    pub not_full: CountingSemaphore,
    pub not_empty: CountingSemaphore,
    pub buffer: BoundedBuffer,
    aborted: AtomicBool,
}

impl SharedBuffer {
    pub fn new(capacity: usize) -> Self {
        SharedBuffer {
            not_full: CountingSemaphore::new(capacity),
            not_empty: CountingSemaphore::new(0),
            buffer: BoundedBuffer::new(capacity),
            aborted: AtomicBool::new(false),
        }
    }

    ///Marca la corrida como abortada y libera un permiso de cada semaforo,
    /// asi el que este esperando se despierta y ve la marca.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
        self.not_full.release();
        self.not_empty.release();
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}
