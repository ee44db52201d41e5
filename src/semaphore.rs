use crate::sync::{Condvar, Mutex};

///Semaforo contador bloqueante.
/// `acquire` espera hasta que haya un permiso y lo consume, `release` devuelve uno.
/// No tiene tope: quien llama garantiza que cada `release` corresponde a un lugar
/// liberado u ocupado del buffer.
pub struct CountingSemaphore {
    count: Mutex<usize>,
    released: Condvar,
}

impl CountingSemaphore {
    pub fn new(initial: usize) -> Self {
        CountingSemaphore {
            count: Mutex::new(initial),
            released: Condvar::new(),
        }
    }

    ///Bloquea hasta que el contador sea positivo y lo decrementa en uno.
    /// No tiene timeout.
    pub fn acquire(&self) {
        let mut count = self
            .count
            .lock()
            .expect("no se pudo lockear el contador del semaforo");
        while *count == 0 {
            count = self
                .released
                .wait(count)
                .expect("fallo en la condvar del semaforo");
        }
        *count -= 1;
    }

    ///Incrementa el contador y despierta a un thread en espera, si hay alguno.
    pub fn release(&self) {
        {
            let mut count = self
                .count
                .lock()
                .expect("no se pudo lockear el contador del semaforo");
            *count += 1;
        }
        self.released.notify_one();
    }

    ///Permisos disponibles en este instante.
    pub fn available(&self) -> usize {
        *self
            .count
            .lock()
            .expect("no se pudo lockear el contador del semaforo")
    }
}
