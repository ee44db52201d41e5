use crate::sync::{Condvar, Mutex};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

///Devuelto por `push` cuando la cola ya esta cerrada, con el item rechazado.
#[derive(Debug, PartialEq, Eq)]
pub struct Closed<T>(pub T);

impl<T> Display for Closed<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "la cola esta cerrada")
    }
}

impl<T: Debug> Error for Closed<T> {}

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
    max_len: usize,
}

///Cola FIFO acotada con push y pop bloqueantes.
/// La capacidad la controla la propia cola: no hay permisos que balancear a mano.
/// `close` marca el fin del stream; `pop` devuelve `None` una vez cerrada y vacia.
pub struct BlockingQueue<T> {
    capacity: usize,
    state: Mutex<QueueState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BlockingQueue<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "la capacidad de la cola debe ser mayor a 0");
        BlockingQueue {
            capacity,
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
                max_len: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    ///Espera lugar y agrega el item al final.
    pub fn push(&self, item: T) -> Result<(), Closed<T>> {
        {
            let mut state = self.state.lock().expect("no se pudo lockear la cola");
            while state.items.len() == self.capacity && !state.closed {
                state = self
                    .not_full
                    .wait(state)
                    .expect("fallo en la condvar de lugares libres");
            }
            if state.closed {
                return Err(Closed(item));
            }
            state.items.push_back(item);
            state.max_len = state.max_len.max(state.items.len());
        }
        self.not_empty.notify_one();
        Ok(())
    }

    ///Espera un item y lo saca del frente. `None` si la cola esta cerrada y vacia.
    pub fn pop(&self) -> Option<T> {
        let item = {
            let mut state = self.state.lock().expect("no se pudo lockear la cola");
            while state.items.is_empty() && !state.closed {
                state = self
                    .not_empty
                    .wait(state)
                    .expect("fallo en la condvar de items disponibles");
            }
            state.items.pop_front()
        };
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    ///Cierra la cola. Los items que quedan se pueden seguir sacando.
    pub fn close(&self) {
        {
            let mut state = self.state.lock().expect("no se pudo lockear la cola");
            state.closed = true;
        }
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().expect("no se pudo lockear la cola").closed
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .expect("no se pudo lockear la cola")
            .items
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_len(&self) -> usize {
        self.state.lock().expect("no se pudo lockear la cola").max_len
    }
}
