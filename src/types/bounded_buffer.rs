use crate::sync::Mutex;
use crate::types::item::Item;
use std::collections::VecDeque;

struct Slots {
    items: VecDeque<Item>,
    max_len: usize,
}

///Cola FIFO de capacidad fija protegida por un mutex.
/// `push` y `pop` solo se llaman despues de tomar el permiso correspondiente
/// (lugar libre o item disponible). El lock se toma unicamente durante la mutacion.
pub struct BoundedBuffer {
    capacity: usize,
    slots: Mutex<Slots>,
}

impl BoundedBuffer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "la capacidad del buffer debe ser mayor a 0");
        BoundedBuffer {
            capacity,
            slots: Mutex::new(Slots {
                items: VecDeque::with_capacity(capacity),
                max_len: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    ///Agrega un item al final.
    /// Un push con el buffer lleno es una violacion del protocolo de semaforos y aborta.
    pub fn push(&self, item: Item) {
        let mut slots = self
            .slots
            .lock()
            .expect("el productor no pudo escribir en el buffer");
        assert!(
            slots.items.len() < self.capacity,
            "violacion de protocolo: push con el buffer lleno (capacidad {}, largo {})",
            self.capacity,
            slots.items.len()
        );
        slots.items.push_back(item);
        slots.max_len = slots.max_len.max(slots.items.len());
    }

    ///Saca el item mas viejo.
    /// Un pop con el buffer vacio es una violacion del protocolo de semaforos y aborta.
    pub fn pop(&self) -> Item {
        let mut slots = self
            .slots
            .lock()
            .expect("el consumidor no pudo escribir en el buffer");
        match slots.items.pop_front() {
            Some(item) => item,
            None => panic!(
                "violacion de protocolo: pop con el buffer vacio (capacidad {})",
                self.capacity
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .expect("no se pudo leer el buffer")
            .items
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///Mayor largo que alcanzo el buffer desde su creacion.
    pub fn max_len(&self) -> usize {
        self.slots.lock().expect("no se pudo leer el buffer").max_len
    }
}
