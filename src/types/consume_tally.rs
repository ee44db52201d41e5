use crate::types::item::Item;

///Cuantos de los primeros items consumidos se guardan para inspeccionarlos.
pub const KEPT_ITEMS: usize = 32;

///Primer item que llego fuera de secuencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfOrder {
    pub expected: Item,
    pub got: Item,
}

///Registro incremental de lo consumido: cuenta, verifica la secuencia `1, 2, 3...`
/// a medida que llegan los items y guarda solo los primeros `KEPT_ITEMS`.
/// La memoria no crece con la cantidad de items de la corrida.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsumeTally {
    pub consumed_count: u64,
    pub first_out_of_order: Option<OutOfOrder>,
    pub first_items: Vec<Item>,
}

impl ConsumeTally {
    pub fn new() -> Self {
        ConsumeTally::default()
    }

    pub fn record(&mut self, item: Item) {
        let expected = self.consumed_count + 1;
        if item != expected && self.first_out_of_order.is_none() {
            self.first_out_of_order = Some(OutOfOrder {
                expected,
                got: item,
            });
        }
        if self.first_items.len() < KEPT_ITEMS {
            self.first_items.push(item);
        }
        self.consumed_count += 1;
    }

    ///Ningun item perdido, repetido o desordenado hasta ahora.
    pub fn in_order(&self) -> bool {
        self.first_out_of_order.is_none()
    }
}
