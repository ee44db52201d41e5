use crate::types::consume_tally::{ConsumeTally, OutOfOrder};
use crate::types::item::Item;
use std::fmt::{self, Display, Formatter};

///Contadores finales de una corrida. Solo se obtienen despues de joinear los threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCounters {
    pub target_count: u64,
    pub produced_count: u64,
    pub consumed_count: u64,
    pub final_buffer_length: usize,
    pub max_observed_length: usize,
    ///Los primeros items consumidos, en el orden en que se sacaron.
    pub first_consumed: Vec<Item>,
    pub first_out_of_order: Option<OutOfOrder>,
}

impl RunCounters {
    pub fn new(
        target_count: u64,
        produced_count: u64,
        tally: ConsumeTally,
        final_buffer_length: usize,
        max_observed_length: usize,
    ) -> Self {
        RunCounters {
            target_count,
            produced_count,
            consumed_count: tally.consumed_count,
            final_buffer_length,
            max_observed_length,
            first_consumed: tally.first_items,
            first_out_of_order: tally.first_out_of_order,
        }
    }

    ///Los items consumidos son exactamente `1..=target_count`, en orden y sin repetidos.
    pub fn is_fifo(&self) -> bool {
        self.first_out_of_order.is_none() && self.consumed_count == self.target_count
    }

    ///Todo lo producido se consumio y el buffer quedo vacio.
    pub fn is_drained(&self) -> bool {
        self.produced_count == self.target_count
            && self.consumed_count == self.target_count
            && self.final_buffer_length == 0
    }
}

impl Display for RunCounters {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "contadores: {{esperados:{}, producidos:{}, consumidos:{}, buffer final:{}, maximo observado:{}}}",
            self.target_count,
            self.produced_count,
            self.consumed_count,
            self.final_buffer_length,
            self.max_observed_length
        )?;
        if let Some(out_of_order) = self.first_out_of_order {
            write!(
                f,
                " fuera de orden: {{esperado:{}, llego:{}}}",
                out_of_order.expected, out_of_order.got
            )?;
        }
        Ok(())
    }
}
