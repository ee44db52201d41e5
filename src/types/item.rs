///Numero de secuencia generado por el productor. El primero es 1.
pub type Item = u64;
