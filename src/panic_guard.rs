///Ejecuta `on_panic` si el thread se desarma por un panic mientras el guard esta vivo.
/// Lo usan productor y consumidor para no dejar al otro lado bloqueado para siempre.
pub(crate) struct PanicGuard<F: FnMut()> {
    on_panic: F,
}

impl<F: FnMut()> PanicGuard<F> {
    pub(crate) fn new(on_panic: F) -> Self {
        PanicGuard { on_panic }
    }
}

impl<F: FnMut()> Drop for PanicGuard<F> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            (self.on_panic)();
        }
    }
}
