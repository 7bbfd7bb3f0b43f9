//! Cancelable one-shot timer behind the typing debounce.

use gloo_timers::callback::Timeout;

/// At most one pending callback; scheduling again replaces it.
pub trait StopTypingTimer {
    fn schedule(&mut self, delay_ms: u32, on_elapsed: Box<dyn FnOnce() + 'static>);
    fn cancel(&mut self);
}

/// `setTimeout` via gloo. Dropping the `Timeout` clears it.
#[derive(Default)]
pub struct BrowserTimer {
    pending: Option<Timeout>,
}

impl BrowserTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StopTypingTimer for BrowserTimer {
    fn schedule(&mut self, delay_ms: u32, on_elapsed: Box<dyn FnOnce() + 'static>) {
        self.pending = Some(Timeout::new(delay_ms, on_elapsed));
    }

    fn cancel(&mut self) {
        drop(self.pending.take());
    }
}
