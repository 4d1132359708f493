use gloo_timers::callback::Timeout;

/// One-shot timer source; dropping the returned handle cancels the timer
pub trait TimerHost {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` backed timers
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl TimerHost for BrowserTimers {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
