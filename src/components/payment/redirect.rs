// ============================================================================
// REDIRECT - Delayed, cancelable navigation for the payment pages
// ============================================================================

use std::rc::Rc;

use crate::services::Navigator;
use crate::utils::{t, TimerHost};

/// Navigation waiting on a timer; dropping it cancels the navigation
#[must_use = "dropping a PendingRedirect cancels it"]
pub struct PendingRedirect<H> {
    _timer: H,
}

/// Navigate to `target` after `delay_ms`, unless the returned value is dropped first
pub fn schedule_redirect<T, N>(
    timers: &T,
    navigator: Rc<N>,
    delay_ms: u32,
    target: &str,
    reason: &str,
) -> PendingRedirect<T::Handle>
where
    T: TimerHost + ?Sized,
    N: Navigator + ?Sized + 'static,
{
    let target = target.to_string();
    let reason = reason.to_string();

    let timer = timers.schedule(
        delay_ms,
        Box::new(move || {
            log::info!("↪️ Redirecting to {} after {}", target, reason);
            navigator.navigate(&target);
        }),
    );

    PendingRedirect { _timer: timer }
}

/// Countdown text for a redirect page, whole seconds rounded up
pub fn redirect_notice(delay_ms: u32, lang: &str) -> String {
    let seconds = delay_ms.div_ceil(1000);
    t("redirect_notice", lang).replace("{seconds}", &seconds.to_string())
}
