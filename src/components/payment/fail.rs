use std::rc::Rc;

use chrono::Utc;
use yew::prelude::*;

use super::redirect::{redirect_notice, schedule_redirect};
use crate::config::CONFIG;
use crate::models::{PaymentFailure, PaymentReport};
use crate::services::{current_query, BrowserNavigator};
use crate::utils::{t, BrowserTimers, ROUTE_HOME};

/// Landing page for the gateway's failed-payment redirect
#[function_component(PaymentFail)]
pub fn payment_fail() -> Html {
    use_effect_with((), |_| {
        let failure = PaymentFailure::from_query(&current_query());
        log::error!("❌ Payment failed: {}", PaymentReport::new(failure, Utc::now()));

        let pending = schedule_redirect(
            &BrowserTimers,
            Rc::new(BrowserNavigator),
            CONFIG.redirect_delay_ms,
            ROUTE_HOME,
            "payment failure",
        );

        move || drop(pending)
    });

    let lang = CONFIG.language.as_str();

    html! {
        <div class="payment-page payment-fail">
            <h1 class="payment-title">{ t("payment_failed_title", lang) }</h1>
            <p class="payment-body">{ t("payment_failed_body", lang) }</p>
            <p class="payment-notice">{ redirect_notice(CONFIG.redirect_delay_ms, lang) }</p>
        </div>
    }
}
