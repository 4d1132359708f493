use std::rc::Rc;

use chrono::Utc;
use yew::prelude::*;

use super::redirect::{redirect_notice, schedule_redirect};
use crate::config::CONFIG;
use crate::models::{PaymentReport, PaymentSuccess as SuccessParams};
use crate::services::{current_query, BrowserNavigator};
use crate::utils::{t, BrowserTimers, ROUTE_HOME};

/// Landing page for the gateway's successful-payment redirect
#[function_component(PaymentSuccess)]
pub fn payment_success() -> Html {
    use_effect_with((), |_| {
        let params = SuccessParams::from_query(&current_query());
        log::info!("✅ Payment succeeded: {}", PaymentReport::new(params, Utc::now()));

        let pending = schedule_redirect(
            &BrowserTimers,
            Rc::new(BrowserNavigator),
            CONFIG.redirect_delay_ms,
            ROUTE_HOME,
            "payment success",
        );

        move || drop(pending)
    });

    let lang = CONFIG.language.as_str();

    html! {
        <div class="payment-page payment-success">
            <h1 class="payment-title">{ t("payment_success_title", lang) }</h1>
            <p class="payment-body">{ t("payment_success_body", lang) }</p>
            <p class="payment-notice">{ redirect_notice(CONFIG.redirect_delay_ms, lang) }</p>
        </div>
    }
}
