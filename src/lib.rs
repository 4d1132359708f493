// ============================================================================
// BRANCH PORTAL - FRONTEND (YEW + SUPABASE)
// ============================================================================
// - Services: Supabase auth + REST, navigation
// - State: SessionManager con Rc<RefCell> y suscriptores
// - Hooks: AuthProvider / use_auth
// - Components: login, dashboard, páginas de pago
// ============================================================================

pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::components::App;
use crate::config::{AppConfig, CONFIG};

/// Debug output in development, info and above in production
fn log_level(config: &AppConfig) -> log::Level {
    if config.is_production() {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::new(log_level(&CONFIG)));
    }
    log::info!("🚀 Branch Portal starting ({})", CONFIG.environment);

    yew::Renderer::<App>::new().render();
    Ok(())
}
