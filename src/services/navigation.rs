/// Programmatic navigation
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Navigates the current tab through `window.location`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("⚠️ No window available, cannot navigate to {}", path);
            return;
        };
        if let Err(e) = window.location().assign(path) {
            log::error!("❌ Navigation to {} failed: {:?}", path, e);
        }
    }
}

/// Current `window.location.search`, empty outside a browser
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Current `window.location.pathname`, `/` outside a browser
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
