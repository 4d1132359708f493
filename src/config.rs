use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};
use crate::utils::{DEFAULT_LANG, REDIRECT_DELAY_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub environment: String,
    pub enable_logging: bool,
    pub redirect_delay_ms: u32,
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            redirect_delay_ms: REDIRECT_DELAY_MS,
            language: DEFAULT_LANG.to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            supabase_url: option_env!("SUPABASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.supabase_url),
            supabase_anon_key: option_env!("SUPABASE_ANON_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.supabase_anon_key),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            redirect_delay_ms: option_env!("REDIRECT_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redirect_delay_ms),
            language: option_env!("UI_LANGUAGE")
                .map(str::to_string)
                .unwrap_or(defaults.language),
        }
    }

    /// Reject configurations the client cannot talk to
    pub fn validate(&self) -> Result<()> {
        if !(self.supabase_url.starts_with("http://") || self.supabase_url.starts_with("https://")) {
            return Err(PortalError::Config(format!(
                "SUPABASE_URL must start with http:// or https://, got '{}'",
                self.supabase_url
            )));
        }
        if self.supabase_anon_key.trim().is_empty() {
            return Err(PortalError::Config("SUPABASE_ANON_KEY is empty".to_string()));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AppConfig {
        AppConfig {
            supabase_url: "https://abcd.supabase.co".to_string(),
            supabase_anon_key: "anon".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url_and_missing_key() {
        let bad_url = AppConfig {
            supabase_url: "abcd.supabase.co".to_string(),
            ..configured()
        };
        assert!(matches!(bad_url.validate(), Err(PortalError::Config(_))));

        let no_key = AppConfig {
            supabase_anon_key: "  ".to_string(),
            ..configured()
        };
        assert!(matches!(no_key.validate(), Err(PortalError::Config(_))));
    }

    #[test]
    fn test_default_redirect_delay_is_five_seconds() {
        assert_eq!(AppConfig::default().redirect_delay_ms, 5_000);
        assert!(!AppConfig::default().is_production());
    }
}
