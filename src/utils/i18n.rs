// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Default UI language
pub const DEFAULT_LANG: &str = "TR";

/// Translation table for a language; unknown languages fall back to Turkish
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();

    match lang.to_uppercase().as_str() {
        "EN" => {
            // Payment pages
            translations.insert("payment_failed_title", "Payment Failed!");
            translations.insert("payment_failed_body", "Your transaction could not be completed. Please try again.");
            translations.insert("payment_success_title", "Payment Successful!");
            translations.insert("payment_success_body", "Your transaction has been completed.");
            translations.insert("redirect_notice", "You will be redirected to the home page in {seconds} seconds...");

            // Login
            translations.insert("login_title", "Branch Portal");
            translations.insert("email", "Email");
            translations.insert("password", "Password");
            translations.insert("login", "Sign in");
            translations.insert("fill_all_fields", "Please fill in all fields");

            // Dashboard
            translations.insert("logout", "Sign out");
            translations.insert("team", "Team");
            translations.insert("on_break", "On break");
            translations.insert("inventory", "Inventory");
            translations.insert("quantity", "Quantity");
            translations.insert("expiry_date", "Expiry date");
            translations.insert("delete", "Delete");
            translations.insert("day", "Day");
            translations.insert("shift", "Shift");
            translations.insert("save", "Save");
            translations.insert("loading_profile", "Loading profile...");
            translations.insert("profile_error", "Profile could not be loaded.");
            translations.insert("retry", "Retry");
        }
        _ => {
            // Payment pages
            translations.insert("payment_failed_title", "Ödeme Başarısız!");
            translations.insert("payment_failed_body", "İşleminiz tamamlanamadı. Lütfen tekrar deneyiniz.");
            translations.insert("payment_success_title", "Ödeme Başarılı!");
            translations.insert("payment_success_body", "İşleminiz başarıyla tamamlandı.");
            translations.insert("redirect_notice", "{seconds} saniye içinde ana sayfaya yönlendirileceksiniz...");

            // Login
            translations.insert("login_title", "Şube Portalı");
            translations.insert("email", "E-posta");
            translations.insert("password", "Şifre");
            translations.insert("login", "Giriş yap");
            translations.insert("fill_all_fields", "Lütfen tüm alanları doldurun");

            // Dashboard
            translations.insert("logout", "Çıkış yap");
            translations.insert("team", "Ekip");
            translations.insert("on_break", "Molada");
            translations.insert("inventory", "Envanter");
            translations.insert("quantity", "Adet");
            translations.insert("expiry_date", "Son kullanma tarihi");
            translations.insert("delete", "Sil");
            translations.insert("day", "Gün");
            translations.insert("shift", "Vardiya");
            translations.insert("save", "Kaydet");
            translations.insert("loading_profile", "Profil yükleniyor...");
            translations.insert("profile_error", "Profil yüklenemedi.");
            translations.insert("retry", "Tekrar dene");
        }
    }

    translations
}

/// Translate `key`, returning the key itself when no entry exists
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_is_default_and_fallback() {
        assert_eq!(t("payment_failed_title", DEFAULT_LANG), "Ödeme Başarısız!");
        assert_eq!(t("payment_failed_title", "de"), "Ödeme Başarısız!");
        assert_eq!(t("payment_failed_title", "en"), "Payment Failed!");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(t("no_such_key", "TR"), "no_such_key");
    }
}
