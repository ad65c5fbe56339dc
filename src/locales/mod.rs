//! Localization module for imagesearch-rs
//!
//! Provides user-facing messages per locale.

use std::collections::HashMap;

/// Locale used when a requested one has no translation
pub const DEFAULT_LOCALE: &str = "en";

/// Message key for a blank query
pub const EMPTY_QUERY: &str = "empty_query";

/// Supported locales
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[("en", "English"), ("es", "Español")];

/// Check whether a locale has translations
pub fn is_supported(code: &str) -> bool {
    let base = code.split('-').next().unwrap_or(code);
    SUPPORTED_LOCALES.iter().any(|(c, _)| *c == base)
}

/// Translation store keyed by locale, then message key
pub struct Translations {
    translations: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    pub fn new() -> Self {
        let mut translations = HashMap::new();

        let mut en = HashMap::new();
        en.insert(
            EMPTY_QUERY.to_string(),
            "Please enter a search term in the box above.".to_string(),
        );
        translations.insert("en".to_string(), en);

        let mut es = HashMap::new();
        es.insert(
            EMPTY_QUERY.to_string(),
            "Por favor ingrese un término de búsqueda en el recuadro de arriba.".to_string(),
        );
        translations.insert("es".to_string(), es);

        Self { translations }
    }

    /// Get a translation for a key in the specified locale
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        let base = locale.split('-').next().unwrap_or(locale);

        self.translations
            .get(base)
            .and_then(|t| t.get(key))
            .map(|s| s.as_str())
            .or_else(|| {
                self.translations
                    .get(DEFAULT_LOCALE)
                    .and_then(|t| t.get(key))
                    .map(|s| s.as_str())
            })
    }

    /// Get a translation, falling back to the key itself
    pub fn translate(&self, locale: &str, key: &str) -> String {
        self.get(locale, key).unwrap_or(key).to_string()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_translations() {
        let t = Translations::new();
        assert_eq!(
            t.get("en", EMPTY_QUERY),
            Some("Please enter a search term in the box above.")
        );
        assert!(t.get("es-MX", EMPTY_QUERY).unwrap().starts_with("Por favor"));
    }

    #[test]
    fn test_fallback_to_english_and_key() {
        let t = Translations::new();
        assert_eq!(
            t.get("fr", EMPTY_QUERY),
            Some("Please enter a search term in the box above.")
        );
        assert_eq!(t.translate("en", "missing_key"), "missing_key");
    }

    #[test]
    fn test_supported() {
        assert!(is_supported("es"));
        assert!(is_supported("en-US"));
        assert!(!is_supported("de"));
    }
}
