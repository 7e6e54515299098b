//! Lightweight JSON-backed translations with per-locale bundles.
//!
//! Catalan is the authoritative bundle; the Spanish and English bundles
//! cover the navigation chrome and fall back to Catalan for the rest.

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// Catalan.
    Ca,
    /// Spanish.
    Es,
    /// English.
    En,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Ca, Self::Es, Self::En]
    }

    /// RFC 5646 string for the locale.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ca => "ca",
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// Human-friendly label for the locale picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ca => "Català",
            Self::Es => "Español",
            Self::En => "English",
        }
    }

    /// Map an arbitrary browser language tag to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.to_ascii_lowercase();
        let base = lowered.split('-').next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default locale; its bundle also backs missing keys elsewhere.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::Ca;

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    ///
    /// Keys missing from the bundle degrade to Catalan, then to the
    /// caller-provided default.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let raw = raw_locale(locale);
        let tree: Value = serde_json::from_str(raw).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with Catalan fallback and
    /// caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&CA_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }
}

static CA_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::Ca));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::Ca => include_str!("../../i18n/ca.json"),
        LocaleCode::Es => include_str!("../../i18n/es.json"),
        LocaleCode::En => include_str!("../../i18n/en.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::Es);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn partial_bundles_degrade_to_catalan() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(bundle.text("nav.home", ""), "Home");
        assert_eq!(bundle.text("cart.print", ""), "Imprimir etiquetes");
    }

    #[test]
    fn bundles_load_all_locales() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            assert!(!bundle.text("nav.home", "Inici").is_empty());
        }
    }

    #[test]
    fn lang_tags_map_to_base_locales() {
        assert_eq!(LocaleCode::from_lang_tag("ca-ES"), Some(LocaleCode::Ca));
        assert_eq!(LocaleCode::from_lang_tag("en-GB"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
    }
}
