/*!
 * Locale context threaded into every store call.
 */

use serde_json::Value;

/// Active locale plus the fallback options used when a locale is missing
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleContext {
    /// Locale used when a call does not name one
    pub locale: String,
    /// Locale consulted when the requested one has no translation
    pub fallback_locale: Option<String>,
    /// Value returned when no fallback translation exists either
    pub fallback_value: Value,
}

impl LocaleContext {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fallback_locale: None,
            fallback_value: Value::Null,
        }
    }

    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    pub fn with_fallback_value(mut self, value: Value) -> Self {
        self.fallback_value = value;
        self
    }

    /// Same fallback options, different active locale
    pub fn for_locale(&self, locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..self.clone()
        }
    }
}
