use anyhow::{Result, anyhow};
use isolang::Language;

/// Locale code utilities
///
/// Locales are keyed the way applications write them: a language code
/// optionally followed by a region or script (`en`, `pt_BR`, `zh-Hant`).
/// Only the primary language subtag is checked against ISO 639.
/// Language code type of a locale's primary subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Primary language subtag of a locale, lowercased
pub fn primary_subtag(locale: &str) -> String {
    locale
        .trim()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate that a locale starts with a known ISO 639-1 or ISO 639-3 code
pub fn validate_locale(locale: &str) -> Result<LanguageCodeType> {
    let code = primary_subtag(locale);

    match code.len() {
        2 if Language::from_639_1(&code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&code).is_some() => Ok(LanguageCodeType::Part3),
        _ => Err(anyhow!("Invalid locale code: {}", locale)),
    }
}

/// Get the English language name of a locale
pub fn get_language_name(locale: &str) -> Result<String> {
    let code = primary_subtag(locale);
    let lang = match validate_locale(locale)? {
        LanguageCodeType::Part1 => Language::from_639_1(&code),
        LanguageCodeType::Part3 => Language::from_639_3(&code),
    }
    .ok_or_else(|| anyhow!("Failed to get language from locale: {}", locale))?;

    Ok(lang.to_name().to_string())
}
