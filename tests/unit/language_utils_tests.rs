/*!
 * Tests for locale code utilities
 */

use translatable_columns::language_utils::{
    LanguageCodeType, get_language_name, primary_subtag, validate_locale,
};

#[test]
fn test_primarySubtag_withSeparators_shouldReturnLanguage() {
    assert_eq!(primary_subtag("pt_BR"), "pt");
    assert_eq!(primary_subtag("zh-Hant-TW"), "zh");
    assert_eq!(primary_subtag(" EN "), "en");
}

#[test]
fn test_validateLocale_withTwoAndThreeLetterCodes_shouldReportType() {
    assert_eq!(validate_locale("fr").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_locale("es_MX").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_locale("fra").unwrap(), LanguageCodeType::Part3);
}

#[test]
fn test_validateLocale_withInvalidCodes_shouldFail() {
    for code in ["", "_BR", "zz", "e1n", "french"] {
        assert!(validate_locale(code).is_err(), "{} should be rejected", code);
    }
}

#[test]
fn test_getLanguageName_withRegionalLocale_shouldNameLanguage() {
    assert_eq!(get_language_name("es_MX").unwrap(), "Spanish");
    assert!(get_language_name("zz").is_err());
}
