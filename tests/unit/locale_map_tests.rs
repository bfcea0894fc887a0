/*!
 * Tests for stored locale map decoding and encoding
 */

use serde_json::{Value, json};
use translatable_columns::errors::DecodeError;
use translatable_columns::translation::locale_map::{self, LocaleMap};

fn map(value: Value) -> LocaleMap {
    match value {
        Value::Object(map) => map,
        _ => LocaleMap::new(),
    }
}

#[test]
fn test_decode_withEncodedMap_shouldRoundTrip() {
    let translations = map(json!({"en": "Hello", "nl": "Hallo", "ja": "こんにちは"}));

    let encoded = locale_map::encode(&translations).unwrap();
    assert!(encoded.contains("こんにちは"));

    let decoded = locale_map::decode(Some(&Value::String(encoded)));
    assert_eq!(decoded, translations);
    let locales: Vec<&str> = decoded.keys().map(String::as_str).collect();
    assert_eq!(locales, vec!["en", "nl", "ja"]);
}

#[test]
fn test_decode_withAbsentValues_shouldBeEmpty() {
    assert!(locale_map::decode(None).is_empty());
    assert!(locale_map::decode(Some(&Value::Null)).is_empty());
    assert!(locale_map::decode(Some(&json!(""))).is_empty());
    assert!(locale_map::decode(Some(&json!("   "))).is_empty());
    assert!(locale_map::decode(Some(&json!("[]"))).is_empty());
}

#[test]
fn test_decode_withLegacyValues_shouldBeEmpty() {
    for raw in [json!("hello"), json!("[1,2]"), json!("42"), json!(42), json!(true)] {
        assert!(locale_map::decode(Some(&raw)).is_empty(), "{} should decode empty", raw);
    }
}

#[test]
fn test_tryDecode_withLegacyValues_shouldExplain() {
    assert!(matches!(
        locale_map::try_decode(Some(&json!("hello"))),
        Err(DecodeError::InvalidJson(_))
    ));
    assert_eq!(
        locale_map::try_decode(Some(&json!("[1]"))),
        Err(DecodeError::NotAnObject("array"))
    );
    assert_eq!(
        locale_map::try_decode(Some(&json!("\"text\""))),
        Err(DecodeError::NotAnObject("string"))
    );
    assert_eq!(
        locale_map::try_decode(Some(&json!(7))),
        Err(DecodeError::UnsupportedType("number"))
    );
}

#[test]
fn test_isJsonObject_shouldOnlyAcceptObjects() {
    assert!(locale_map::is_json_object(Some(&json!(r#"{"en":"Hi"}"#))));
    assert!(locale_map::is_json_object(Some(&json!("{}"))));
    assert!(!locale_map::is_json_object(Some(&json!("Hi"))));
    assert!(!locale_map::is_json_object(Some(&json!("[]"))));
    assert!(!locale_map::is_json_object(None));
}
