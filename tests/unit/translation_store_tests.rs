/*!
 * Tests for the translation store
 */

use serde_json::{Value, json};
use translatable_columns::errors::TranslatableError;
use translatable_columns::model::TranslationSettings;
use translatable_columns::record::Record;
use translatable_columns::translation::{
    Fallback, LocaleContext, LocaleMap, RecordingObserver, TranslationEvent, TranslationStore,
};

use crate::common;

fn settings() -> TranslationSettings {
    TranslationSettings::new(["name", "description"])
}

fn translations(value: Value) -> LocaleMap {
    match value {
        Value::Object(map) => map,
        _ => LocaleMap::new(),
    }
}

fn locales(map: &LocaleMap) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

/// Test reading back what was written for the active locale
#[test]
fn test_setAttribute_thenGetAttributeValue_shouldReadBack() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let mut record = Record::new();

    store.set_attribute(&mut record, "name", json!("Chair")).unwrap();

    assert_eq!(store.get_attribute_value(&record, "name").unwrap(), json!("Chair"));
    assert_eq!(record.raw("name"), Some(&json!(r#"{"en":"Chair"}"#)));
}

/// Test that writing one locale keeps the others
#[test]
fn test_setTranslation_withSecondLocale_shouldKeepFirst() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let mut record = Record::new();

    store
        .set_translation(&mut record, "name", "en", json!("Chair"))
        .unwrap()
        .set_raw("price", json!(10));
    store.set_translation(&mut record, "name", "nl", json!("Stoel")).unwrap();

    let all = store.get_translations(&record, "name", false).unwrap();
    assert_eq!(all, translations(json!({"en": "Chair", "nl": "Stoel"})));
    assert_eq!(record.raw("price"), Some(&json!(10)));
}

/// Test reading a legacy plain value
#[test]
fn test_getTranslations_withPlainStoredValue_shouldBeEmpty() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let record = common::record(json!({"id": 1, "name": "hello"}));

    assert!(store.get_translations(&record, "name", false).unwrap().is_empty());
    assert_eq!(
        store
            .get_translation(&record, "name", None, Fallback::Disabled, false)
            .unwrap(),
        json!(null)
    );
    assert!(!store.may_have_been_translated(&record, "name"));
}

/// Test that a direct locale hit wins over every fallback option
#[test]
fn test_getTranslation_withExistingLocale_shouldIgnoreFallbacks() {
    let settings = settings();
    let context = LocaleContext::new("en")
        .with_fallback_locale("nl")
        .with_fallback_value(json!("n/a"));
    let store = TranslationStore::new(&settings, &context);
    let record = common::record(json!({"name": r#"{"en":"Chair","nl":"Stoel"}"#}));

    for fallback in [Fallback::Default, Fallback::Disabled, Fallback::Value(json!("x"))] {
        assert_eq!(
            store.get_translation(&record, "name", Some("en"), fallback, false).unwrap(),
            json!("Chair")
        );
    }
}

/// Test fallback precedence: fallback locale, then global fallback value
#[test]
fn test_getTranslation_withMissingLocale_shouldFollowFallbackChain() {
    let settings = settings();
    let context = LocaleContext::new("en")
        .with_fallback_locale("nl")
        .with_fallback_value(json!("n/a"));
    let store = TranslationStore::new(&settings, &context);

    let with_fallback = common::record(json!({"name": r#"{"nl":"Stoel"}"#}));
    assert_eq!(
        store
            .get_translation(&with_fallback, "name", Some("fr"), Fallback::Default, false)
            .unwrap(),
        json!("Stoel")
    );

    let without_fallback = common::record(json!({"name": r#"{"de":"Stuhl"}"#}));
    assert_eq!(
        store
            .get_translation(&without_fallback, "name", Some("fr"), Fallback::Default, false)
            .unwrap(),
        json!("n/a")
    );
    assert_eq!(
        store
            .get_translation(&without_fallback, "name", Some("fr"), false.into(), false)
            .unwrap(),
        json!(null)
    );
}

/// Test the caller-supplied fallback directives
#[test]
fn test_getTranslation_withCallerFallback_shouldUseIt() {
    let settings = settings();
    let context = LocaleContext::new("en").with_fallback_locale("nl");
    let store = TranslationStore::new(&settings, &context);
    let record = common::record(json!({"id": 7, "name": r#"{"nl":"Stoel"}"#}));

    assert_eq!(
        store
            .translate(&record, "name", Some("fr"), Fallback::Value(json!("?")), false)
            .unwrap(),
        json!("?")
    );

    let describe = |record: &Record, locale: &str, translations: &LocaleMap| {
        json!(format!(
            "{}:{}:{}",
            record.identity().cloned().unwrap_or(Value::Null),
            locale,
            translations.len()
        ))
    };
    assert_eq!(
        store
            .translate(&record, "name", Some("fr"), Fallback::Custom(&describe), false)
            .unwrap(),
        json!("7:fr:1")
    );
}

/// Test the active locale of a derived context
#[test]
fn test_localeContext_forLocale_shouldKeepFallbacks() {
    let settings = settings();
    let base = LocaleContext::new("en").with_fallback_locale("en");
    let dutch = base.for_locale("nl");
    let store = TranslationStore::new(&settings, &dutch);
    let record = common::record(json!({"name": r#"{"en":"Chair"}"#}));

    assert_eq!(store.context().locale, "nl");
    assert_eq!(store.get_attribute_value(&record, "name").unwrap(), json!("Chair"));
}

/// Test that untranslatable attributes are rejected by translation operations
#[test]
fn test_translationOperations_withUntranslatableKey_shouldFail() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let mut record = common::record(json!({"id": 1, "price": 10}));

    let err = store
        .set_translation(&mut record, "price", "en", json!(12))
        .unwrap_err();
    assert!(matches!(err, TranslatableError::NotTranslatableAttribute { ref key, .. } if key == "price"));
    assert_eq!(
        err.to_string(),
        "Cannot translate attribute `price` as it's not one of the translatable attributes: `name, description`"
    );

    assert!(store.get_translations(&record, "price", false).is_err());
    assert!(store.forget_translation(&mut record, "price", "en").is_err());
    assert!(store.set_translations(&mut record, "price", LocaleMap::new()).is_err());
    assert_eq!(record.raw("price"), Some(&json!(10)));
    assert!(!record.is_dirty("price"));
}

/// Test the notification of a set translation
#[test]
fn test_setTranslation_shouldReportOldValue() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let observer = RecordingObserver::new();
    let store = TranslationStore::new(&settings, &context).with_observer(&observer);
    let mut record = Record::new();

    store.set_translation(&mut record, "name", "en", json!("Chair")).unwrap();
    store.set_translation(&mut record, "name", "en", json!("Seat")).unwrap();

    let events = observer.take();
    assert_eq!(
        events,
        vec![
            TranslationEvent::TranslationSet {
                key: "name".to_string(),
                locale: "en".to_string(),
                old_value: json!(""),
                new_value: json!("Chair"),
            },
            TranslationEvent::TranslationSet {
                key: "name".to_string(),
                locale: "en".to_string(),
                old_value: json!("Chair"),
                new_value: json!("Seat"),
            },
        ]
    );
    assert!(observer.events().is_empty());
}

/// Test that bulk writes follow the order of the given map
#[test]
fn test_setTranslations_shouldEmitOnePerLocaleInOrder() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let observer = RecordingObserver::new();
    let store = TranslationStore::new(&settings, &context).with_observer(&observer);
    let mut record = Record::new();

    store
        .set_translations(
            &mut record,
            "name",
            translations(json!({"nl": "Stoel", "en": "Chair", "fr": "Chaise"})),
        )
        .unwrap();

    let emitted: Vec<String> = observer
        .events()
        .iter()
        .filter_map(|event| match event {
            TranslationEvent::TranslationSet { locale, .. } => Some(locale.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(emitted, vec!["nl", "en", "fr"]);
    assert_eq!(
        store.get_translated_locales(&record, "name").unwrap(),
        vec!["nl", "en", "fr"]
    );
}

/// Test that an object assigned to a translatable attribute sets each locale
#[test]
fn test_setAttribute_withObject_shouldSetEachLocale() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let mut record = common::record(json!({"name": r#"{"de":"Stuhl"}"#}));

    store
        .set_attribute(&mut record, "name", json!({"en": "Chair", "nl": "Stoel"}))
        .unwrap();

    let stored = store.get_translations(&record, "name", true).unwrap();
    assert_eq!(locales(&stored), vec!["de", "en", "nl"]);
    assert!(record.is_dirty("name"));
}

/// Test forgetting the last locale
#[test]
fn test_forgetTranslation_withOnlyLocale_shouldStoreNull() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let observer = RecordingObserver::new();
    let store = TranslationStore::new(&settings, &context).with_observer(&observer);
    let mut record = common::record(json!({"name": r#"{"en":"Chair","nl":"Stoel"}"#}));

    store.forget_translation(&mut record, "name", "en").unwrap();
    assert_eq!(record.raw("name"), Some(&json!(r#"{"nl":"Stoel"}"#)));

    store.forget_translation(&mut record, "name", "nl").unwrap();
    assert_eq!(record.raw("name"), Some(&Value::Null));
    assert!(!store.has_translation(&record, "name", "nl").unwrap());

    assert_eq!(
        observer.events().last(),
        Some(&TranslationEvent::TranslationForgotten {
            key: "name".to_string(),
            locale: "nl".to_string(),
        })
    );
}

/// Test forgetting all locales of an attribute
#[test]
fn test_forgetTranslations_withoutLocales_shouldClearAndReportPrevious() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let observer = RecordingObserver::new();
    let store = TranslationStore::new(&settings, &context).with_observer(&observer);
    let mut record = common::record(json!({"name": r#"{"en":"Chair","nl":"Stoel"}"#}));

    store.forget_translations(&mut record, "name", &[]).unwrap();

    assert_eq!(record.raw("name"), Some(&Value::Null));
    assert!(store.get_translations(&record, "name", false).unwrap().is_empty());
    assert_eq!(
        observer.events(),
        vec![TranslationEvent::TranslationsForgotten {
            key: "name".to_string(),
            locales: vec!["en".to_string(), "nl".to_string()],
        }]
    );
}

/// Test forgetting listed locales
#[test]
fn test_forgetTranslations_withLocales_shouldReportRequestedList() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let observer = RecordingObserver::new();
    let store = TranslationStore::new(&settings, &context).with_observer(&observer);
    let mut record = common::record(json!({"name": r#"{"en":"Chair","nl":"Stoel"}"#}));

    store.forget_translations(&mut record, "name", &["nl", "fr"]).unwrap();

    assert_eq!(store.get_translated_locales(&record, "name").unwrap(), vec!["en"]);
    assert_eq!(
        observer.events(),
        vec![TranslationEvent::TranslationsForgotten {
            key: "name".to_string(),
            locales: vec!["nl".to_string(), "fr".to_string()],
        }]
    );
}

/// Test forgetting one locale across attributes
#[test]
fn test_forgetAllTranslations_shouldVisitEveryAttribute() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let observer = RecordingObserver::new();
    let store = TranslationStore::new(&settings, &context).with_observer(&observer);
    let mut record = common::record(json!({
        "name": r#"{"en":"Chair","nl":"Stoel"}"#,
        "description": r#"{"nl":"Houten stoel"}"#,
    }));

    store.forget_all_translations(&mut record, "nl").unwrap();

    assert_eq!(record.raw("name"), Some(&json!(r#"{"en":"Chair"}"#)));
    assert_eq!(record.raw("description"), Some(&Value::Null));
    let keys: Vec<String> = observer.events().iter().map(|e| e.key().to_string()).collect();
    assert_eq!(keys, vec!["name", "description"]);
}

/// Test all translations in declaration order
#[test]
fn test_getAllTranslations_shouldFollowDeclarationOrder() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let record = common::record(json!({
        "description": r#"{"en":"Wooden"}"#,
        "name": "legacy",
    }));

    let all = store.get_all_translations(&record, false).unwrap();
    let keys: Vec<&str> = all.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["name", "description"]);
    assert!(all[0].1.is_empty());
    assert_eq!(all[1].1, translations(json!({"en": "Wooden"})));
}

/// Test detection of values loaded as locale maps
#[test]
fn test_mayHaveBeenTranslated_shouldInspectLoadedValue() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let store = TranslationStore::new(&settings, &context);
    let mut record = common::record(json!({"name": r#"{"en":"Chair"}"#, "description": "plain"}));

    assert!(store.may_have_been_translated(&record, "name"));
    assert!(!store.may_have_been_translated(&record, "description"));
    assert!(!store.may_have_been_translated(&record, "price"));

    store.set_translation(&mut record, "description", "en", json!("Now mapped")).unwrap();
    assert!(!store.may_have_been_translated(&record, "description"));

    record.sync_original();
    assert!(store.may_have_been_translated(&record, "description"));
}

/// Test the serialized output of a record
#[test]
fn test_serializeForOutput_shouldResolveAndExcludeListed() {
    let settings = settings().with_untranslated_output("description");
    let context = LocaleContext::new("nl").with_fallback_locale("en");
    let store = TranslationStore::new(&settings, &context);
    let record = common::record(json!({
        "id": 3,
        "name": r#"{"en":"Chair","nl":"Stoel"}"#,
        "description": r#"{"en":"Wooden"}"#,
    }));

    let output = store.serialize_for_output(&record).unwrap();

    assert_eq!(output["id"], json!(3));
    assert_eq!(output["name"], json!("Stoel"));
    assert_eq!(output["description"], json!(r#"{"en":"Wooden"}"#));
}

/// Test that a failing observer surfaces after the change is applied
#[test]
fn test_observerError_shouldBeReportedWithEventName() {
    let settings = settings();
    let context = LocaleContext::new("en");
    let failing = |_: &Record, _: &TranslationEvent| -> anyhow::Result<()> {
        Err(anyhow::anyhow!("listener down"))
    };
    let store = TranslationStore::new(&settings, &context).with_observer(&failing);
    let mut record = Record::new();

    let err = store.set_translation(&mut record, "name", "en", json!("Chair")).unwrap_err();

    assert!(matches!(
        err,
        TranslatableError::Notification { event: "TranslationSet", .. }
    ));
    assert_eq!(record.raw("name"), Some(&json!(r#"{"en":"Chair"}"#)));
}
