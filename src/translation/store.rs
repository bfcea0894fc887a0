/*!
 * Translation store.
 *
 * Reads and writes locale maps held in the raw attributes of a `Record`.
 * The store is composed from the model's translation settings, the locale
 * context, an optional hook table and an observer; it holds no record state
 * of its own, so one store can serve any number of records of a model.
 */

use log::debug;
use serde_json::{Map, Value};

use crate::errors::TranslatableError;
use crate::model::TranslationSettings;
use crate::record::Record;

use super::casts::{cast_for_read, cast_for_write};
use super::context::LocaleContext;
use super::events::{LogObserver, TranslationEvent, TranslationObserver};
use super::hooks::HookTable;
use super::locale_map::{self, LocaleMap};

/// Signature of a call-site fallback: `(record, locale, translations)`
pub type FallbackFn<'f> = dyn Fn(&Record, &str, &LocaleMap) -> Value + 'f;

/// What to return when the requested locale has no translation
#[derive(Default)]
pub enum Fallback<'f> {
    /// Run the fallback chain: attribute hook, fallback locale, fallback value
    #[default]
    Default,
    /// Return `null`
    Disabled,
    /// Return this value as-is
    Value(Value),
    /// Ask the caller
    Custom(&'f FallbackFn<'f>),
}

impl From<bool> for Fallback<'_> {
    fn from(enabled: bool) -> Self {
        if enabled {
            Fallback::Default
        } else {
            Fallback::Disabled
        }
    }
}

static NO_HOOKS: std::sync::LazyLock<HookTable> = std::sync::LazyLock::new(HookTable::new);

/// Locale-aware access to the translatable attributes of records
pub struct TranslationStore<'a> {
    settings: &'a TranslationSettings,
    context: &'a LocaleContext,
    hooks: &'a HookTable,
    observer: &'a dyn TranslationObserver,
}

impl<'a> TranslationStore<'a> {
    /// Create a store without hooks that logs its events
    pub fn new(settings: &'a TranslationSettings, context: &'a LocaleContext) -> Self {
        Self {
            settings,
            context,
            hooks: &NO_HOOKS,
            observer: &LogObserver,
        }
    }

    pub fn with_hooks(mut self, hooks: &'a HookTable) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn TranslationObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn context(&self) -> &LocaleContext {
        self.context
    }

    /// Declared translatable attributes, in declaration order
    pub fn translatable_attributes(&self) -> &[String] {
        &self.settings.attributes
    }

    pub fn is_translatable(&self, key: &str) -> bool {
        self.settings.is_translatable(key)
    }

    fn guard(&self, key: &str) -> Result<(), TranslatableError> {
        if self.is_translatable(key) {
            Ok(())
        } else {
            Err(TranslatableError::not_translatable(key, &self.settings.attributes))
        }
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Translations of one attribute
    ///
    /// With `raw` set, values are returned exactly as stored. Otherwise the
    /// attribute's get hook, or failing that its cast, is applied to each value.
    pub fn get_translations(
        &self,
        record: &Record,
        key: &str,
        raw: bool,
    ) -> Result<LocaleMap, TranslatableError> {
        self.guard(key)?;

        let translations = locale_map::decode(record.raw(key));
        if raw {
            return Ok(translations);
        }

        if let Some(hook) = self.hooks.get_hook(key) {
            return Ok(translations
                .iter()
                .map(|(locale, value)| (locale.clone(), hook(value, locale)))
                .collect());
        }

        match self.settings.cast(key) {
            Some(cast) => Ok(translations
                .iter()
                .filter_map(|(locale, value)| {
                    cast_for_read(cast, value).map(|value| (locale.clone(), value))
                })
                .collect()),
            None => Ok(translations),
        }
    }

    /// Translations of every translatable attribute, in declaration order
    pub fn get_all_translations(
        &self,
        record: &Record,
        raw: bool,
    ) -> Result<Vec<(String, LocaleMap)>, TranslatableError> {
        self.settings
            .attributes
            .iter()
            .map(|key| Ok((key.clone(), self.get_translations(record, key, raw)?)))
            .collect()
    }

    /// Translation of an attribute for `locale`, or the active locale
    pub fn get_translation(
        &self,
        record: &Record,
        key: &str,
        locale: Option<&str>,
        fallback: Fallback<'_>,
        raw: bool,
    ) -> Result<Value, TranslatableError> {
        let locale = locale.unwrap_or(self.context.locale.as_str());
        let translations = self.get_translations(record, key, raw)?;

        if let Some(value) = translations.get(locale) {
            return Ok(value.clone());
        }

        Ok(match fallback {
            Fallback::Default => self.fallback_translation(key, locale, &translations),
            Fallback::Custom(resolve) => resolve(record, locale, &translations),
            Fallback::Value(value) => value,
            Fallback::Disabled => Value::Null,
        })
    }

    /// Alias of `get_translation`
    pub fn translate(
        &self,
        record: &Record,
        key: &str,
        locale: Option<&str>,
        fallback: Fallback<'_>,
        raw: bool,
    ) -> Result<Value, TranslatableError> {
        self.get_translation(record, key, locale, fallback, raw)
    }

    fn fallback_translation(&self, key: &str, locale: &str, translations: &LocaleMap) -> Value {
        if let Some(hook) = self.hooks.fallback_hook(key) {
            return hook(locale, translations);
        }

        if let Some(value) = self
            .context
            .fallback_locale
            .as_ref()
            .and_then(|fallback_locale| translations.get(fallback_locale))
        {
            debug!("Using fallback locale for {} (requested {})", key, locale);
            return value.clone();
        }

        self.context.fallback_value.clone()
    }

    /// Locales present in the stored map, in stored order
    pub fn get_translated_locales(
        &self,
        record: &Record,
        key: &str,
    ) -> Result<Vec<String>, TranslatableError> {
        Ok(self.get_translations(record, key, true)?.keys().cloned().collect())
    }

    pub fn has_translation(
        &self,
        record: &Record,
        key: &str,
        locale: &str,
    ) -> Result<bool, TranslatableError> {
        Ok(self.get_translations(record, key, true)?.contains_key(locale))
    }

    /// Whether the value loaded for `key` was already a locale map
    pub fn may_have_been_translated(&self, record: &Record, key: &str) -> bool {
        self.is_translatable(key) && locale_map::is_json_object(record.original(key))
    }

    // =========================================================================
    // Writing
    // =========================================================================

    /// Store `value` as the translation of `key` for `locale`
    pub fn set_translation<'r>(
        &self,
        record: &'r mut Record,
        key: &str,
        locale: &str,
        value: Value,
    ) -> Result<&'r mut Record, TranslatableError> {
        self.guard(key)?;

        let mut translations = self.get_translations(record, key, true)?;
        let old_value = translations
            .get(locale)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));

        let value = if let Some(hook) = self.hooks.set_hook(key) {
            hook(&value, locale)
        } else if let Some(cast) = self.settings.cast(key) {
            cast_for_write(cast, value)?
        } else {
            value
        };

        translations.insert(locale.to_string(), value.clone());
        record.set_raw(key, Value::String(locale_map::encode(&translations)?));

        self.emit(
            record,
            TranslationEvent::TranslationSet {
                key: key.to_string(),
                locale: locale.to_string(),
                old_value,
                new_value: value,
            },
        )?;

        Ok(record)
    }

    /// Store several translations of `key`, one locale at a time
    ///
    /// Not atomic: on failure the locales already stored stay stored.
    pub fn set_translations<'r>(
        &self,
        record: &'r mut Record,
        key: &str,
        translations: LocaleMap,
    ) -> Result<&'r mut Record, TranslatableError> {
        self.guard(key)?;

        for (locale, value) in translations {
            self.set_translation(record, key, &locale, value)?;
        }

        Ok(record)
    }

    /// Remove the translation of `key` for `locale`
    pub fn forget_translation<'r>(
        &self,
        record: &'r mut Record,
        key: &str,
        locale: &str,
    ) -> Result<&'r mut Record, TranslatableError> {
        let mut translations = self.get_translations(record, key, true)?;
        translations.shift_remove(locale);
        self.store_map(record, key, &translations)?;

        self.emit(
            record,
            TranslationEvent::TranslationForgotten {
                key: key.to_string(),
                locale: locale.to_string(),
            },
        )?;

        Ok(record)
    }

    /// Remove the listed translations of `key`, or all of them when `locales` is empty
    ///
    /// The event reports the locales that were asked for, whether or not they
    /// were present.
    pub fn forget_translations<'r>(
        &self,
        record: &'r mut Record,
        key: &str,
        locales: &[&str],
    ) -> Result<&'r mut Record, TranslatableError> {
        let mut translations = self.get_translations(record, key, true)?;

        let forgotten = if locales.is_empty() {
            record.set_raw(key, Value::Null);
            translations.keys().cloned().collect()
        } else {
            for locale in locales {
                translations.shift_remove(*locale);
            }
            self.store_map(record, key, &translations)?;
            locales.iter().map(|locale| locale.to_string()).collect()
        };

        self.emit(
            record,
            TranslationEvent::TranslationsForgotten {
                key: key.to_string(),
                locales: forgotten,
            },
        )?;

        Ok(record)
    }

    /// Remove `locale` from every translatable attribute
    pub fn forget_all_translations<'r>(
        &self,
        record: &'r mut Record,
        locale: &str,
    ) -> Result<&'r mut Record, TranslatableError> {
        for key in &self.settings.attributes {
            self.forget_translation(record, key, locale)?;
        }

        Ok(record)
    }

    fn store_map(
        &self,
        record: &mut Record,
        key: &str,
        translations: &LocaleMap,
    ) -> Result<(), TranslatableError> {
        let raw = if translations.is_empty() {
            Value::Null
        } else {
            Value::String(locale_map::encode(translations)?)
        };
        record.set_raw(key, raw);
        Ok(())
    }

    fn emit(&self, record: &Record, event: TranslationEvent) -> Result<(), TranslatableError> {
        self.observer
            .notify(record, &event)
            .map_err(|source| TranslatableError::Notification {
                event: event.name(),
                source: source.into(),
            })
    }

    // =========================================================================
    // Attribute access
    // =========================================================================

    /// Write an attribute
    ///
    /// Non-translatable attributes are stored as given. A translatable
    /// attribute receiving an object stores one translation per key; any other
    /// value becomes the translation for the active locale.
    pub fn set_attribute<'r>(
        &self,
        record: &'r mut Record,
        key: &str,
        value: Value,
    ) -> Result<&'r mut Record, TranslatableError> {
        if !self.is_translatable(key) {
            return Ok(record.set_raw(key, value));
        }

        match value {
            Value::Object(translations) => self.set_translations(record, key, translations),
            other => {
                let locale = self.context.locale.clone();
                self.set_translation(record, key, &locale, other)
            }
        }
    }

    /// Read an attribute, resolving translatable ones for the active locale
    pub fn get_attribute_value(&self, record: &Record, key: &str) -> Result<Value, TranslatableError> {
        if !self.is_translatable(key) {
            return Ok(record.raw(key).cloned().unwrap_or(Value::Null));
        }

        self.get_translation(record, key, None, Fallback::Default, false)
    }

    /// External representation of the record with translations resolved
    ///
    /// Attributes listed as untranslated output keep their raw stored value.
    pub fn serialize_for_output(&self, record: &Record) -> Result<Map<String, Value>, TranslatableError> {
        let mut output = record.attributes().clone();

        for key in &self.settings.attributes {
            if self.settings.untranslated_output.contains(key) {
                continue;
            }
            let value = self.get_translation(record, key, None, Fallback::Default, false)?;
            output.insert(key.clone(), value);
        }

        Ok(output)
    }
}
