/*!
 * Change notifications emitted by the translation store.
 *
 * The store reports every mutation to a caller-supplied `TranslationObserver`
 * synchronously, before the mutating call returns.
 */

use std::fmt;

use log::debug;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::record::Record;

/// A change applied to one translatable attribute of a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TranslationEvent {
    /// One locale of an attribute received a value
    TranslationSet {
        key: String,
        locale: String,
        old_value: Value,
        new_value: Value,
    },
    /// One locale of an attribute was removed
    TranslationForgotten { key: String, locale: String },
    /// Several locales of an attribute were removed
    TranslationsForgotten { key: String, locales: Vec<String> },
}

impl TranslationEvent {
    /// Event name as reported to observers and in errors
    pub fn name(&self) -> &'static str {
        match self {
            TranslationEvent::TranslationSet { .. } => "TranslationSet",
            TranslationEvent::TranslationForgotten { .. } => "TranslationForgotten",
            TranslationEvent::TranslationsForgotten { .. } => "TranslationsForgotten",
        }
    }

    /// Attribute the event refers to
    pub fn key(&self) -> &str {
        match self {
            TranslationEvent::TranslationSet { key, .. }
            | TranslationEvent::TranslationForgotten { key, .. }
            | TranslationEvent::TranslationsForgotten { key, .. } => key,
        }
    }
}

impl fmt::Display for TranslationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationEvent::TranslationSet { key, locale, .. } => {
                write!(f, "{} set for locale {}", key, locale)
            }
            TranslationEvent::TranslationForgotten { key, locale } => {
                write!(f, "{} forgotten for locale {}", key, locale)
            }
            TranslationEvent::TranslationsForgotten { key, locales } => {
                write!(f, "{} forgotten for locales [{}]", key, locales.join(", "))
            }
        }
    }
}

/// Receiver of translation change notifications
///
/// An error returned here propagates to the caller of the store operation;
/// the change itself has already been applied to the record.
pub trait TranslationObserver {
    fn notify(&self, record: &Record, event: &TranslationEvent) -> anyhow::Result<()>;
}

/// Observer that writes every event to the log at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TranslationObserver for LogObserver {
    fn notify(&self, record: &Record, event: &TranslationEvent) -> anyhow::Result<()> {
        debug!("{} on record {}", event, record.identity().unwrap_or(&Value::Null));
        Ok(())
    }
}

/// Observer that keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TranslationEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<TranslationEvent> {
        self.events.lock().clone()
    }

    /// Remove and return the events received so far
    pub fn take(&self) -> Vec<TranslationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl TranslationObserver for RecordingObserver {
    fn notify(&self, _record: &Record, event: &TranslationEvent) -> anyhow::Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

impl<F> TranslationObserver for F
where
    F: Fn(&Record, &TranslationEvent) -> anyhow::Result<()>,
{
    fn notify(&self, record: &Record, event: &TranslationEvent) -> anyhow::Result<()> {
        self(record, event)
    }
}
