/*!
 * Error types for the translatable-columns library.
 *
 * This module contains custom error types for the translation store and the
 * locale map codec, using the thiserror crate for ergonomic error definitions.
 * Database and configuration failures travel as `anyhow::Error` with context.
 */

use thiserror::Error;

/// Errors that can occur when decoding a raw column value into a locale map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The raw value is not valid JSON at all
    #[error("Invalid JSON in stored value: {0}")]
    InvalidJson(String),

    /// The raw value is valid JSON but not an object keyed by locale
    #[error("Stored value is a JSON {0}, expected an object keyed by locale")]
    NotAnObject(&'static str),

    /// The raw value has a type that cannot hold a serialized map
    #[error("Stored value of type {0} cannot hold translations")]
    UnsupportedType(&'static str),
}

/// Errors raised by translation store operations
#[derive(Error, Debug)]
pub enum TranslatableError {
    /// A translation operation referenced an attribute that is not declared translatable
    #[error("Cannot translate attribute `{key}` as it's not one of the translatable attributes: `{}`", .translatable.join(", "))]
    NotTranslatableAttribute {
        /// The offending attribute name
        key: String,
        /// Every attribute the model declares translatable
        translatable: Vec<String>,
    },

    /// The observer failed to accept a change notification
    #[error("Failed to deliver {event} notification: {source}")]
    Notification {
        /// Name of the event that could not be delivered
        event: &'static str,
        /// Failure reported by the observer
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A locale map could not be serialized back to storage
    #[error("Failed to encode translations: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TranslatableError {
    /// Build the guard error for `key` against the declared attribute list
    pub fn not_translatable(key: &str, translatable: &[String]) -> Self {
        Self::NotTranslatableAttribute {
            key: key.to_string(),
            translatable: translatable.to_vec(),
        }
    }
}
