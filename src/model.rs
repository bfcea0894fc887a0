/*!
 * Model definitions.
 *
 * A model definition names a record type, its backing table and primary key,
 * and, when the model carries translation capability, which attributes are
 * translatable and how their per-locale values are cast.
 */

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::DEFAULT_PRIMARY_KEY;

/// Cast applied to each locale value of a translatable attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCast {
    /// Values are stored as JSON-encoded strings and decoded on read
    Json,
    /// Values are calendar dates stored as `YYYY-MM-DD`
    Date,
    /// Values are timestamps stored as `YYYY-MM-DD HH:MM:SS`
    DateTime,
}

impl AttributeCast {
    /// Whether values are dates or timestamps
    pub fn is_date(&self) -> bool {
        matches!(self, AttributeCast::Date | AttributeCast::DateTime)
    }
}

impl fmt::Display for AttributeCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeCast::Json => write!(f, "json"),
            AttributeCast::Date => write!(f, "date"),
            AttributeCast::DateTime => write!(f, "datetime"),
        }
    }
}

impl std::str::FromStr for AttributeCast {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "array" | "object" => Ok(AttributeCast::Json),
            "date" => Ok(AttributeCast::Date),
            "datetime" | "timestamp" => Ok(AttributeCast::DateTime),
            _ => Err(anyhow::anyhow!("Invalid attribute cast: {}", s)),
        }
    }
}

/// Translation capability of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// Translatable attributes, in declaration order
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Per-attribute cast of locale values
    #[serde(default)]
    pub casts: HashMap<String, AttributeCast>,

    /// Attributes left as raw locale maps in serialized output
    #[serde(default)]
    pub untranslated_output: Vec<String>,
}

impl TranslationSettings {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_cast(mut self, attribute: &str, cast: AttributeCast) -> Self {
        self.casts.insert(attribute.to_string(), cast);
        self
    }

    pub fn with_untranslated_output(mut self, attribute: &str) -> Self {
        self.untranslated_output.push(attribute.to_string());
        self
    }

    pub fn is_translatable(&self, key: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute == key)
    }

    pub fn cast(&self, key: &str) -> Option<AttributeCast> {
        self.casts.get(key).copied()
    }
}

/// A record type and its backing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Identifier used to select the model
    pub name: String,

    /// Backing table name
    pub table: String,

    /// Identity column
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Translation capability; absent when the model is not translatable
    #[serde(default)]
    pub translation: Option<TranslationSettings>,
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: default_primary_key(),
            translation: None,
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn with_translation(mut self, settings: TranslationSettings) -> Self {
        self.translation = Some(settings);
        self
    }

    /// Declared translatable attributes; empty when the model is not translatable
    pub fn translatable_attributes(&self) -> &[String] {
        self.translation
            .as_ref()
            .map(|settings| settings.attributes.as_slice())
            .unwrap_or(&[])
    }
}
