/*!
 * Uniqueness of a translated value within a table.
 *
 * The rule is declared with positional parameters:
 * `table, column?, ignore_value?, ignore_column?, extra_column, extra_value, ...`
 * where `null`/`NULL` stands for an omitted parameter. The validated attribute
 * is written `name` or `name.locale`.
 */

use anyhow::{anyhow, Result};
use log::debug;
use serde_json::Value;

use crate::database::{Condition, Repository};
use crate::translation::locale_map;

/// Default column compared against when an ignore value is given without one
const DEFAULT_IGNORE_COLUMN: &str = "id";

/// Parsed `unique_translation` rule
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueTranslationRule {
    pub table: String,
    /// Column holding the translations; defaults to the attribute name
    pub column: Option<String>,
    /// Row to leave out, typically the record being updated
    pub ignore: Option<(String, Value)>,
    /// Additional equality conditions
    pub extra: Vec<(String, Value)>,
}

fn non_null(parameter: Option<&&str>) -> Option<String> {
    parameter
        .filter(|p| !matches!(**p, "null" | "NULL"))
        .map(|p| p.to_string())
}

impl UniqueTranslationRule {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: None,
            ignore: None,
            extra: Vec::new(),
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn ignore(mut self, column: impl Into<String>, value: Value) -> Self {
        self.ignore = Some((column.into(), value));
        self
    }

    pub fn where_eq(mut self, column: impl Into<String>, value: Value) -> Self {
        self.extra.push((column.into(), value));
        self
    }

    /// Build the rule from its positional parameters
    pub fn parse(parameters: &[&str]) -> Result<Self> {
        let table = non_null(parameters.first())
            .ok_or_else(|| anyhow!("unique_translation requires a table name"))?;

        let column = non_null(parameters.get(1));
        let ignore_value = non_null(parameters.get(2));
        let ignore_column = non_null(parameters.get(3));

        let ignore = match (ignore_value, ignore_column) {
            (Some(value), column) => Some((
                column.unwrap_or_else(|| DEFAULT_IGNORE_COLUMN.to_string()),
                Value::String(value),
            )),
            (None, Some(column)) => Some((column, Value::Null)),
            (None, None) => None,
        };

        let extra_parameters = parameters.get(4..).unwrap_or(&[]);
        if extra_parameters.len() % 2 != 0 {
            return Err(anyhow!(
                "unique_translation extra conditions must come in column/value pairs"
            ));
        }
        let extra = extra_parameters
            .chunks(2)
            .map(|pair| (pair[0].to_string(), Value::String(pair[1].to_string())))
            .collect();

        Ok(Self {
            table,
            column,
            ignore,
            extra,
        })
    }

    /// Split `name.locale` into its parts, defaulting the locale
    pub fn split_attribute<'s>(attribute: &'s str, default_locale: &'s str) -> (&'s str, &'s str) {
        match attribute.split_once('.') {
            Some((name, locale)) => (name, locale.split('.').next().unwrap_or(locale)),
            None => (attribute, default_locale),
        }
    }

    /// Whether no other row already holds `value` for the attribute's locale
    pub fn validate(
        &self,
        repo: &Repository,
        attribute: &str,
        value: &Value,
        default_locale: &str,
    ) -> Result<bool> {
        let (name, locale) = Self::split_attribute(attribute, default_locale);
        let column = self.column.as_deref().unwrap_or(name);

        let mut conditions: Vec<Condition> = Vec::new();
        if let Some((ignore_column, ignore_value)) = &self.ignore {
            conditions.push(Condition::ne(ignore_column.clone(), ignore_value.clone()));
        }
        conditions.extend(
            self.extra
                .iter()
                .map(|(column, value)| Condition::eq(column.clone(), value.clone())),
        );

        let rows = repo.fetch_rows(&self.table, &conditions)?;
        let duplicates = rows
            .iter()
            .filter(|row| {
                locale_map::try_decode(row.get(column))
                    .map(|translations| translations_match(translations.get(locale), value))
                    .unwrap_or(false)
            })
            .count();

        debug!(
            "unique_translation {}.{} in {}: {} duplicate(s)",
            column, locale, self.table, duplicates
        );
        Ok(duplicates == 0)
    }
}

/// Loose equality between a stored translation and a submitted value
fn translations_match(stored: Option<&Value>, submitted: &Value) -> bool {
    match (stored, submitted) {
        (None, _) => false,
        (Some(Value::String(a)), Value::String(b)) => a == b,
        (Some(Value::Number(a)), Value::String(b)) | (Some(Value::String(b)), Value::Number(a)) => {
            a.to_string() == *b
        }
        (Some(stored), submitted) => stored == submitted,
    }
}
