/*!
 * # translatable-columns
 *
 * Translatable model attributes stored as a locale-keyed JSON map in a single
 * column, plus a schema checker that repairs legacy plain values.
 *
 * ## Features
 *
 * - Read a translatable attribute in the active locale, with fallback to a
 *   fallback locale, a global fallback value, or a per-attribute hook
 * - Write, replace and forget per-locale values, with change notifications
 * - Per-locale casts (json, date, datetime) and accessor/mutator hooks
 * - Check that a model's backing columns can hold translations and rewrite
 *   plain values into single-locale maps
 * - Uniqueness validation of a translated value within a table
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `model`: Model definitions and translation settings
 * - `record`: In-memory attribute bags
 * - `translation`: The translation store:
 *   - `translation::locale_map`: Stored map decoding and encoding
 *   - `translation::store`: Read, write and forget operations
 *   - `translation::events`: Change notifications
 * - `checker`: Schema check and repair of a model's table
 * - `validation`: Validation rules over translated values
 * - `database`: SQLite access
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod checker;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod model;
pub mod record;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use checker::{CheckOutcome, SchemaRepairChecker};
pub use errors::{DecodeError, TranslatableError};
pub use language_utils::{get_language_name, validate_locale};
pub use model::{AttributeCast, ModelDefinition, TranslationSettings};
pub use record::Record;
pub use translation::{Fallback, LocaleContext, LocaleMap, TranslationStore};
pub use validation::UniqueTranslationRule;
