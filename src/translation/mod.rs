/*!
 * Translatable attributes stored as locale maps.
 *
 * Each translatable attribute keeps every locale's value in one column, as a
 * JSON object keyed by locale code. This module provides:
 *
 * - `locale_map`: decoding and encoding of stored locale maps
 * - `context`: active locale and fallback options
 * - `hooks`: per-attribute accessor, mutator and fallback transforms
 * - `casts`: per-locale value casts (json, date, datetime)
 * - `events`: change notifications and their observers
 * - `store`: the read/write/forget operations over a record
 */

pub mod casts;
pub mod context;
pub mod events;
pub mod hooks;
pub mod locale_map;
pub mod store;

// Re-export main types
pub use context::LocaleContext;
pub use events::{LogObserver, RecordingObserver, TranslationEvent, TranslationObserver};
pub use hooks::HookTable;
pub use locale_map::LocaleMap;
pub use store::{Fallback, TranslationStore};
