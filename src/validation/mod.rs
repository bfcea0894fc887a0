/*!
 * Validation rules over translated values.
 *
 * - `unique`: a translated value must not already be stored for the same
 *   locale in another row
 */

pub mod unique;

// Re-export main types
pub use unique::UniqueTranslationRule;
