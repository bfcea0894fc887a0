/*!
 * Per-attribute transform and fallback hooks.
 *
 * Hooks are looked up by attribute name. A get hook rewrites each locale value
 * on read, a set hook rewrites an incoming value before it is stored, and a
 * fallback hook picks the value returned when a locale is missing.
 */

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::locale_map::LocaleMap;

/// Rewrites a value for the given locale
pub type TransformHook = Box<dyn Fn(&Value, &str) -> Value + Send + Sync>;

/// Resolves a missing locale from the available translations
pub type FallbackHook = Box<dyn Fn(&str, &LocaleMap) -> Value + Send + Sync>;

/// Optional hooks for one attribute
#[derive(Default)]
pub struct AttributeHooks {
    pub get: Option<TransformHook>,
    pub set: Option<TransformHook>,
    pub fallback: Option<FallbackHook>,
}

impl fmt::Debug for AttributeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeHooks")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Hook table keyed by attribute name
#[derive(Debug, Default)]
pub struct HookTable {
    hooks: HashMap<String, AttributeHooks>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a read transform for `attribute`
    pub fn on_get<F>(mut self, attribute: &str, hook: F) -> Self
    where
        F: Fn(&Value, &str) -> Value + Send + Sync + 'static,
    {
        self.entry(attribute).get = Some(Box::new(hook));
        self
    }

    /// Register a write transform for `attribute`
    pub fn on_set<F>(mut self, attribute: &str, hook: F) -> Self
    where
        F: Fn(&Value, &str) -> Value + Send + Sync + 'static,
    {
        self.entry(attribute).set = Some(Box::new(hook));
        self
    }

    /// Register a custom fallback for `attribute`
    pub fn on_fallback<F>(mut self, attribute: &str, hook: F) -> Self
    where
        F: Fn(&str, &LocaleMap) -> Value + Send + Sync + 'static,
    {
        self.entry(attribute).fallback = Some(Box::new(hook));
        self
    }

    fn entry(&mut self, attribute: &str) -> &mut AttributeHooks {
        self.hooks.entry(attribute.to_string()).or_default()
    }

    pub fn get_hook(&self, attribute: &str) -> Option<&TransformHook> {
        self.hooks.get(attribute).and_then(|hooks| hooks.get.as_ref())
    }

    pub fn set_hook(&self, attribute: &str) -> Option<&TransformHook> {
        self.hooks.get(attribute).and_then(|hooks| hooks.set.as_ref())
    }

    pub fn fallback_hook(&self, attribute: &str) -> Option<&FallbackHook> {
        self.hooks.get(attribute).and_then(|hooks| hooks.fallback.as_ref())
    }
}
