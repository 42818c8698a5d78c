//! Family name to font collection registry.
//!
//! [`FontRegistry`] is an explicitly constructed service: create it at startup,
//! register collections, then share it (typically behind an `Arc`) with the
//! fallback resolver. Reads and writes serialize on one lock, which is only
//! expected to be contended during initialization.

use std::collections::HashMap;
use std::sync::Arc;

use fontshelf_config::RegistryConfig;
use parking_lot::Mutex;

use crate::collection::FontCollection;

struct RegistryState<C> {
    fallbacks: HashMap<String, Arc<C>>,
    default: Option<Arc<C>>,
}

/// Maps family names to shared collections, plus one unnamed default.
///
/// Registration replaces any previous mapping wholesale; last write wins.
pub struct FontRegistry<C = FontCollection> {
    state: Mutex<RegistryState<C>>,
    /// Family whose registration also installs the default fallback
    default_family: Option<String>,
}

impl<C> Default for FontRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FontRegistry<C> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                fallbacks: HashMap::new(),
                default: None,
            }),
            default_family: None,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            default_family: config.default_family.clone(),
            ..Self::new()
        }
    }

    /// Collection registered for `family`, else the default, else `None`.
    pub fn find(&self, family: &str) -> Option<Arc<C>> {
        let state = self.state.lock();
        state
            .fallbacks
            .get(family)
            .or(state.default.as_ref())
            .cloned()
    }

    /// Register `collection` under `family`, replacing any previous mapping.
    ///
    /// If `family` is the configured default family, the collection also
    /// becomes the default fallback.
    pub fn register_fallback(&self, family: impl Into<String>, collection: Arc<C>) {
        let family = family.into();
        let mut state = self.state.lock();
        if self.default_family.as_deref() == Some(family.as_str()) {
            log::debug!("Family '{}' is the configured default", family);
            state.default = Some(Arc::clone(&collection));
        }
        if state.fallbacks.insert(family.clone(), collection).is_some() {
            log::info!("Replaced font collection for family '{}'", family);
        }
    }

    /// Set the collection returned for unregistered family names.
    pub fn register_default(&self, collection: Arc<C>) {
        let mut state = self.state.lock();
        if state.default.replace(collection).is_some() {
            log::info!("Replaced default font collection");
        }
    }

    pub fn default_collection(&self) -> Option<Arc<C>> {
        self.state.lock().default.clone()
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> Vec<String> {
        let mut families: Vec<String> = self.state.lock().fallbacks.keys().cloned().collect();
        families.sort();
        families
    }
}
