//! Identity-keyed cache of per-font shaping handles.
//!
//! The cache does no locking of its own. Wrap it in a mutex and hold the lock
//! across each [`ShapingHandleCache::resolve`] call so that two threads never
//! build a handle for the same font.

use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock, Weak};

use fontshelf_config::ShapingCacheConfig;
use lru::LruCache;

use crate::error::FontError;
use crate::font::{Font, ShapedGlyph, ShapingBase};

/// Opaque token handed to the shaping step for one font.
#[derive(Debug)]
pub struct ShapingHandle {
    /// `None` only for the shared placeholder
    base: Option<Arc<ShapingBase>>,
}

static PLACEHOLDER: LazyLock<Arc<ShapingHandle>> =
    LazyLock::new(|| Arc::new(ShapingHandle { base: None }));

impl ShapingHandle {
    /// The process-wide handle returned for an absent font.
    pub fn placeholder() -> Arc<ShapingHandle> {
        Arc::clone(&PLACEHOLDER)
    }

    pub fn is_placeholder(&self) -> bool {
        self.base.is_none()
    }

    pub fn base(&self) -> Option<&Arc<ShapingBase>> {
        self.base.as_ref()
    }

    /// Shape `text` with this handle's font. `None` for the placeholder or an
    /// unshapeable typeface.
    pub fn shape(&self, text: &str) -> Option<Vec<ShapedGlyph>> {
        self.base.as_ref()?.shape(text)
    }
}

struct CacheEntry {
    // Holding the Weak keeps the font's allocation, and so its address, reserved
    // until the entry is removed.
    font: Weak<Font>,
    handle: Arc<ShapingHandle>,
}

/// Entry count below which inserts never trigger a sweep for dropped fonts.
const MIN_SWEEP_THRESHOLD: usize = 64;

/// Maps font identity to its shaping handle, building handles on first use.
///
/// Unbounded by default: the same font always gets the same handle. With a
/// capacity, least recently used entries are evicted and rebuilt on demand.
///
/// Entries of dropped fonts still pin their typeface bytes. Inserts sweep them
/// out once the cache has doubled in size since the last sweep, so the cache
/// stays proportional to the number of live fonts without manual
/// [`purge_dead`](Self::purge_dead) calls.
pub struct ShapingHandleCache {
    entries: LruCache<usize, CacheEntry>,
    /// Entry count at which the next insert sweeps dropped fonts
    next_sweep: usize,
}

impl Default for ShapingHandleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapingHandleCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self {
            entries: LruCache::unbounded(),
            next_sweep: MIN_SWEEP_THRESHOLD,
        }
    }

    /// Create a cache that keeps at most `capacity` handles.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            next_sweep: MIN_SWEEP_THRESHOLD,
        }
    }

    pub fn from_config(config: &ShapingCacheConfig) -> Self {
        match config.bound() {
            Some(capacity) => Self::with_capacity(capacity),
            None => Self::new(),
        }
    }

    /// Return the handle for `font`, building and caching it on first request.
    ///
    /// An absent font yields the shared placeholder. Building a handle
    /// materializes the font, so a typeface load failure is returned here and
    /// nothing is cached.
    pub fn resolve(&mut self, font: Option<&Arc<Font>>) -> Result<Arc<ShapingHandle>, FontError> {
        let Some(font) = font else {
            return Ok(ShapingHandle::placeholder());
        };

        let key = Arc::as_ptr(font) as usize;
        if let Some(entry) = self.entries.get(&key) {
            // The stored Weak keeps this address from being reused by another font.
            debug_assert!(std::ptr::eq(entry.font.as_ptr(), Arc::as_ptr(font)));
            return Ok(Arc::clone(&entry.handle));
        }

        let handle = Arc::new(ShapingHandle {
            base: Some(font.base_font()?),
        });
        log::debug!("Built shaping handle for font at {:#x}", key);

        if self.entries.len() >= self.next_sweep {
            self.purge_dead();
            self.next_sweep = (self.entries.len() * 2).max(MIN_SWEEP_THRESHOLD);
        }

        let entry = CacheEntry {
            font: Arc::downgrade(font),
            handle: Arc::clone(&handle),
        };
        if let Some((evicted, _)) = self.entries.push(key, entry) {
            log::debug!("Evicted shaping handle for font at {:#x}", evicted);
        }
        Ok(handle)
    }

    /// Whether a handle for `font` is currently cached.
    pub fn contains(&self, font: &Arc<Font>) -> bool {
        self.entries.contains(&(Arc::as_ptr(font) as usize))
    }

    /// Drop entries whose font has been released. Returns how many were removed.
    pub fn purge_dead(&mut self) -> usize {
        let dead: Vec<usize> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.font.strong_count() == 0)
            .map(|(key, _)| *key)
            .collect();
        for key in &dead {
            self.entries.pop(key);
        }
        if !dead.is_empty() {
            log::debug!("Purged {} shaping handles of dropped fonts", dead.len());
        }
        dead.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
