//! Serializable font handles, lazy typeface materialization and shaping-handle caching.
//!
//! This crate provides:
//! - [`Font`]: a font face with a fixed style, built eagerly from a loaded
//!   typeface or lazily from a decoded record plus a deferred loader
//! - [`TypefaceCodec`]: the pluggable payload format used when persisting fonts
//!   with the `fontshelf-buffer` codec
//! - [`ShapingHandleCache`]: per-font shaping handles keyed by font identity
//! - [`FontRegistry`]: family name to [`FontCollection`] lookup with a default
//!
//! # Locking
//!
//! Each `Font` guards its one-time materialization with its own
//! `parking_lot::Mutex`; loaders run under that lock and must not call back
//! into the same font. `FontRegistry` locks internally. `ShapingHandleCache`
//! does not: callers wrap it in a mutex and hold it across `resolve`.
//! No lock is ever taken while another of these is held, except that
//! `ShapingHandleCache::resolve` may materialize a font under the caller's
//! cache lock.

pub mod collection;
pub mod error;
pub mod font;
pub mod registry;
pub mod shaping_cache;
pub mod system;

pub use fontshelf_buffer as buffer;
pub use fontshelf_config as config;

// Re-export main types for convenience
pub use collection::FontCollection;
pub use error::FontError;
pub use font::{
    AxisTag, FakedFont, FileTypefaceCodec, Font, FontBuilder, FontFakery, FontFile, FontStyle,
    ShapedGlyph, ShapingBase, Slant, Typeface, TypefaceCodec, TypefaceLoader, weight,
};
pub use registry::FontRegistry;
pub use shaping_cache::{ShapingHandle, ShapingHandleCache};
