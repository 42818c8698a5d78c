//! Typed error types for fontshelf.
//!
//! Codec reads and writes are infallible by contract, so every variant here
//! comes from typeface loading, typeface payload encoding, or system font lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while loading, materializing or persisting a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// A font file could not be read from disk.
    #[error("Font file read failed for '{}': {source}", path.display())]
    Io {
        /// Path of the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The font bytes could not be parsed as an OpenType face.
    #[error("Invalid font data: {context}")]
    InvalidFontData {
        /// Where the bytes came from.
        context: String,
    },

    /// No face in the font database matches the requested family.
    #[error("Font family '{0}' not found")]
    FamilyNotFound(String),

    /// A typeface codec was handed a typeface it cannot represent.
    #[error("Typeface cannot be encoded by this codec: {0}")]
    UnsupportedTypeface(&'static str),

    /// A decoded typeface payload is not usable.
    #[error("Invalid typeface record: {0}")]
    InvalidRecord(String),

    /// A custom loader reported a failure.
    #[error("Typeface load failed: {0}")]
    LoadFailed(String),

    /// An earlier load attempt failed and the failure was cached.
    #[error("Typeface load previously failed: {0}")]
    PreviouslyFailed(String),
}
