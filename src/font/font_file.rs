//! OpenType font file backend for [`Typeface`].

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swash::FontRef;

use super::style::Slant;
use super::typeface::{AxisTag, Typeface};
use crate::error::FontError;

/// Owned font bytes with metrics read once through swash.
///
/// Cloning shares the underlying bytes.
#[derive(Clone)]
pub struct FontFile {
    /// Raw font data bytes (TTF/OTF/TTC)
    data: Arc<Vec<u8>>,
    /// Face index within `data`
    face_index: u32,
    /// File the bytes were read from, if any
    path: Option<PathBuf>,
    /// OS/2 weight class
    weight: u16,
    slant: Slant,
    /// fvar axis tags
    axes: HashSet<AxisTag>,
}

impl fmt::Debug for FontFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFile")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .field("path", &self.path)
            .field("weight", &self.weight)
            .field("slant", &self.slant)
            .finish()
    }
}

impl FontFile {
    /// Parse in-memory font bytes.
    ///
    /// # Arguments
    /// * `data` - Raw font data bytes (TTF/OTF/TTC format)
    /// * `face_index` - Face index within the data (0 for single-face fonts)
    pub fn from_bytes(data: Vec<u8>, face_index: u32) -> Result<Self, FontError> {
        Self::parse(Arc::new(data), face_index, None)
    }

    /// Read and parse a font file from disk.
    pub fn from_path(path: &Path, face_index: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(Arc::new(data), face_index, Some(path.to_path_buf()))
    }

    /// Parse bytes shared with another owner, such as a font database.
    pub fn from_shared(
        data: Arc<Vec<u8>>,
        face_index: u32,
        path: Option<PathBuf>,
    ) -> Result<Self, FontError> {
        Self::parse(data, face_index, path)
    }

    fn parse(
        data: Arc<Vec<u8>>,
        face_index: u32,
        path: Option<PathBuf>,
    ) -> Result<Self, FontError> {
        let font_ref = FontRef::from_index(data.as_slice(), face_index as usize).ok_or_else(
            || FontError::InvalidFontData {
                context: match &path {
                    Some(path) => format!("{} (face {})", path.display(), face_index),
                    None => format!("{} in-memory bytes (face {})", data.len(), face_index),
                },
            },
        )?;

        let attributes = font_ref.attributes();
        let slant = match attributes.style() {
            swash::Style::Normal => Slant::Upright,
            swash::Style::Italic | swash::Style::Oblique(_) => Slant::Italic,
        };
        let weight = attributes.weight().0;
        let axes = font_ref
            .variations()
            .map(|axis| AxisTag(axis.tag()))
            .collect();

        Ok(Self {
            data,
            face_index,
            path,
            weight,
            slant,
            axes,
        })
    }

    /// File the bytes were read from, `None` for in-memory fonts.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Typeface for FontFile {
    fn weight(&self) -> u16 {
        self.weight
    }

    fn slant(&self) -> Slant {
        self.slant
    }

    fn supported_axes(&self) -> HashSet<AxisTag> {
        self.axes.clone()
    }

    fn font_data(&self) -> &[u8] {
        self.data.as_slice()
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
