//! Pluggable typeface payload codecs.
//!
//! A font record is `[FontStyle][typeface payload]`. The payload format belongs
//! to whichever typeface backend produced the font, so it is supplied at call
//! time through [`TypefaceCodec`].

use std::path::PathBuf;
use std::sync::Arc;

use fontshelf_buffer::{BufferReader, BufferWriter};

use super::font_file::FontFile;
use super::typeface::{Typeface, TypefaceLoader};
use crate::error::FontError;

/// Writes a typeface payload and turns a decoded payload back into a loader.
///
/// `write_typeface` is called once while measuring and once for real, and
/// must write identical values both times.
pub trait TypefaceCodec {
    fn write_typeface(
        &self,
        writer: &mut BufferWriter<'_>,
        typeface: &dyn Typeface,
    ) -> Result<(), FontError>;

    /// Decode the payload at the reader's cursor. Must not load the typeface.
    fn read_typeface(&self, reader: &mut BufferReader<'_>) -> Result<TypefaceLoader, FontError>;
}

/// Payload for file-backed [`FontFile`] typefaces: `[path: text][face_index: u32]`.
///
/// The decoded loader reads and parses the file on first access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTypefaceCodec;

impl TypefaceCodec for FileTypefaceCodec {
    fn write_typeface(
        &self,
        writer: &mut BufferWriter<'_>,
        typeface: &dyn Typeface,
    ) -> Result<(), FontError> {
        let file = typeface
            .as_any()
            .downcast_ref::<FontFile>()
            .ok_or(FontError::UnsupportedTypeface("not a FontFile"))?;
        let path = file
            .path()
            .ok_or(FontError::UnsupportedTypeface("font was not loaded from a file"))?;
        let path = path
            .to_str()
            .ok_or(FontError::UnsupportedTypeface("font path is not valid UTF-8"))?;

        writer.write_str(path);
        writer.write_u32(file.face_index());
        Ok(())
    }

    fn read_typeface(&self, reader: &mut BufferReader<'_>) -> Result<TypefaceLoader, FontError> {
        let path = reader
            .read_str()
            .map_err(|e| FontError::InvalidRecord(format!("font path is not UTF-8: {e}")))?;
        let path = PathBuf::from(path);
        let face_index = reader.read_u32();

        Ok(Box::new(move || -> Result<Arc<dyn Typeface>, FontError> {
            log::debug!("Loading typeface from {:?} (face {})", path, face_index);
            let file = FontFile::from_path(&path, face_index)?;
            Ok(Arc::new(file) as Arc<dyn Typeface>)
        }))
    }
}
