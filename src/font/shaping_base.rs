//! Per-typeface shaping base handle backed by rustybuzz.

use std::fmt;
use std::sync::Arc;

use super::typeface::Typeface;

/// Single shaped glyph in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    pub glyph_id: u32,
    /// Byte offset of the source cluster in the shaped text
    pub cluster: u32,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// Shaping state derived once from a resolved typeface.
///
/// The rustybuzz face borrows the typeface bytes, so it is reparsed per call
/// while the probe results computed here are kept.
pub struct ShapingBase {
    typeface: Arc<dyn Typeface>,
    /// `None` when rustybuzz cannot parse the typeface bytes
    units_per_em: Option<i32>,
}

impl fmt::Debug for ShapingBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapingBase")
            .field("typeface", &self.typeface)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl ShapingBase {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        let units_per_em =
            rustybuzz::Face::from_slice(typeface.font_data(), typeface.face_index())
                .map(|face| i32::from(face.units_per_em()));
        if units_per_em.is_none() {
            log::debug!("Typeface {:?} is not shapeable", typeface);
        }
        Self {
            typeface,
            units_per_em,
        }
    }

    pub fn typeface(&self) -> &Arc<dyn Typeface> {
        &self.typeface
    }

    pub fn units_per_em(&self) -> Option<i32> {
        self.units_per_em
    }

    pub fn is_shapeable(&self) -> bool {
        self.units_per_em.is_some()
    }

    /// Shape `text` with default features and guessed script/direction.
    ///
    /// Returns `None` when the typeface is not shapeable.
    pub fn shape(&self, text: &str) -> Option<Vec<ShapedGlyph>> {
        if !self.is_shapeable() {
            return None;
        }
        let face = rustybuzz::Face::from_slice(
            self.typeface.font_data(),
            self.typeface.face_index(),
        )?;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let output = rustybuzz::shape(&face, &[], buffer);

        Some(
            output
                .glyph_infos()
                .iter()
                .zip(output.glyph_positions())
                .map(|(info, pos)| ShapedGlyph {
                    glyph_id: info.glyph_id,
                    cluster: info.cluster,
                    x_advance: pos.x_advance,
                    y_advance: pos.y_advance,
                    x_offset: pos.x_offset,
                    y_offset: pos.y_offset,
                })
                .collect(),
        )
    }
}
