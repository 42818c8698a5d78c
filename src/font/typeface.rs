//! The native typeface seam.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::style::Slant;
use crate::error::FontError;

/// Four-byte OpenType variation axis tag, e.g. `wght`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisTag(pub u32);

impl AxisTag {
    pub const WEIGHT: AxisTag = AxisTag::from_bytes(b"wght");
    pub const WIDTH: AxisTag = AxisTag::from_bytes(b"wdth");
    pub const SLANT: AxisTag = AxisTag::from_bytes(b"slnt");
    pub const ITALIC: AxisTag = AxisTag::from_bytes(b"ital");
    pub const OPTICAL_SIZE: AxisTag = AxisTag::from_bytes(b"opsz");

    pub const fn from_bytes(bytes: &[u8; 4]) -> Self {
        AxisTag(u32::from_be_bytes(*bytes))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for AxisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl fmt::Debug for AxisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxisTag({})", self)
    }
}

/// An already-loaded native typeface.
///
/// Implementations are immutable once constructed. `font_data` must keep
/// returning the same bytes for the lifetime of the value; the shaping base
/// parses them on demand.
pub trait Typeface: Any + Send + Sync + fmt::Debug {
    /// OS/2 weight class of the face.
    fn weight(&self) -> u16;

    fn slant(&self) -> Slant;

    /// Variation axes declared by the face (empty for static fonts).
    fn supported_axes(&self) -> HashSet<AxisTag>;

    /// Raw OpenType bytes backing the face.
    fn font_data(&self) -> &[u8];

    /// Face index within `font_data` (non-zero only for collections).
    fn face_index(&self) -> u32;

    /// Downcast hook for typeface codecs that need backend-specific fields.
    fn as_any(&self) -> &dyn Any;
}

/// Deferred typeface construction for lazily decoded fonts.
///
/// Invoked under the owning font's materialization lock, so it must not call
/// back into that font.
pub type TypefaceLoader = Box<dyn FnMut() -> Result<Arc<dyn Typeface>, FontError> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_tag_bytes() {
        assert_eq!(AxisTag::WEIGHT.0, 0x7767_6874);
        assert_eq!(AxisTag::WEIGHT.to_bytes(), *b"wght");
        assert_eq!(AxisTag::OPTICAL_SIZE.to_string(), "opsz");
        assert_eq!(format!("{:?}", AxisTag::SLANT), "AxisTag(slnt)");
    }
}
