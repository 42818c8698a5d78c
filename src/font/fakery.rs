//! Synthetic style adjustments applied when no face matches exactly.

use std::hash::{Hash, Hasher};

use super::Font;

/// Fake bold / fake italic flags for a matched font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontFakery {
    fake_bold: bool,
    fake_italic: bool,
}

impl FontFakery {
    pub const fn new(fake_bold: bool, fake_italic: bool) -> Self {
        Self {
            fake_bold,
            fake_italic,
        }
    }

    pub fn is_fake_bold(&self) -> bool {
        self.fake_bold
    }

    pub fn is_fake_italic(&self) -> bool {
        self.fake_italic
    }
}

/// A font chosen for a style request, plus the fakery needed to reach that style.
///
/// Borrows the font from its owning collection. Two values are equal only if
/// they refer to the same `Font` instance with the same fakery.
#[derive(Debug, Clone, Copy)]
pub struct FakedFont<'a> {
    pub font: &'a Font,
    pub fakery: FontFakery,
}

impl<'a> FakedFont<'a> {
    pub fn new(font: &'a Font, fakery: FontFakery) -> Self {
        Self { font, fakery }
    }
}

impl PartialEq for FakedFont<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.font, other.font) && self.fakery == other.fakery
    }
}

impl Eq for FakedFont<'_> {}

impl Hash for FakedFont<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.font, state);
        self.fakery.hash(state);
    }
}
