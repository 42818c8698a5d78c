//! Font style (weight and slant) and its record layout.

use fontshelf_buffer::{BufferReader, BufferWrite, BufferWriter};

/// Standard OpenType weight classes.
pub mod weight {
    pub const THIN: u16 = 100;
    pub const EXTRA_LIGHT: u16 = 200;
    pub const LIGHT: u16 = 300;
    pub const NORMAL: u16 = 400;
    pub const MEDIUM: u16 = 500;
    pub const SEMI_BOLD: u16 = 600;
    pub const BOLD: u16 = 700;
    pub const EXTRA_BOLD: u16 = 800;
    pub const BLACK: u16 = 900;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slant {
    #[default]
    Upright,
    Italic,
}

impl Slant {
    fn to_u8(self) -> u8 {
        match self {
            Slant::Upright => 0,
            Slant::Italic => 1,
        }
    }

    // Unknown values decode as upright.
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Slant::Italic,
            _ => Slant::Upright,
        }
    }
}

/// Weight and slant of a font face.
///
/// Record layout: `[weight: u16][slant: u8]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontStyle {
    weight: u16,
    slant: Slant,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::new(weight::NORMAL, Slant::Upright)
    }
}

impl FontStyle {
    pub const fn new(weight: u16, slant: Slant) -> Self {
        Self { weight, slant }
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    pub fn slant(&self) -> Slant {
        self.slant
    }

    pub fn is_italic(&self) -> bool {
        self.slant == Slant::Italic
    }

    /// Decode a style written by [`BufferWrite::write_to`].
    pub fn read_from(reader: &mut BufferReader<'_>) -> Self {
        let weight = reader.read_u16();
        let slant = Slant::from_u8(reader.read_u8());
        Self { weight, slant }
    }
}

impl BufferWrite for FontStyle {
    fn write_to(&self, writer: &mut BufferWriter<'_>) {
        writer.write_u16(self.weight);
        writer.write_u8(self.slant.to_u8());
    }
}
