//! Shared integration test fixtures for fontshelf.
//!
//! Include with `mod common;` at the top of each test file. The
//! `#[allow(dead_code)]` attribute suppresses warnings when only a subset of
//! helpers are used per file.

#![allow(dead_code)]

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fontshelf::buffer::{BufferReader, BufferWriter};
use fontshelf::{AxisTag, FontError, Slant, Typeface, TypefaceCodec, TypefaceLoader};

/// In-memory typeface with fixed metrics and no outline data.
#[derive(Debug, Clone, PartialEq)]
pub struct MockTypeface {
    pub name: String,
    pub weight: u16,
    pub slant: Slant,
    pub axes: Vec<AxisTag>,
}

impl MockTypeface {
    pub fn new(name: &str, weight: u16, slant: Slant) -> Self {
        Self {
            name: name.to_string(),
            weight,
            slant,
            axes: Vec::new(),
        }
    }

    pub fn with_axes(mut self, axes: &[AxisTag]) -> Self {
        self.axes = axes.to_vec();
        self
    }
}

impl Typeface for MockTypeface {
    fn weight(&self) -> u16 {
        self.weight
    }

    fn slant(&self) -> Slant {
        self.slant
    }

    fn supported_axes(&self) -> HashSet<AxisTag> {
        self.axes.iter().copied().collect()
    }

    fn font_data(&self) -> &[u8] {
        &[]
    }

    fn face_index(&self) -> u32 {
        0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Loader that counts its invocations and returns `typeface` each time.
pub fn counting_loader(typeface: MockTypeface, calls: Arc<AtomicUsize>) -> TypefaceLoader {
    Box::new(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(typeface.clone()) as Arc<dyn Typeface>)
    })
}

/// Codec for [`MockTypeface`]: `[name: text][weight: u16][slant: u8][axes: u32 array]`.
///
/// Counts how many loaders it has handed out that were actually invoked.
#[derive(Debug, Default, Clone)]
pub struct MockCodec {
    pub loads: Arc<AtomicUsize>,
}

impl TypefaceCodec for MockCodec {
    fn write_typeface(
        &self,
        writer: &mut BufferWriter<'_>,
        typeface: &dyn Typeface,
    ) -> Result<(), FontError> {
        let mock = typeface
            .as_any()
            .downcast_ref::<MockTypeface>()
            .ok_or(FontError::UnsupportedTypeface("not a MockTypeface"))?;
        writer.write_str(&mock.name);
        writer.write_u16(mock.weight);
        writer.write_u8(u8::from(mock.slant == Slant::Italic));
        let tags: Vec<u32> = mock.axes.iter().map(|tag| tag.0).collect();
        writer.write_array(tags.as_slice());
        Ok(())
    }

    fn read_typeface(&self, reader: &mut BufferReader<'_>) -> Result<TypefaceLoader, FontError> {
        let name = reader
            .read_str()
            .map_err(|e| FontError::InvalidRecord(e.to_string()))?
            .to_string();
        let weight = reader.read_u16();
        let slant = if reader.read_u8() == 1 {
            Slant::Italic
        } else {
            Slant::Upright
        };
        let axes: Vec<AxisTag> = reader.read_array::<u32>().iter().map(AxisTag).collect();
        let typeface = MockTypeface::new(&name, weight, slant).with_axes(&axes);
        Ok(counting_loader(typeface, Arc::clone(&self.loads)))
    }
}

/// Bundled DejaVu Sans Mono Oblique: a static, single-face TrueType font.
pub const FIXTURE_FONT_FAMILY: &str = "DejaVu Sans Mono";

pub fn fixture_font_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("DejaVuSansMono-Oblique.ttf")
}

pub fn fixture_font_bytes() -> &'static [u8] {
    include_bytes!("../fixtures/DejaVuSansMono-Oblique.ttf")
}
