//! Big-endian writer with a measuring mode.

use bytemuck::Pod;

/// Writes primitives and arrays into a caller-owned byte slice.
///
/// A writer created with [`BufferWriter::measuring`] has no target: every write
/// advances the cursor without storing anything, so the final [`size`](Self::size)
/// is the exact allocation the real pass needs.
///
/// Writing past the end of a real target panics.
#[derive(Debug)]
pub struct BufferWriter<'a> {
    /// Destination bytes, `None` in measuring mode
    target: Option<&'a mut [u8]>,
    /// Bytes written (or counted) so far
    pos: usize,
}

impl<'a> BufferWriter<'a> {
    /// Create a writer that stores into `target` starting at offset 0.
    pub fn new(target: &'a mut [u8]) -> Self {
        Self {
            target: Some(target),
            pos: 0,
        }
    }

    /// Create a writer that only counts bytes.
    pub fn measuring() -> Self {
        Self {
            target: None,
            pos: 0,
        }
    }

    /// Whether this writer only counts bytes.
    pub fn is_measuring(&self) -> bool {
        self.target.is_none()
    }

    pub fn write_u8(&mut self, value: u8) {
        if let Some(target) = self.target.as_deref_mut() {
            target[self.pos] = value;
        }
        self.pos += 1;
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_u8((value >> 8) as u8);
        self.write_u8((value & 0xFF) as u8);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_u16((value >> 16) as u16);
        self.write_u16((value & 0xFFFF) as u16);
    }

    /// Write a `u32` element count followed by a raw copy of `elements`.
    ///
    /// Elements are copied in native byte order with no padding; the reader
    /// must not assume the array start is aligned.
    ///
    /// # Panics
    /// Panics if `elements.len()` does not fit in a `u32`.
    pub fn write_array<T: Pod>(&mut self, elements: &[T]) {
        assert!(
            elements.len() <= u32::MAX as usize,
            "array of {} elements exceeds u32 count prefix",
            elements.len()
        );
        self.write_u32(elements.len() as u32);

        let bytes: &[u8] = bytemuck::cast_slice(elements);
        if let Some(target) = self.target.as_deref_mut() {
            target[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        }
        self.pos += bytes.len();
    }

    /// Write raw text bytes as a byte array. No terminator, no encoding check.
    pub fn write_text(&mut self, text: &[u8]) {
        self.write_array::<u8>(text);
    }

    pub fn write_str(&mut self, text: &str) {
        self.write_text(text.as_bytes());
    }

    /// Number of bytes written so far.
    pub fn size(&self) -> usize {
        self.pos
    }
}
