//! Sequential reader, the exact inverse of [`BufferWriter`](crate::BufferWriter).

use std::str::Utf8Error;

use bytemuck::Pod;

use crate::view::ArrayView;

/// Reads primitives and arrays from a byte slice in write order.
///
/// Arrays and text are returned as views borrowing the input, so the buffer
/// must outlive everything decoded from it. Counts are trusted; a truncated or
/// malformed buffer makes the reader panic.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BufferReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_u8(&mut self) -> u8 {
        let value = self.data[self.pos];
        self.pos += 1;
        value
    }

    pub fn read_u16(&mut self) -> u16 {
        let upper = u16::from(self.read_u8());
        (upper << 8) | u16::from(self.read_u8())
    }

    pub fn read_u32(&mut self) -> u32 {
        let upper = u32::from(self.read_u16());
        (upper << 16) | u32::from(self.read_u16())
    }

    /// Read a `u32` count and return a view over that many `T` at the cursor.
    ///
    /// No bytes are copied; the view aliases the input buffer.
    pub fn read_array<T: Pod>(&mut self) -> ArrayView<'a, T> {
        let count = self.read_u32() as usize;
        let byte_len = array_byte_len(count, std::mem::size_of::<T>());
        let bytes = &self.data[self.pos..self.pos + byte_len];
        self.pos += byte_len;
        ArrayView::new(bytes, count)
    }

    /// Read a byte array written by `write_text`/`write_str`.
    pub fn read_text(&mut self) -> &'a [u8] {
        self.read_array::<u8>().as_bytes()
    }

    /// Read text and check that it is UTF-8.
    pub fn read_str(&mut self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.read_text())
    }
}

/// Byte length of `count` elements of `element_size` bytes each.
///
/// # Panics
/// Panics if the length overflows `usize`, which a 32-bit count can do on
/// 32-bit targets.
fn array_byte_len(count: usize, element_size: usize) -> usize {
    count
        .checked_mul(element_size)
        .expect("array byte length overflows usize")
}
