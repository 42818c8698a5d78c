//! Measure-then-write binary codec for fontshelf records.
//!
//! This crate provides:
//! - [`BufferWriter`]: big-endian primitive and array writer with a measuring mode
//! - [`BufferReader`]: sequential reader that hands out borrowed views into its input
//! - [`ArrayView`]: a borrowed, possibly unaligned array decoded from a buffer
//!
//! # Wire layout
//!
//! - `u8`/`u16`/`u32`: big-endian, composed from single-byte writes
//! - array of `T`: `[u32 count][count * size_of::<T>() raw bytes]`, no padding
//! - text: array of bytes, no terminator
//!
//! The layout is a private in-memory contract. Buffers are produced and consumed
//! by the same process family, so decoding trusts declared counts; reading past
//! the end of the input panics.
//!
//! # Measuring
//!
//! Running the same encode routine once against [`BufferWriter::measuring`] and
//! once against a buffer of exactly the measured size always produces the same
//! byte count. [`encode`] and [`encode_with`] wrap that two-pass sequence.

mod reader;
mod view;
mod writer;

pub use reader::BufferReader;
pub use view::ArrayView;
pub use writer::BufferWriter;

/// A record that knows how to serialize itself into a [`BufferWriter`].
///
/// Implementations must write the same sequence of values regardless of
/// whether the writer is measuring, otherwise [`encode`] will panic.
pub trait BufferWrite {
    fn write_to(&self, writer: &mut BufferWriter<'_>);
}

/// Run `object`'s serialization once in measuring mode and return the byte count.
pub fn measure<T: BufferWrite + ?Sized>(object: &T) -> usize {
    let mut writer = BufferWriter::measuring();
    object.write_to(&mut writer);
    writer.size()
}

/// Serialize `object` into a freshly allocated buffer of exactly the measured size.
///
/// # Panics
/// Panics if the real pass writes a different number of bytes than the measuring pass.
pub fn encode<T: BufferWrite + ?Sized>(object: &T) -> Vec<u8> {
    let mut buffer = vec![0u8; measure(object)];
    let written = {
        let mut writer = BufferWriter::new(&mut buffer);
        object.write_to(&mut writer);
        writer.size()
    };
    assert_eq!(
        written,
        buffer.len(),
        "measuring pass and write pass disagree on record size"
    );
    buffer
}

/// Measure a fallible encode routine.
///
/// Used when the routine needs parameters beyond the record itself, such as a
/// pluggable payload codec.
pub fn measure_with<E, F>(encode_fn: F) -> Result<usize, E>
where
    F: Fn(&mut BufferWriter<'_>) -> Result<(), E>,
{
    let mut writer = BufferWriter::measuring();
    encode_fn(&mut writer)?;
    Ok(writer.size())
}

/// Measure, allocate and write a fallible encode routine.
///
/// # Panics
/// Panics if the two passes disagree on the number of bytes written.
pub fn encode_with<E, F>(encode_fn: F) -> Result<Vec<u8>, E>
where
    F: Fn(&mut BufferWriter<'_>) -> Result<(), E>,
{
    let mut buffer = vec![0u8; measure_with(&encode_fn)?];
    let written = {
        let mut writer = BufferWriter::new(&mut buffer);
        encode_fn(&mut writer)?;
        writer.size()
    };
    assert_eq!(
        written,
        buffer.len(),
        "measuring pass and write pass disagree on record size"
    );
    Ok(buffer)
}
