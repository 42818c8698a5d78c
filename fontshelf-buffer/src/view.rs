//! Borrowed array views decoded from a buffer.

use std::fmt;
use std::marker::PhantomData;

use bytemuck::Pod;

/// A non-owning view of `len` elements of `T` inside a decoded buffer.
///
/// The start address carries no alignment guarantee, so elements are read
/// byte-wise. [`try_as_slice`](Self::try_as_slice) offers a zero-copy slice
/// when the bytes happen to be suitably aligned.
pub struct ArrayView<'a, T> {
    bytes: &'a [u8],
    len: usize,
    _element: PhantomData<T>,
}

impl<'a, T: Pod> ArrayView<'a, T> {
    pub(crate) fn new(bytes: &'a [u8], len: usize) -> Self {
        debug_assert_eq!(bytes.len(), len * std::mem::size_of::<T>());
        Self {
            bytes,
            len,
            _element: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy out the element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let size = std::mem::size_of::<T>();
        let start = index * size;
        Some(bytemuck::pod_read_unaligned(
            &self.bytes[start..start + size],
        ))
    }

    /// Iterate over copies of the elements.
    pub fn iter(&self) -> impl Iterator<Item = T> + use<'a, T> {
        let bytes = self.bytes;
        let size = std::mem::size_of::<T>();
        (0..self.len).map(move |index| {
            bytemuck::pod_read_unaligned(&bytes[index * size..(index + 1) * size])
        })
    }

    /// The raw element bytes, still borrowing the decoded buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Borrow the elements as a typed slice if the start is aligned for `T`.
    pub fn try_as_slice(&self) -> Option<&'a [T]> {
        bytemuck::try_cast_slice(self.bytes).ok()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T> Clone for ArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<T: Pod + fmt::Debug> fmt::Debug for ArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_reads_unaligned_elements() {
        let mut bytes = vec![0xEE];
        bytes.extend_from_slice(&0x1122_3344u32.to_ne_bytes());
        bytes.extend_from_slice(&0x5566_7788u32.to_ne_bytes());
        // Offset 1 is never 4-byte aligned relative to the start of the Vec.
        let view = ArrayView::<u32>::new(&bytes[1..], 2);
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(0), Some(0x1122_3344));
        assert_eq!(view.get(1), Some(0x5566_7788));
        assert_eq!(view.get(2), None);
        assert_eq!(view.to_vec(), vec![0x1122_3344, 0x5566_7788]);
    }

    #[test]
    fn test_empty_view() {
        let view = ArrayView::<u16>::new(&[], 0);
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert_eq!(format!("{:?}", view), "[]");
    }
}
