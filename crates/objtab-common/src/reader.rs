//! Binary reader for zero-copy parsing of byte slices.
//!
//! [`BinaryReader`] walks a decoded table one fixed-size record at a time,
//! keeping track of its position so errors can point at the offending offset.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A cursor over a little-endian byte slice.
///
/// # Example
///
/// ```
/// use objtab_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0xFF, 0xFF, 0xFF, 0xFF];
/// let mut reader = BinaryReader::new(&data);
///
/// let words: Vec<[u8; 4]> = reader.read_array(2).unwrap();
/// assert_eq!(u32::from_le_bytes(words[0]), 0x04030201);
/// assert_eq!(u32::from_le_bytes(words[1]), u32::MAX);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let offset = self.position;
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::InvalidRecord { offset, size })
    }

    /// Read `count` consecutive structs.
    pub fn read_array<T: FromBytes>(&mut self, count: usize) -> Result<Vec<T>> {
        let needed = count.saturating_mul(std::mem::size_of::<T>());
        if self.remaining() < needed {
            return Err(Error::UnexpectedEof {
                needed,
                available: self.remaining(),
            });
        }

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_struct()?);
        }
        Ok(items)
    }
}
