//! Object entry descriptors.
//!
//! An object entry is the 16-byte identity record stored in catalogs and
//! object definition headers:
//!
//! | Offset | Size | Field    |
//! |--------|------|----------|
//! | 0      | 4    | flags    |
//! | 4      | 8    | name     |
//! | 12     | 4    | checksum |
//!
//! All integers are little-endian. The low nibble of `flags` is the object
//! type code and the next nibble is the source code (which expansion or
//! origin the object comes from).

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::group::ObjectType;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A fixed-size object descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ObjectEntry {
    flags: [u8; 4],
    name: [u8; 8],
    checksum: [u8; 4],
}

impl ObjectEntry {
    /// Size of an encoded entry in bytes.
    pub const SIZE: usize = 16;

    /// The unused-slot sentinel: every bit set.
    pub const EMPTY: Self = Self {
        flags: [0xFF; 4],
        name: [0xFF; 8],
        checksum: [0xFF; 4],
    };

    /// Create an entry from its fields.
    #[inline]
    pub const fn new(flags: u32, name: [u8; 8], checksum: u32) -> Self {
        Self {
            flags: flags.to_le_bytes(),
            name,
            checksum: checksum.to_le_bytes(),
        }
    }

    /// Create an entry from a name string, padding it with spaces to 8 bytes.
    ///
    /// Names longer than 8 bytes are truncated.
    pub fn with_name(flags: u32, name: &str, checksum: u32) -> Self {
        let mut padded = [b' '; 8];
        for (dst, src) in padded.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        Self::new(flags, padded, checksum)
    }

    /// Raw flags field.
    #[inline]
    pub const fn flags(&self) -> u32 {
        u32::from_le_bytes(self.flags)
    }

    /// Raw checksum field.
    #[inline]
    pub const fn checksum(&self) -> u32 {
        u32::from_le_bytes(self.checksum)
    }

    /// Raw, space-padded name.
    #[inline]
    pub const fn name(&self) -> &[u8; 8] {
        &self.name
    }

    /// The name with trailing padding removed, decoded as Latin-1.
    pub fn name_str(&self) -> String {
        let end = self
            .name
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |p| p + 1);
        self.name[..end].iter().map(|&b| char::from(b)).collect()
    }

    /// The four 32-bit words making up the entry, in file order.
    #[inline]
    pub fn words(&self) -> [u32; 4] {
        [
            self.flags(),
            u32::from_le_bytes([self.name[0], self.name[1], self.name[2], self.name[3]]),
            u32::from_le_bytes([self.name[4], self.name[5], self.name[6], self.name[7]]),
            self.checksum(),
        ]
    }

    /// Whether this entry describes an object rather than an unused slot.
    ///
    /// An entry is absent only when the AND of all four words is all-ones,
    /// i.e. when every bit of the record is set.
    #[inline]
    pub fn is_present(&self) -> bool {
        let combined = self.words().iter().fold(u32::MAX, |acc, w| acc & w);
        combined != u32::MAX
    }

    /// Object type code stored in the low nibble of the flags.
    #[inline]
    pub const fn type_code(&self) -> u8 {
        self.flags[0] & 0x0F
    }

    /// Object type, if the type code is one of the known types.
    #[inline]
    pub fn object_type(&self) -> Option<ObjectType> {
        ObjectType::from_code(self.type_code())
    }

    /// Source code stored in bits 4..8 of the flags.
    #[inline]
    pub const fn source_code(&self) -> u8 {
        (self.flags[0] & 0xF0) >> 4
    }

    /// Human-readable identifier, e.g. `TWIST1/80000000E3B5C1A2`.
    ///
    /// The name has its spaces stripped and is followed by the flags and the
    /// checksum, each written byte by byte starting from the least
    /// significant byte. Only meaningful for present entries.
    pub fn identifier(&self) -> String {
        debug_assert!(self.is_present(), "identifier requested for an empty entry");

        let mut id = String::with_capacity(8 + 1 + 16);
        id.extend(
            self.name
                .iter()
                .filter(|&&b| b != b' ')
                .map(|&b| char::from(b)),
        );
        id.push('/');
        for byte in self.flags.iter().chain(self.checksum.iter()) {
            id.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            id.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
        }
        id
    }
}

impl Default for ObjectEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for ObjectEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_present() {
            return f.write_str("ObjectEntry(<empty>)");
        }
        write!(
            f,
            "ObjectEntry({:?}, flags={:#010x}, checksum={:#010x})",
            self.name_str(),
            self.flags(),
            self.checksum()
        )
    }
}
