//! Raw catalog decoding.
//!
//! A catalog is a chunk holding one [`ObjectEntry`] per slot of the flat index
//! space. The chunk itself is produced by an external codec; this module only
//! turns the decoded bytes into entries and back.

use std::io::Read;

use objtab_common::BinaryReader;
use zerocopy::IntoBytes;

use crate::entry::ObjectEntry;
use crate::{Error, Result};

/// Decodes one chunk from a stream.
///
/// Implementations own the on-disk chunk format (header, RLE, rotation) and
/// return the decoded bytes.
pub trait ChunkCodec {
    fn read_chunk(&mut self, reader: &mut dyn Read) -> Result<Vec<u8>>;
}

/// A chunk stored without any encoding, `len` bytes long.
#[derive(Debug, Clone, Copy)]
pub struct RawChunk {
    pub len: usize,
}

impl RawChunk {
    /// A raw chunk sized for `count` entries.
    pub const fn for_entries(count: usize) -> Self {
        Self {
            len: count * ObjectEntry::SIZE,
        }
    }
}

impl ChunkCodec for RawChunk {
    fn read_chunk(&mut self, reader: &mut dyn Read) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.len];
        reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

impl<F> ChunkCodec for F
where
    F: FnMut(&mut dyn Read) -> Result<Vec<u8>>,
{
    fn read_chunk(&mut self, reader: &mut dyn Read) -> Result<Vec<u8>> {
        self(reader)
    }
}

/// Decode exactly `count` entries from a decoded chunk.
pub fn decode_entries(data: &[u8], count: usize) -> Result<Vec<ObjectEntry>> {
    let expected = count.saturating_mul(ObjectEntry::SIZE);
    if data.len() != expected {
        return Err(Error::MalformedCatalog {
            expected,
            actual: data.len(),
        });
    }

    let mut reader = BinaryReader::new(data);
    Ok(reader.read_array(count)?)
}

/// Encode entries into a chunk body.
pub fn encode_entries(entries: &[ObjectEntry]) -> Vec<u8> {
    entries.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entries() {
        let entries = vec![
            ObjectEntry::with_name(0x0000_0000, "TWIST1", 0x1234_5678),
            ObjectEntry::EMPTY,
            ObjectEntry::with_name(0x0000_0001, "TL0", 0x0BAD_F00D),
        ];
        let bytes = encode_entries(&entries);
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[16..32], &[0xFF; 16]);

        let decoded = decode_entries(&bytes, 3).unwrap();
        assert_eq!(decoded, entries);
        assert!(!decoded[1].is_present());
    }

    #[test]
    fn test_decode_wrong_length() {
        let bytes = vec![0u8; 40];
        match decode_entries(&bytes, 3) {
            Err(Error::MalformedCatalog { expected, actual }) => {
                assert_eq!(expected, 48);
                assert_eq!(actual, 40);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(decode_entries(&[0u8; 64], 3).is_err());
    }

    #[test]
    fn test_raw_chunk() {
        let data = [0xFFu8; 40];
        let mut codec = RawChunk::for_entries(2);
        let chunk = codec.read_chunk(&mut &data[..]).unwrap();
        assert_eq!(chunk.len(), 32);

        let mut short = RawChunk::for_entries(3);
        assert!(matches!(short.read_chunk(&mut &data[..]), Err(Error::Io(_))));
    }
}
