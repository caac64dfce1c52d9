//! Word sources feeding the checksum engine
//!
//! The engine only ever asks for "the 32-bit word at byte offset N". How
//! those four bytes are laid out in the dump is decided once, up front,
//! by picking a [`ByteOrder`].

mod detect;

pub use detect::{Detection, HEADER_MAGIC, detect_byte_order};

use std::fmt;

/// Read access to the boot code as a sequence of 32-bit words.
pub trait WordSource {
    /// Return the word starting at `offset` bytes from the start of the
    /// boot code. Offsets are multiples of 4.
    fn read_word(&self, offset: u32) -> u32;
}

impl<S: WordSource + ?Sized> WordSource for &S {
    fn read_word(&self, offset: u32) -> u32 {
        (**self).read_word(offset)
    }
}

/// Byte layout of a ROM dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Native cartridge order (`.z64`)
    BigEndian,
    /// Bytes swapped within each 16-bit half (`.v64`)
    ByteSwapped,
    /// Each 32-bit word fully reversed (`.n64`)
    LittleEndian,
}

impl ByteOrder {
    pub const ALL: [ByteOrder; 3] = [
        ByteOrder::BigEndian,
        ByteOrder::ByteSwapped,
        ByteOrder::LittleEndian,
    ];

    /// Reassemble a word from four bytes stored in this order
    pub fn word(self, b: [u8; 4]) -> u32 {
        match self {
            ByteOrder::BigEndian => u32::from_be_bytes(b),
            ByteOrder::ByteSwapped => u32::from_be_bytes([b[1], b[0], b[3], b[2]]),
            ByteOrder::LittleEndian => u32::from_le_bytes(b),
        }
    }

    /// Lay out a big-endian word in this order
    pub fn bytes(self, word: u32) -> [u8; 4] {
        let b = word.to_be_bytes();
        match self {
            ByteOrder::BigEndian => b,
            ByteOrder::ByteSwapped => [b[1], b[0], b[3], b[2]],
            ByteOrder::LittleEndian => word.to_le_bytes(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::BigEndian => "big-endian",
            ByteOrder::ByteSwapped => "byte-swapped",
            ByteOrder::LittleEndian => "little-endian",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Boot code borrowed from a larger buffer, read in a fixed byte order.
///
/// Bytes at or past the end of the slice read as zero, so a short region
/// yields zero-filled words instead of touching memory it does not own.
#[derive(Debug, Clone, Copy)]
pub struct BootCode<'a> {
    bytes: &'a [u8],
    order: ByteOrder,
}

impl<'a> BootCode<'a> {
    pub fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self { bytes, order }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn byte(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }
}

impl WordSource for BootCode<'_> {
    fn read_word(&self, offset: u32) -> u32 {
        let base = offset as usize;
        let raw: [u8; 4] = std::array::from_fn(|i| self.byte(base.saturating_add(i)));
        self.order.word(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_word_per_order() {
        let be = [0x12, 0x34, 0x56, 0x78];
        let v64 = [0x34, 0x12, 0x78, 0x56];
        let n64 = [0x78, 0x56, 0x34, 0x12];

        assert_eq!(BootCode::new(&be, ByteOrder::BigEndian).read_word(0), 0x1234_5678);
        assert_eq!(BootCode::new(&v64, ByteOrder::ByteSwapped).read_word(0), 0x1234_5678);
        assert_eq!(BootCode::new(&n64, ByteOrder::LittleEndian).read_word(0), 0x1234_5678);
    }

    #[test]
    fn test_bytes_inverts_word() {
        for order in ByteOrder::ALL {
            for word in [0u32, 0x8037_1240, 0xdead_beef, 0x0102_0304] {
                assert_eq!(order.word(order.bytes(word)), word, "{}", order);
            }
        }
        assert_eq!(ByteOrder::ByteSwapped.bytes(0x8037_1240), [0x37, 0x80, 0x40, 0x12]);
        assert_eq!(ByteOrder::LittleEndian.bytes(0x8037_1240), [0x40, 0x12, 0x37, 0x80]);
    }

    #[test]
    fn test_reads_past_end_are_zero_filled() {
        let bytes = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
        let code = BootCode::new(&bytes, ByteOrder::BigEndian);

        assert_eq!(code.read_word(4), 0xeeff_0000);
        assert_eq!(code.read_word(8), 0);
        assert_eq!(code.read_word(0xffff_fffc), 0);
    }

    #[test]
    fn test_second_word_offset() {
        let bytes = [0, 0, 0, 1, 0, 0, 0, 2];
        let code = BootCode::new(&bytes, ByteOrder::BigEndian);
        assert_eq!(code.read_word(0), 1);
        assert_eq!(code.read_word(4), 2);
        assert_eq!(code.len(), 8);
    }
}
