//! ROM image loading
//!
//! A cartridge image starts with a 64-byte header followed by the boot
//! code, which runs up to offset 0x1000. Only those first 4 KB matter for
//! the boot checksum.

mod cic;

pub use cic::CicVariant;

use crate::common::{ChecksumError, ChecksumResult};
use crate::source::{BootCode, ByteOrder, Detection, detect_byte_order};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size of the cartridge header preceding the boot code
pub const HEADER_SIZE: usize = 0x40;
/// End of the boot code region
pub const BOOT_CODE_END: usize = 0x1000;

/// The head of a ROM image, holding at least the header and boot code
#[derive(Debug, Clone)]
pub struct RomImage {
    bytes: Vec<u8>,
}

impl RomImage {
    /// Wrap an in-memory image. Fails if it stops before the end of the
    /// boot code.
    pub fn from_bytes(bytes: Vec<u8>) -> ChecksumResult<Self> {
        if bytes.len() < BOOT_CODE_END {
            return Err(ChecksumError::ImageTooSmall {
                len: bytes.len(),
                required: BOOT_CODE_END,
            });
        }
        Ok(Self { bytes })
    }

    /// Read the first 4 KB of the file at `path`
    pub fn open(path: impl AsRef<Path>) -> ChecksumResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ChecksumError::open(path, e))?;

        let mut bytes = Vec::with_capacity(BOOT_CODE_END);
        file.take(BOOT_CODE_END as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| ChecksumError::open(path, e))?;

        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn detect_byte_order(&self) -> Detection {
        detect_byte_order(&self.bytes)
    }

    /// The boot code region, read in `order`
    pub fn boot_code(&self, order: ByteOrder) -> BootCode<'_> {
        BootCode::new(&self.bytes[HEADER_SIZE..BOOT_CODE_END], order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::WordSource;
    use crate::testing::{lcg_image, reorder, zero_image};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_rejects_short_image() {
        let err = RomImage::from_bytes(vec![0; BOOT_CODE_END - 1]).unwrap_err();
        assert!(matches!(
            err,
            ChecksumError::ImageTooSmall {
                len: 0xfff,
                required: 0x1000
            }
        ));
    }

    #[test]
    fn test_boot_code_window() {
        let rom = RomImage::from_bytes(lcg_image()).unwrap();
        let code = rom.boot_code(ByteOrder::BigEndian);
        assert_eq!(code.len(), BOOT_CODE_END - HEADER_SIZE);
        assert_eq!(code.read_word(0), 0xba0c_97c9);
    }

    #[test]
    fn test_detects_reordered_dump() {
        for order in ByteOrder::ALL {
            let rom = RomImage::from_bytes(reorder(&zero_image(), order)).unwrap();
            let detection = rom.detect_byte_order();
            assert_eq!(detection.order, order);
            assert!(detection.recognized);
        }
    }

    #[test]
    fn test_open_reads_only_the_head() {
        let path = std::env::temp_dir().join(format!("ipl3sum-rom-{}.z64", std::process::id()));
        let mut image = lcg_image();
        image.extend(std::iter::repeat_n(0xee, 0x2000));
        File::create(&path).unwrap().write_all(&image).unwrap();

        let rom = RomImage::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rom.as_bytes().len(), BOOT_CODE_END);
        assert_eq!(rom.as_bytes(), &image[..BOOT_CODE_END]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = RomImage::open("/nonexistent/ipl3sum/rom.z64").unwrap_err();
        assert!(matches!(err, ChecksumError::Open { .. }));
    }
}
