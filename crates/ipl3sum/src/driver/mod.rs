//! Checksum driver: image in, report out

use crate::checksum::{Checksum, compute};
use crate::common::{ChecksumError, ChecksumResult};
use crate::rom::{CicVariant, RomImage};
use crate::source::{ByteOrder, Detection};
use std::path::Path;

/// Seed used by the common CIC-6102 when none is given
pub const DEFAULT_SEED: u32 = 0x3f;

/// Options for one checksum run
#[derive(Debug, Clone)]
pub struct ChecksumConfig {
    /// Seed, low 8 bits significant
    pub seed: u32,
    /// Force a byte order instead of detecting it from the header
    pub byte_order: Option<ByteOrder>,
    /// Value the result is verified against
    pub expected: Option<Checksum>,
    /// Also match the boot code against the known CIC variants
    pub identify: bool,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            byte_order: None,
            expected: None,
            identify: false,
        }
    }
}

/// Result of checksumming one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumReport {
    pub checksum: Checksum,
    pub byte_order: ByteOrder,
    /// Present when the byte order came from the header magic
    pub detection: Option<Detection>,
    pub expected: Option<Checksum>,
    /// Present when identification was requested and succeeded
    pub cic: Option<CicVariant>,
}

impl ChecksumReport {
    /// `true` when the byte order had to fall back to the default
    pub fn byte_order_guessed(&self) -> bool {
        self.detection.is_some_and(|d| !d.recognized)
    }

    /// Compare against the configured expectation, if any
    pub fn verify(&self) -> ChecksumResult<()> {
        match self.expected {
            Some(expected) if expected != self.checksum => Err(ChecksumError::Mismatch {
                expected,
                actual: self.checksum,
            }),
            _ => Ok(()),
        }
    }
}

/// Compute the checksum of an already loaded image
pub fn checksum_image(rom: &RomImage, config: &ChecksumConfig) -> ChecksumReport {
    let (byte_order, detection) = match config.byte_order {
        Some(order) => (order, None),
        None => {
            let detection = rom.detect_byte_order();
            (detection.order, Some(detection))
        }
    };

    let boot_code = rom.boot_code(byte_order);
    let checksum = compute(config.seed, boot_code);
    let cic = if config.identify {
        CicVariant::identify(boot_code)
    } else {
        None
    };

    ChecksumReport {
        checksum,
        byte_order,
        detection,
        expected: config.expected,
        cic,
    }
}

/// Load the image at `path` and compute its checksum
pub fn checksum_file(path: impl AsRef<Path>, config: &ChecksumConfig) -> ChecksumResult<ChecksumReport> {
    let rom = RomImage::open(path)?;
    Ok(checksum_image(&rom, config))
}

/// Parse a seed given in hex, with or without a `0x` prefix.
///
/// Values wider than a byte are accepted (`3f3f`); only the low 8 bits
/// reach the engine.
pub fn parse_seed(input: &str) -> ChecksumResult<u32> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ChecksumError::invalid_seed(input, "no digits"));
    }

    u32::from_str_radix(digits, 16).map_err(|e| ChecksumError::invalid_seed(input, e.to_string()))
}
