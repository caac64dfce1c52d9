//! IPL3 Checksum - N64 boot code checksum calculator
//!
//! This library reproduces the checksum the PIF computes over the first
//! 4 KB of a cartridge image to validate it against the CIC chip.
//!
//! ## Architecture
//!
//! The library is organized into:
//! - **Checksum** (`checksum/`): The engine (initialize, 1008 mixing rounds, finalize)
//! - **Source** (`source/`): Word sources and byte order detection
//! - **ROM** (`rom/`): Image loading and the known CIC variants
//! - **Driver** (`driver/`): Configured runs producing reports
//! - **Common** (`common/`): Shared infrastructure (errors, diagnostics)

pub mod common;
pub mod checksum;
pub mod source;
pub mod rom;
pub mod driver;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use common::{ChecksumError, ChecksumResult, DiagnosticReporter};
pub use checksum::{Checksum, ChecksumEngine, compute};
pub use source::{BootCode, ByteOrder, WordSource};
pub use rom::{CicVariant, RomImage};
pub use driver::{ChecksumConfig, ChecksumReport, checksum_file, checksum_image};
