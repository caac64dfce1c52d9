//! Boot code checksum engine
//!
//! The PIF validates the first 4 KB of a cartridge by running a fixed
//! checksum over it and comparing the 48-bit result with the value the
//! CIC reports. The computation has three phases:
//!
//! 1. **Initialize** - expand the seed and fill the 16-word accumulator.
//! 2. **Mix** - fold 1008 boot code words into the accumulator.
//! 3. **Finalize** - condense the accumulator into the 48-bit checksum.
//!
//! [`compute`] runs all three; [`ChecksumEngine`] exposes them one by one.

mod finalize;
mod mix;
mod mixer;
mod state;

pub use finalize::finalize;
pub use mix::{MAGIC_NUMBER, mix, rotl, rotr};
pub use mixer::{ROUNDS, RoundInput, apply_round};
pub use state::{AccumulatorState, STATE_WORDS, expand_seed};

use crate::common::ChecksumError;
use crate::source::WordSource;
use std::fmt;
use std::str::FromStr;

/// A 48-bit boot code checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(u64);

impl Checksum {
    pub const MASK: u64 = 0xffff_ffff_ffff;

    /// Wrap a value, keeping its low 48 bits
    pub const fn new(value: u64) -> Self {
        Self(value & Self::MASK)
    }

    pub const fn from_parts(high: u16, low: u32) -> Self {
        Self(((high as u64) << 32) | low as u64)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Bits 32-47
    pub const fn high(self) -> u16 {
        (self.0 >> 32) as u16
    }

    /// Bits 0-31
    pub const fn low(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} {:08X}", self.high(), self.low())
    }
}

impl FromStr for Checksum {
    type Err = ChecksumError;

    /// Accepts up to 12 hex digits, optionally prefixed with `0x` and
    /// optionally split by whitespace (`A536 C0F1D859`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let digits: String = digits.split_whitespace().collect();

        if digits.is_empty() {
            return Err(ChecksumError::invalid_checksum(s, "no digits"));
        }
        if digits.len() > 12 {
            return Err(ChecksumError::invalid_checksum(s, "more than 48 bits"));
        }

        u64::from_str_radix(&digits, 16)
            .map(Self::new)
            .map_err(|e| ChecksumError::invalid_checksum(s, e.to_string()))
    }
}

/// One checksum computation over one word source.
///
/// `new` runs the initializer, [`calculate`](Self::calculate) consumes the
/// engine and runs the mixing rounds, so the rounds can only ever run once.
#[derive(Debug)]
pub struct ChecksumEngine<S> {
    state: AccumulatorState,
    source: S,
}

impl<S: WordSource> ChecksumEngine<S> {
    pub fn new(seed: u32, source: S) -> Self {
        let state = AccumulatorState::initialize(seed, &source);
        Self { state, source }
    }

    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    /// Run all mixing rounds
    pub fn calculate(mut self) -> MixedState {
        mixer::run(&mut self.state, &self.source);
        MixedState { state: self.state }
    }
}

/// Accumulator after all rounds, ready to be finalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedState {
    state: AccumulatorState,
}

impl MixedState {
    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    pub fn finalize(&self) -> Checksum {
        finalize(&self.state)
    }
}

/// Compute the checksum of `source` for `seed` (low 8 bits significant).
pub fn compute<S: WordSource>(seed: u32, source: S) -> Checksum {
    let checksum = ChecksumEngine::new(seed, source).calculate().finalize();
    log::debug!("seed {:#04x}: checksum {}", seed & 0xff, checksum);
    checksum
}
