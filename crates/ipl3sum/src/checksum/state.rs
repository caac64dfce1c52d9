//! The 16-word accumulator state and its seed expansion

use super::mix::MAGIC_NUMBER;
use crate::source::WordSource;

/// Number of accumulator words
pub const STATE_WORDS: usize = 16;

/// Accumulator mixed across the rounds.
///
/// Each index has its own update rule and several rules read other
/// indices, so this stays a plain array addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulatorState {
    pub(crate) words: [u32; STATE_WORDS],
}

impl AccumulatorState {
    /// Seed the state: every word becomes `expand_seed(seed) ^ word(0)`.
    pub fn initialize<S: WordSource + ?Sized>(seed: u32, source: &S) -> Self {
        let init = expand_seed(seed) ^ source.read_word(0);
        log::debug!("seed {:#04x} expands to initial state {:#010x}", seed & 0xff, init);
        Self::from_words([init; STATE_WORDS])
    }

    pub fn from_words(words: [u32; STATE_WORDS]) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[u32; STATE_WORDS] {
        &self.words
    }
}

/// `MAGIC_NUMBER * (seed & 0xff) + 1`, modulo 2^32. Only the low byte of
/// the seed is significant.
pub fn expand_seed(seed: u32) -> u32 {
    MAGIC_NUMBER.wrapping_mul(seed & 0xff).wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BootCode, ByteOrder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_seed() {
        assert_eq!(expand_seed(0), 1);
        assert_eq!(expand_seed(1), MAGIC_NUMBER + 1);
        assert_eq!(expand_seed(0x3f), 0x95da_cfdc);
        assert_eq!(expand_seed(0x3f3f), expand_seed(0x3f));
        assert_eq!(expand_seed(0xffff_ff3f), expand_seed(0x3f));
    }

    #[test]
    fn test_initialize_mixes_first_word() {
        let bytes = [0xba, 0x0c, 0x97, 0xc9, 0xff, 0xff, 0xff, 0xff];
        let code = BootCode::new(&bytes, ByteOrder::BigEndian);
        let state = AccumulatorState::initialize(0x3f, &code);
        assert_eq!(state.words(), &[0x2fd6_5815; STATE_WORDS]);
    }

    #[test]
    fn test_initialize_zero_code() {
        let code = BootCode::new(&[], ByteOrder::BigEndian);
        let state = AccumulatorState::initialize(0x78, &code);
        assert_eq!(state, AccumulatorState::from_words([expand_seed(0x78); STATE_WORDS]));
    }
}
