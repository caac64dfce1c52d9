//! Condense the mixed state into the 48-bit result

use super::Checksum;
use super::mix::{mix, rotr};
use super::state::AccumulatorState;

/// Fold the 16 state words into four, then into the checksum.
pub fn finalize(state: &AccumulatorState) -> Checksum {
    let words = state.words();
    let mut buf = [words[0]; 4];

    for (index, &data) in (0u32..).zip(words.iter()) {
        let tmp = buf[0].wrapping_add(rotr(data, data & 0x1f));
        buf[0] = tmp;

        buf[1] = if data < tmp {
            buf[1].wrapping_add(data)
        } else {
            mix(buf[1], data, index)
        };

        let bit0 = data & 1;
        let bit1 = (data >> 1) & 1;

        buf[2] = if bit1 == bit0 {
            buf[2].wrapping_add(data)
        } else {
            mix(buf[2], data, index)
        };

        buf[3] = if bit0 == 1 {
            buf[3] ^ data
        } else {
            mix(buf[3], data, index)
        };
    }

    let sum = mix(buf[0], buf[1], 16);
    let tmp = buf[3] ^ buf[2];
    Checksum::new((u64::from(sum) << 32) | u64::from(tmp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::state::STATE_WORDS;

    #[test]
    fn test_finalize_reads_state_without_mutating() {
        let state = AccumulatorState::from_words(std::array::from_fn(|i| ((i as u32) << 28) | 3));
        let copy = state;
        let first = finalize(&state);
        assert_eq!(state, copy);
        assert_eq!(finalize(&state), first);
    }

    #[test]
    fn test_finalize_uniform_odd_state() {
        // All words 1: bit0 set, bit1 clear, rotate by 1
        let state = AccumulatorState::from_words([1; STATE_WORDS]);
        let mut buf = [1u32; 4];
        for index in 0..16u32 {
            buf[0] = buf[0].wrapping_add(0x8000_0000);
            buf[1] = if 1 < buf[0] { buf[1].wrapping_add(1) } else { mix(buf[1], 1, index) };
            buf[2] = mix(buf[2], 1, index);
            buf[3] ^= 1;
        }
        let expected = (u64::from(mix(buf[0], buf[1], 16)) << 32) | u64::from(buf[3] ^ buf[2]);
        assert_eq!(finalize(&state).value(), expected & 0xffff_ffff_ffff);
    }
}
