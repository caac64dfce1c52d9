//! The 1008-round mixing loop
//!
//! Each round folds one boot code word into the accumulator. Slots 0-9
//! are updated on every round. Slots 10-15 also need the word after the
//! current one, so they are only updated while such a word exists: rounds
//! 1 to 1007. The last round never reads past word 1007.

use super::mix::{MAGIC_NUMBER, mix, rotl, rotr};
use super::state::AccumulatorState;
use crate::source::WordSource;

/// Number of rounds, one per boot code word
pub const ROUNDS: u32 = 1008;

/// Words visible to a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundInput {
    /// 1-based round number
    pub round: u32,
    /// Previous round's word; on round 1 the first word
    pub last: u32,
    pub data: u32,
    /// The following word, absent on the final round
    pub next: Option<u32>,
}

/// Run every round over `source`, updating `state` in place.
pub fn run<S: WordSource + ?Sized>(state: &mut AccumulatorState, source: &S) {
    let mut data = source.read_word(0);

    for round in 1..=ROUNDS {
        let last = data;
        let offset = 4 * (round - 1);
        data = source.read_word(offset);
        let next = (round < ROUNDS).then(|| source.read_word(offset + 4));

        apply_round(
            state,
            RoundInput {
                round,
                last,
                data,
                next,
            },
        );
    }

    log::debug!("mixed {} rounds, state {:08x?}", ROUNDS, state.words());
}

/// Apply one round. The extension block (slots 10-15) runs only when the
/// input carries a following word.
pub fn apply_round(state: &mut AccumulatorState, input: RoundInput) {
    let RoundInput {
        round,
        last,
        data,
        next,
    } = input;
    let b = &mut state.words;

    b[0] = b[0].wrapping_add(mix(1007u32.wrapping_sub(round), data, round));
    b[1] = mix(b[1], data, round);
    b[2] ^= data;
    b[3] = b[3].wrapping_add(mix(data.wrapping_add(5), MAGIC_NUMBER, round));

    b[9] = if last < data {
        mix(b[9], data, round)
    } else {
        b[9].wrapping_add(data)
    };

    let shift_a = last & 0x1f;
    let rot_r5 = rotr(data, shift_a);
    b[4] = b[4].wrapping_add(rot_r5);
    b[7] = mix(b[7], rotl(data, shift_a), round);

    b[6] = if data < b[6] {
        b[3].wrapping_add(b[6]) ^ data.wrapping_add(round)
    } else {
        b[4].wrapping_add(data) ^ b[6]
    };

    let shift_b = last >> 27;
    let rot_l2 = rotl(data, shift_b);
    b[5] = b[5].wrapping_add(rot_l2);
    b[8] = mix(b[8], rotr(data, shift_b), round);

    let Some(next) = next else {
        log::trace!("round {}: final, extension skipped", round);
        return;
    };

    let t = mix(b[15], rot_l2, round);
    b[15] = mix(t, rotl(next, data >> 27), round);

    let shift_d = data & 0x1f;
    let t = mix(b[14], rot_r5, round);
    b[14] = mix(t, rotr(next, shift_d), round);

    b[13] = b[13].wrapping_add(rotr(data, shift_d).wrapping_add(rotr(next, next & 0x1f)));

    b[10] = mix(b[10].wrapping_add(data), next, round);
    b[11] = mix(b[11] ^ data, next, round);
    b[12] = b[12].wrapping_add(b[8] ^ data);
}
