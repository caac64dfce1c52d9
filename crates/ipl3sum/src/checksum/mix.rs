//! 32-bit mixing primitive and rotate helpers
//!
//! Every phase of the checksum funnels its words through [`mix`]. All
//! arithmetic is modulo 2^32.

/// Multiplier shared by the seed expansion and the per-round mixing.
pub const MAGIC_NUMBER: u32 = 0x6c07_8965;

/// Combine three words into one.
///
/// A zero `y` is replaced by `z`. The 64-bit product `x * y` is split into
/// its high and low words and their wrapping difference is returned,
/// unless that difference is zero, in which case `x` comes back unchanged.
///
/// The function is not symmetric in `x` and `y`: `mix(5, 0, 3)` is
/// `0xFFFF_FFF1` while `mix(0, 5, 3)` is `0`.
#[inline]
pub fn mix(x: u32, y: u32, z: u32) -> u32 {
    let y = if y == 0 { z } else { y };

    let prod = u64::from(x) * u64::from(y);
    let hi = (prod >> 32) as u32;
    let lo = prod as u32;

    match hi.wrapping_sub(lo) {
        0 => x,
        diff => diff,
    }
}

/// Rotate right by `shift` bits, taken mod 32.
#[inline]
pub fn rotr(value: u32, shift: u32) -> u32 {
    value.rotate_right(shift & 0x1f)
}

/// Rotate left by `shift` bits, taken mod 32.
#[inline]
pub fn rotl(value: u32, shift: u32) -> u32 {
    value.rotate_left(shift & 0x1f)
}
