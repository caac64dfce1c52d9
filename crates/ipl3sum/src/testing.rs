//! Synthetic ROM images shared by the unit tests

use crate::source::{ByteOrder, HEADER_MAGIC};

pub const IMAGE_SIZE: usize = 0x1000;
pub const BOOT_CODE_START: usize = 0x40;

/// Big-endian image: header magic, everything else zero
pub fn zero_image() -> Vec<u8> {
    let mut image = vec![0u8; IMAGE_SIZE];
    image[..4].copy_from_slice(&HEADER_MAGIC.to_be_bytes());
    image
}

/// Big-endian image whose boot code comes from a 32-bit LCG
/// (`s = s * 1103515245 + 12345`, byte = top 8 bits, seeded `0x1234abcd`)
pub fn lcg_image() -> Vec<u8> {
    let mut image = zero_image();
    let mut s: u32 = 0x1234_abcd;
    for byte in &mut image[BOOT_CODE_START..] {
        s = s.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        *byte = (s >> 24) as u8;
    }
    image
}

/// Re-lay a big-endian image in `order`
pub fn reorder(image: &[u8], order: ByteOrder) -> Vec<u8> {
    image
        .chunks_exact(4)
        .flat_map(|chunk| {
            let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            order.bytes(word)
        })
        .collect()
}

#[test]
fn test_lcg_image_layout() {
    let image = lcg_image();
    assert_eq!(image.len(), IMAGE_SIZE);
    assert_eq!(&image[..4], &[0x80, 0x37, 0x12, 0x40]);
    assert_eq!(&image[BOOT_CODE_START..BOOT_CODE_START + 4], &[0xba, 0x0c, 0x97, 0xc9]);
}
