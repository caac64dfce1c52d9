//! Byte order detection from the header magic
//!
//! Every N64 image starts with the PI domain configuration word
//! `0x80371240`. Depending on how the dump was produced those four bytes
//! show up in one of three layouts.

use super::ByteOrder;

/// The header word as it appears in a big-endian image
pub const HEADER_MAGIC: u32 = 0x8037_1240;

/// Outcome of looking at the first header word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub order: ByteOrder,
    /// `false` when the magic was not recognized and `order` is the fallback
    pub recognized: bool,
}

/// Work out the byte order of an image from its first four bytes.
///
/// Unknown or missing magic falls back to big-endian with
/// `recognized == false` and a logged warning.
pub fn detect_byte_order(image: &[u8]) -> Detection {
    let found = image.get(..4).and_then(|head| {
        let head: [u8; 4] = head.try_into().ok()?;
        ByteOrder::ALL
            .into_iter()
            .find(|order| order.bytes(HEADER_MAGIC) == head)
    });

    match found {
        Some(order) => {
            log::debug!("header magic identifies a {} image", order);
            Detection {
                order,
                recognized: true,
            }
        }
        None => {
            log::warn!(
                "could not recognize byte order (header {:02x?}), using {}",
                image.get(..4).unwrap_or(image),
                ByteOrder::BigEndian
            );
            Detection {
                order: ByteOrder::BigEndian,
                recognized: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_known_layouts() {
        let cases = [
            ([0x80, 0x37, 0x12, 0x40], ByteOrder::BigEndian),
            ([0x37, 0x80, 0x40, 0x12], ByteOrder::ByteSwapped),
            ([0x40, 0x12, 0x37, 0x80], ByteOrder::LittleEndian),
        ];
        for (head, order) in cases {
            assert_eq!(
                detect_byte_order(&head),
                Detection {
                    order,
                    recognized: true
                }
            );
        }
    }

    #[test]
    fn test_detect_matches_host_order_words() {
        // The classic tool compares the header read as a little-endian word.
        assert_eq!(
            detect_byte_order(&0x4012_3780u32.to_le_bytes()).order,
            ByteOrder::BigEndian
        );
        assert_eq!(
            detect_byte_order(&0x1240_8037u32.to_le_bytes()).order,
            ByteOrder::ByteSwapped
        );
        assert_eq!(
            detect_byte_order(&0x8037_1240u32.to_le_bytes()).order,
            ByteOrder::LittleEndian
        );
    }

    #[test]
    fn test_detect_unknown_falls_back() {
        let fallback = Detection {
            order: ByteOrder::BigEndian,
            recognized: false,
        };
        assert_eq!(detect_byte_order(&[0, 0, 0, 0]), fallback);
        assert_eq!(detect_byte_order(&[0x80, 0x37]), fallback);
        assert_eq!(detect_byte_order(&[]), fallback);
    }
}
