//! Known CIC variants
//!
//! Each CIC chip hands the PIF a seed and expects a specific checksum of
//! the boot code it shipped with. Identifying a ROM's CIC is a matter of
//! computing the checksum under every known seed and looking for a hit.

use crate::checksum::{Checksum, compute};
use crate::common::ChecksumError;
use crate::source::WordSource;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CicVariant {
    /// Star Fox 64 and a handful of early titles
    Cic6101,
    /// Also sold as 7101; the most common chip
    Cic6102,
    /// Lylat Wars (PAL)
    Cic7102,
    /// 6103 / 7103
    CicX103,
    /// 6105 / 7105
    CicX105,
    /// 6106 / 7106
    CicX106,
}

impl CicVariant {
    pub const ALL: [CicVariant; 6] = [
        CicVariant::Cic6101,
        CicVariant::Cic6102,
        CicVariant::Cic7102,
        CicVariant::CicX103,
        CicVariant::CicX105,
        CicVariant::CicX106,
    ];

    pub fn seed(self) -> u32 {
        match self {
            CicVariant::Cic6101 | CicVariant::Cic6102 | CicVariant::Cic7102 => 0x3f,
            CicVariant::CicX103 => 0x78,
            CicVariant::CicX105 => 0x91,
            CicVariant::CicX106 => 0x85,
        }
    }

    /// Checksum of the genuine boot code for this chip
    pub fn expected_checksum(self) -> Checksum {
        match self {
            CicVariant::Cic6101 => Checksum::from_parts(0x45CC, 0x73EE317A),
            CicVariant::Cic6102 => Checksum::from_parts(0xA536, 0xC0F1D859),
            CicVariant::Cic7102 => Checksum::from_parts(0x4416, 0x0EC5D9AF),
            CicVariant::CicX103 => Checksum::from_parts(0x586F, 0xD4709867),
            CicVariant::CicX105 => Checksum::from_parts(0x8618, 0xA45BC2D3),
            CicVariant::CicX106 => Checksum::from_parts(0x2BBA, 0xD4E6EB74),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CicVariant::Cic6101 => "CIC-6101",
            CicVariant::Cic6102 => "CIC-6102/7101",
            CicVariant::Cic7102 => "CIC-7102",
            CicVariant::CicX103 => "CIC-6103/7103",
            CicVariant::CicX105 => "CIC-6105/7105",
            CicVariant::CicX106 => "CIC-6106/7106",
        }
    }

    /// Find the variant whose expected checksum matches `source`.
    pub fn identify<S: WordSource>(source: S) -> Option<CicVariant> {
        let mut computed: Vec<(u32, Checksum)> = Vec::with_capacity(4);

        for variant in Self::ALL {
            let seed = variant.seed();
            let checksum = match computed.iter().find(|(s, _)| *s == seed) {
                Some(&(_, checksum)) => checksum,
                None => {
                    let checksum = compute(seed, &source);
                    computed.push((seed, checksum));
                    checksum
                }
            };

            if checksum == variant.expected_checksum() {
                log::debug!("boot code matches {}", variant);
                return Some(variant);
            }
        }

        log::debug!("boot code matches no known CIC");
        None
    }
}

impl fmt::Display for CicVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CicVariant {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = lower
            .strip_prefix("cic-")
            .or_else(|| lower.strip_prefix("cic"))
            .unwrap_or(&lower);

        match key {
            "6101" => Ok(CicVariant::Cic6101),
            "6102" | "7101" => Ok(CicVariant::Cic6102),
            "7102" => Ok(CicVariant::Cic7102),
            "6103" | "7103" | "x103" => Ok(CicVariant::CicX103),
            "6105" | "7105" | "x105" => Ok(CicVariant::CicX105),
            "6106" | "7106" | "x106" => Ok(CicVariant::CicX106),
            _ => Err(ChecksumError::invalid_seed(s, "unknown CIC variant")),
        }
    }
}
