//! Minimal arbitrary-width unsigned integer.
//!
//! Only what the bit assembler and its callers need: construction from limbs,
//! comparison, bit length, byte import/export and decimal/hex formatting. No
//! arithmetic beyond the small division used for decimal output.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Unsigned integer stored as little-endian `u32` limbs.
///
/// Limb `0` is least significant. Trailing zero limbs are never stored, so
/// zero has no limbs and equal values have equal representations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigUnsigned {
    limbs: Vec<u32>,
}

impl BigUnsigned {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from little-endian limbs.
    pub fn from_limbs(mut limbs: Vec<u32>) -> Self {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        Self { limbs }
    }

    /// Little-endian limbs, without trailing zeros.
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Number of bits needed to represent the value (`0` for zero).
    pub fn bit_len(&self) -> u32 {
        match self.limbs.last() {
            None => 0,
            Some(top) => (self.limbs.len() as u32 - 1) * 32 + (32 - top.leading_zeros()),
        }
    }

    /// The value as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.as_slice() {
            [] => Some(0),
            [lo] => Some(u64::from(*lo)),
            [lo, hi] => Some(u64::from(*lo) | (u64::from(*hi) << 32)),
            _ => None,
        }
    }

    /// The value as `u128`, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.limbs.len() > 4 {
            return None;
        }
        Some(
            self.limbs
                .iter()
                .rev()
                .fold(0u128, |acc, &l| (acc << 32) | u128::from(l)),
        )
    }

    /// Minimal little-endian bytes (empty for zero).
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self.limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
        while out.last() == Some(&0) {
            out.pop();
        }
        out
    }

    /// Minimal big-endian bytes (empty for zero).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = self.to_bytes_le();
        out.reverse();
        out
    }

    /// Parse little-endian bytes. Trailing zero bytes are insignificant.
    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        let limbs = bytes
            .chunks(4)
            .map(|chunk| {
                let mut word = [0u8; 4];
                word[..chunk.len()].copy_from_slice(chunk);
                u32::from_le_bytes(word)
            })
            .collect();
        Self::from_limbs(limbs)
    }

    /// Parse big-endian bytes; inverse of [`Self::to_bytes_be`].
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut le = bytes.to_vec();
        le.reverse();
        Self::from_bytes_le(&le)
    }

    fn div_rem_small(&self, divisor: u32) -> (Self, u32) {
        let mut quotient = vec![0u32; self.limbs.len()];
        let mut rem = 0u64;
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            let cur = (rem << 32) | u64::from(limb);
            quotient[i] = (cur / u64::from(divisor)) as u32;
            rem = cur % u64::from(divisor);
        }
        (Self::from_limbs(quotient), rem as u32)
    }
}

impl From<u32> for BigUnsigned {
    fn from(v: u32) -> Self {
        Self::from_limbs(vec![v])
    }
}

impl From<u64> for BigUnsigned {
    fn from(v: u64) -> Self {
        Self::from_limbs(vec![v as u32, (v >> 32) as u32])
    }
}

impl Ord for BigUnsigned {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for BigUnsigned {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigUnsigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CHUNK: u32 = 1_000_000_000;

        if self.is_zero() {
            return f.pad_integral(true, "", "0");
        }

        // Peel off base-10^9 digits, least significant first.
        let mut chunks = Vec::new();
        let mut rest = self.clone();
        while !rest.is_zero() {
            let (q, r) = rest.div_rem_small(CHUNK);
            chunks.push(r);
            rest = q;
        }

        let mut s = String::with_capacity(chunks.len() * 9);
        let mut iter = chunks.iter().rev();
        if let Some(first) = iter.next() {
            s.push_str(&first.to_string());
        }
        for chunk in iter {
            s.push_str(&format!("{chunk:09}"));
        }
        f.pad_integral(true, "", &s)
    }
}

impl fmt::LowerHex for BigUnsigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.limbs.iter().rev();
        let mut s = match iter.next() {
            None => String::from("0"),
            Some(top) => format!("{top:x}"),
        };
        for limb in iter {
            s.push_str(&format!("{limb:08x}"));
        }
        f.pad_integral(true, "0x", &s)
    }
}

/// Serialized as a decimal string; JSON numbers cannot carry arbitrary width.
impl Serialize for BigUnsigned {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zero_limbs_are_dropped() {
        let a = BigUnsigned::from_limbs(vec![5, 0, 0]);
        assert_eq!(a.limbs(), &[5]);
        assert_eq!(a, BigUnsigned::from(5u32));
        assert!(BigUnsigned::from_limbs(vec![0, 0]).is_zero());
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(BigUnsigned::zero().bit_len(), 0);
        assert_eq!(BigUnsigned::from(1u32).bit_len(), 1);
        assert_eq!(BigUnsigned::from(u32::MAX).bit_len(), 32);
        assert_eq!(BigUnsigned::from(1u64 << 32).bit_len(), 33);
        assert_eq!(BigUnsigned::from_limbs(vec![0, 0, 0x8000_0000]).bit_len(), 96);
    }

    #[test]
    fn test_decimal_display_matches_u64() {
        for v in [0u64, 7, 999_999_999, 1_000_000_000, u64::from(u32::MAX) + 1, u64::MAX] {
            assert_eq!(BigUnsigned::from(v).to_string(), v.to_string());
        }
        // 2^96
        let big = BigUnsigned::from_limbs(vec![0, 0, 0, 1]);
        assert_eq!(big.to_string(), "79228162514264337593543950336");
    }

    #[test]
    fn test_hex_display() {
        let v = BigUnsigned::from_limbs(vec![0x1, 0xabc]);
        assert_eq!(format!("{v:x}"), "abc00000001");
        assert_eq!(format!("{v:#x}"), "0xabc00000001");
        assert_eq!(format!("{:x}", BigUnsigned::zero()), "0");
    }

    #[test]
    fn test_ordering_by_magnitude() {
        let small = BigUnsigned::from(u64::MAX);
        let large = BigUnsigned::from_limbs(vec![0, 0, 1]);
        assert!(small < large);
        assert!(BigUnsigned::from(3u32) < BigUnsigned::from(4u32));
        assert!(BigUnsigned::from_limbs(vec![9, 1]) > BigUnsigned::from_limbs(vec![10, 0]));
    }

    #[test]
    fn test_byte_export() {
        let v = BigUnsigned::from(0x0102_0304_0506u64);
        assert_eq!(v.to_bytes_be(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(v.to_bytes_le(), vec![6, 5, 4, 3, 2, 1]);
        assert!(BigUnsigned::zero().to_bytes_be().is_empty());
    }

    #[test]
    fn test_from_bytes() {
        let v = BigUnsigned::from_bytes_be(&[0, 0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(v, BigUnsigned::from(0x0102_0304_0506u64));
        assert_eq!(v.to_bytes_be(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(BigUnsigned::from_bytes_le(&[6, 5, 4, 3, 2, 1, 0]), v);
        assert!(BigUnsigned::from_bytes_be(&[]).is_zero());
        assert!(BigUnsigned::from_bytes_le(&[0, 0, 0, 0, 0]).is_zero());

        // Nine bytes spill into a third limb.
        let wide = BigUnsigned::from_bytes_be(&[0x80, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(wide.limbs(), &[1, 0, 0x80]);
        assert_eq!(wide.bit_len(), 72);
    }

    #[test]
    fn test_to_u64_bounds() {
        assert_eq!(BigUnsigned::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(BigUnsigned::from_limbs(vec![0, 0, 1]).to_u64(), None);
        assert_eq!(BigUnsigned::from_limbs(vec![0, 0, 1]).to_u128(), Some(1u128 << 64));
        assert_eq!(BigUnsigned::from_limbs(vec![0, 0, 0, 0, 1]).to_u128(), None);
    }
}
