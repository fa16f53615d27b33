//! Arbitrary-width unsigned integers from 32-bit hardware words.
//!
//! A `k`-bit value takes `ceil(k / 32)` independent draws. Words are placed in
//! little-endian limb order on every host: the first word drawn is the least
//! significant limb. Every limb keeps its full 32 bits except the most
//! significant one, which keeps only the top bits of its word that the
//! remaining budget allows.

use crate::biguint::BigUnsigned;
use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::source::EntropySource;

/// Width of one entropy word used for bit assembly.
pub const WORD_BITS: u32 = 32;

/// Keep the `bits` most significant bits of `word`, shifted down.
pub fn keep_top_bits(word: u32, bits: u32) -> u32 {
    match bits {
        0 => 0,
        b if b >= WORD_BITS => word,
        b => word >> (WORD_BITS - b),
    }
}

/// Uniform integer in `[0, 2^k)`.
///
/// `k == 0` returns zero without drawing. On any failed draw the words drawn
/// so far are discarded and the error is returned.
pub fn random_bits<S>(source: &S, policy: &RetryPolicy, k: u32) -> Result<BigUnsigned>
where
    S: EntropySource + ?Sized,
{
    if k == 0 {
        return Ok(BigUnsigned::zero());
    }

    let words = k.div_ceil(WORD_BITS) as usize;
    let mut limbs = Vec::with_capacity(words);
    let mut remaining = k;
    for _ in 0..words {
        let word = policy.word_u32(source)?;
        limbs.push(keep_top_bits(word, remaining));
        remaining = remaining.saturating_sub(WORD_BITS);
    }
    Ok(BigUnsigned::from_limbs(limbs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::Instruction;
    use crate::sources::mock::{FailingSource, ScriptedSource, SeededSource};

    #[test]
    fn test_keep_top_bits() {
        assert_eq!(keep_top_bits(0xDEAD_BEEF, 0), 0);
        assert_eq!(keep_top_bits(0xDEAD_BEEF, 4), 0xD);
        assert_eq!(keep_top_bits(0xDEAD_BEEF, 16), 0xDEAD);
        assert_eq!(keep_top_bits(0xDEAD_BEEF, 32), 0xDEAD_BEEF);
        assert_eq!(keep_top_bits(0xDEAD_BEEF, 40), 0xDEAD_BEEF);
    }

    #[test]
    fn test_zero_bits_draws_nothing() {
        let src = FailingSource::new();
        let v = random_bits(&src, &RetryPolicy::default(), 0).unwrap();
        assert!(v.is_zero());
        assert_eq!(src.draws(), 0);
    }

    #[test]
    fn test_single_word_keeps_top_bits() {
        let src = ScriptedSource::words([0xF000_0001]);
        let v = random_bits(&src, &RetryPolicy::default(), 4).unwrap();
        assert_eq!(v.to_u64(), Some(0xF));
        assert_eq!(src.draws(), 1);
    }

    #[test]
    fn test_words_are_little_endian() {
        // 72 bits: two full limbs then 8 bits from the third word.
        let src = ScriptedSource::words([0x1111_1111, 0x2222_2222, 0xAB00_0000]);
        let v = random_bits(&src, &RetryPolicy::default(), 72).unwrap();
        assert_eq!(v.limbs(), &[0x1111_1111, 0x2222_2222, 0xAB]);
        assert_eq!(format!("{v:x}"), "ab2222222211111111");
        assert_eq!(src.draws(), 3);
    }

    #[test]
    fn test_exact_multiple_of_word_width() {
        let src = ScriptedSource::words([u64::from(u32::MAX), u64::from(u32::MAX)]);
        let v = random_bits(&src, &RetryPolicy::default(), 64).unwrap();
        assert_eq!(v.to_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_failure_mid_assembly_discards_partial_words() {
        // One good word, then nothing but underflow.
        let src = ScriptedSource::new([Some(5)]);
        let err = random_bits(&src, &RetryPolicy::new(3), 64).unwrap_err();
        assert_eq!(
            err,
            Error::Exhausted {
                instruction: Instruction::RdRand,
                attempts: 3
            }
        );
        assert_eq!(src.draws(), 1 + 3);
    }

    #[test]
    fn test_bit_length_never_exceeds_k() {
        let src = SeededSource::new(7);
        let policy = RetryPolicy::default();
        for k in 0..=256 {
            for _ in 0..4 {
                let v = random_bits(&src, &policy, k).unwrap();
                assert!(v.bit_len() <= k, "k={k} produced {} bits", v.bit_len());
            }
        }
    }
}
