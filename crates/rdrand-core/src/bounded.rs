//! Single bounded integers by signed modulo reduction.
//!
//! One 64-bit word is drawn; its low 32 bits are reinterpreted as a signed
//! integer, reduced modulo the range size, and folded back to non-negative
//! with [`branchless_abs`]. Negative and positive remainders of equal
//! magnitude land on the same value, so every residue is reached from both
//! halves of the signed range.
//!
//! # Modulo bias
//!
//! The two signed halves fold separately. Non-negative words cover
//! magnitudes `0..2^31`, while negative words cover `1..=2^31`. Each half hits
//! some residues of `m` one extra time, so out of `2^32` words a residue is
//! drawn at most two times more often than another. For `m = 3`, residue 1
//! gets two extra hits and residues 0 and 2 one each. The relative bias is
//! therefore below `m / 2^31`, which for `m ≤ 2^16` means below `2^-15`.
//! This bias is accepted. Callers needing strict uniformity should use
//! [`crate::Drng::randbelow`], which rejects out-of-range candidates.

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::source::EntropySource;

/// `|value|` via arithmetic shift and XOR, without a branch.
///
/// `i32::MIN` maps to `2^31`.
#[inline]
pub fn branchless_abs(value: i32) -> u32 {
    let mask = value >> (i32::BITS - 1);
    (value.wrapping_add(mask) ^ mask) as u32
}

/// Reference `|value|` with an ordinary branch. Agrees with [`branchless_abs`]
/// on every input.
#[inline]
pub fn plain_abs(value: i32) -> u32 {
    if value < 0 {
        0u32.wrapping_sub(value as u32)
    } else {
        value as u32
    }
}

/// Reduce the low 32 bits of `word`, read as signed, into `[0, modulus)`.
///
/// `modulus` must lie in `1..=2^31`.
pub fn reduce_signed(word: u64, modulus: u32) -> u32 {
    debug_assert!((1..=1 << 31).contains(&modulus));
    let signed = word as u32 as i32;
    // |rem| < modulus <= 2^31, so it fits back into i32.
    let rem = (i64::from(signed) % i64::from(modulus)) as i32;
    branchless_abs(rem)
}

/// Value in `[0, exclusive_bound)`. The bound must be at least 1.
pub fn uniform_below<S>(source: &S, policy: &RetryPolicy, exclusive_bound: i32) -> Result<i32>
where
    S: EntropySource + ?Sized,
{
    if exclusive_bound < 1 {
        return Err(Error::InvalidBound {
            bound: i64::from(exclusive_bound),
        });
    }
    let word = policy.word_u64(source)?;
    Ok(reduce_signed(word, exclusive_bound as u32) as i32)
}

/// Value in `[0, inclusive_bound]`. The bound must be non-negative.
pub fn uniform_upto<S>(source: &S, policy: &RetryPolicy, inclusive_bound: i32) -> Result<i32>
where
    S: EntropySource + ?Sized,
{
    if inclusive_bound < 0 {
        return Err(Error::InvalidBound {
            bound: i64::from(inclusive_bound),
        });
    }
    let word = policy.word_u64(source)?;
    Ok(reduce_signed(word, inclusive_bound as u32 + 1) as i32)
}
