//! Convenience samplers built on [`Drng`]: floats, exact ranges, bytes,
//! choice and shuffle.
//!
//! Unlike [`Drng::uniform_below`], the integer helpers here are free of modulo
//! bias: they draw `bit_length(n)` bits and reject candidates `>= n`. Each
//! candidate is accepted with probability above one half, so the expected
//! number of rounds is below two.

use crate::drng::Drng;
use crate::error::{Error, Result};
use crate::source::EntropySource;

/// `2^-53`
const INV_2_53: f64 = 1.0 / 9_007_199_254_740_992.0;

impl<S: EntropySource> Drng<S> {
    /// Uniform float in `[0, 1)` from the top 53 bits of one 64-bit word.
    pub fn real64(&self) -> Result<f64> {
        let word = self.draw_u64()?;
        Ok((word >> 11) as f64 * INV_2_53)
    }

    /// Float in `[0, 1]` from one 32-bit word.
    pub fn real32(&self) -> Result<f64> {
        let word = self.draw_u32()?;
        Ok(f64::from(word) / f64::from(u32::MAX))
    }

    /// Float in `[0, 1)` with 53-bit resolution from two 32-bit words.
    pub fn res53(&self) -> Result<f64> {
        let a = self.draw_u32()? >> 5;
        let b = self.draw_u32()? >> 6;
        Ok((f64::from(a) * 67_108_864.0 + f64::from(b)) * INV_2_53)
    }

    /// Exactly uniform value in `[0, n)`. `n == 0` is an invalid bound.
    pub fn randbelow(&self, n: u64) -> Result<u64> {
        self.ensure_supported()?;
        if n == 0 {
            return Err(Error::InvalidBound { bound: 0 });
        }
        // n < 2^64, so the value always fits back in u64.
        Ok(self.below_wide(u128::from(n))? as u64)
    }

    /// Random element of `range(start, stop, step)`.
    pub fn randrange(&self, start: i64, stop: i64, step: i64) -> Result<i64> {
        self.ensure_supported()?;
        let n = range_len(i128::from(start), i128::from(stop), i128::from(step))?;
        let r = self.below_wide(n)?;
        // The true result lies between start and stop, so the wrapped sum is exact.
        Ok(start.wrapping_add(step.wrapping_mul(r as u64 as i64)))
    }

    /// Random integer in `[a, b]`, both ends included.
    pub fn randint(&self, a: i64, b: i64) -> Result<i64> {
        self.ensure_supported()?;
        let n = range_len(i128::from(a), i128::from(b) + 1, 1)?;
        let r = self.below_wide(n)?;
        Ok(a.wrapping_add(r as u64 as i64))
    }

    /// Exactly `n` random bytes.
    pub fn randbytes(&self, n: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; n];
        self.fill_bytes(&mut out)?;
        Ok(out)
    }

    /// Random element of a non-empty slice.
    pub fn choice<'a, T>(&self, items: &'a [T]) -> Result<&'a T> {
        self.ensure_supported()?;
        if items.is_empty() {
            return Err(Error::EmptySequence);
        }
        let idx = self.randbelow(items.len() as u64)? as usize;
        Ok(&items[idx])
    }

    /// Fisher–Yates shuffle in place. On error the slice is partly shuffled.
    pub fn shuffle<T>(&self, items: &mut [T]) -> Result<()> {
        self.ensure_supported()?;
        for i in (1..items.len()).rev() {
            let j = self.randbelow(i as u64 + 1)? as usize;
            items.swap(i, j);
        }
        Ok(())
    }

    /// Rejection sampling over `[0, n)` for `1 <= n <= 2^64`.
    fn below_wide(&self, n: u128) -> Result<u128> {
        let k = u128::BITS - (n - 1).leading_zeros();
        loop {
            let candidate = self.random_bits(k)?.to_u128().unwrap_or(u128::MAX);
            if candidate < n {
                return Ok(candidate);
            }
        }
    }
}

/// Number of values in `range(start, stop, step)`.
fn range_len(start: i128, stop: i128, step: i128) -> Result<u128> {
    if step == 0 {
        return Err(Error::ZeroStep);
    }
    let width = stop - start;
    let n = if step > 0 {
        floor_div(width + step - 1, step)
    } else {
        floor_div(width + step + 1, step)
    };
    if n <= 0 {
        return Err(Error::EmptyRange);
    }
    Ok(n as u128)
}

fn floor_div(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::{FailingSource, ScriptedSource, SeededSource, UnsupportedSource};
    use std::collections::HashSet;

    fn seeded(seed: u64) -> Drng<SeededSource> {
        Drng::new(SeededSource::new(seed))
    }

    #[test]
    fn test_range_len_matches_python() {
        assert_eq!(range_len(0, 10, 1), Ok(10));
        assert_eq!(range_len(0, 10, 3), Ok(4));
        assert_eq!(range_len(10, 0, -3), Ok(4));
        assert_eq!(range_len(5, 5, 1), Err(Error::EmptyRange));
        assert_eq!(range_len(0, 10, -1), Err(Error::EmptyRange));
        assert_eq!(range_len(10, 0, 2), Err(Error::EmptyRange));
        assert_eq!(range_len(0, 10, 0), Err(Error::ZeroStep));
    }

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(-12, -3), 4);
        assert_eq!(floor_div(-1, -3), 0);
    }

    #[test]
    fn test_randbelow_rejects_out_of_range() {
        // n = 5 needs 3 bits; words are reduced to their top 3 bits.
        // 0b111.. -> 7 (reject), 0b110.. -> 6 (reject), 0b010.. -> 2.
        let drng = Drng::new(ScriptedSource::words([0xE000_0000, 0xC000_0000, 0x4000_0000]));
        assert_eq!(drng.randbelow(5), Ok(2));
        assert_eq!(drng.source().draws(), 3);
    }

    #[test]
    fn test_randbelow_zero_is_invalid() {
        let drng = Drng::new(FailingSource::new());
        assert_eq!(drng.randbelow(0), Err(Error::InvalidBound { bound: 0 }));
        assert_eq!(drng.source().draws(), 0);
    }

    #[test]
    fn test_randbelow_one_and_max() {
        let drng = seeded(21);
        assert_eq!(drng.randbelow(1), Ok(0));
        for _ in 0..100 {
            assert!(drng.randbelow(u64::MAX).unwrap() < u64::MAX);
        }
    }

    #[test]
    fn test_randrange_respects_step() {
        let drng = seeded(22);
        for _ in 0..500 {
            let v = drng.randrange(10, 0, -3).unwrap();
            assert!([10, 7, 4, 1].contains(&v), "got {v}");
            let w = drng.randrange(-5, 5, 2).unwrap();
            assert!([-5, -3, -1, 1, 3].contains(&w), "got {w}");
        }
    }

    #[test]
    fn test_randint_is_inclusive_and_covers_extremes() {
        let drng = seeded(23);
        let seen: HashSet<i64> = (0..500).map(|_| drng.randint(-2, 2).unwrap()).collect();
        assert_eq!(seen, (-2..=2).collect());
        // Full i64 span must not overflow.
        drng.randint(i64::MIN, i64::MAX).unwrap();
        assert_eq!(drng.randint(i64::MAX, i64::MAX), Ok(i64::MAX));
        assert_eq!(drng.randint(3, 2), Err(Error::EmptyRange));
    }

    #[test]
    fn test_randbytes_exact_length() {
        let drng = seeded(24);
        for n in [0, 1, 7, 8, 9, 33] {
            assert_eq!(drng.randbytes(n).unwrap().len(), n);
        }
    }

    #[test]
    fn test_floats_in_unit_interval() {
        let drng = seeded(25);
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&drng.real64().unwrap()));
            assert!((0.0..=1.0).contains(&drng.real32().unwrap()));
            assert!((0.0..1.0).contains(&drng.res53().unwrap()));
        }
    }

    #[test]
    fn test_real_extremes() {
        let drng = Drng::new(ScriptedSource::words([u64::MAX, 0, u64::from(u32::MAX)]));
        assert!(drng.real64().unwrap() < 1.0);
        assert_eq!(drng.real32(), Ok(0.0));
        assert_eq!(drng.real32(), Ok(1.0));
    }

    #[test]
    fn test_choice_and_shuffle() {
        let drng = seeded(26);
        let items = ["a", "b", "c"];
        assert!(items.contains(drng.choice(&items).unwrap()));
        let empty: [u8; 0] = [];
        assert_eq!(drng.choice(&empty), Err(Error::EmptySequence));

        let mut deck: Vec<u32> = (0..52).collect();
        drng.shuffle(&mut deck).unwrap();
        let mut sorted = deck.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<_>>());
        assert_ne!(deck, sorted);
    }

    #[test]
    fn test_helpers_refuse_when_unsupported() {
        let drng = Drng::new(UnsupportedSource::new());
        assert!(matches!(drng.real64(), Err(Error::Unsupported { .. })));
        assert!(matches!(drng.randint(0, 1), Err(Error::Unsupported { .. })));
        assert!(matches!(drng.choice(&[1]), Err(Error::Unsupported { .. })));
        let mut v = [1, 2, 3];
        assert!(matches!(drng.shuffle(&mut v), Err(Error::Unsupported { .. })));
        assert_eq!(drng.source().draws(), 0);
    }
}
