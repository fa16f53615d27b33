//! The sampling façade.
//!
//! [`Drng`] owns one [`EntropySource`] and one [`RetryPolicy`] and exposes
//! every sampling operation as a method. Support is queried once at
//! construction; an unsupported source makes every operation return
//! [`Error::Unsupported`] before arguments are inspected or anything is drawn.

use crate::biguint::BigUnsigned;
use crate::error::{Error, Result};
use crate::platform::Capabilities;
use crate::retry::{RetryOutcome, RetryPolicy};
use crate::sequence::{Bound, SampleBatch, SampleSet};
use crate::source::{EntropySource, Instruction};
use crate::sources::{RdRand, RdSeed};
use crate::{bits, bounded, sequence};

/// Digital random number generator over a single entropy source.
pub struct Drng<S> {
    source: S,
    policy: RetryPolicy,
    supported: bool,
}

impl Drng<RdRand> {
    /// RDRAND with the default retry policy.
    pub fn rdrand(caps: &Capabilities) -> Self {
        Self::new(RdRand::new(caps))
    }
}

impl Drng<RdSeed> {
    /// RDSEED with the default retry policy.
    pub fn rdseed(caps: &Capabilities) -> Self {
        Self::new(RdSeed::new(caps))
    }
}

impl<S: EntropySource> Drng<S> {
    pub fn new(source: S) -> Self {
        Self::with_policy(source, RetryPolicy::default())
    }

    pub fn with_policy(source: S, policy: RetryPolicy) -> Self {
        let supported = source.supports();
        if !supported {
            log::debug!("{} not supported; all draws will fail", source.instruction());
        }
        Self {
            source,
            policy,
            supported,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn instruction(&self) -> Instruction {
        self.source.instruction()
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub(crate) fn ensure_supported(&self) -> Result<()> {
        if self.supported {
            Ok(())
        } else {
            Err(Error::Unsupported {
                instruction: self.instruction(),
            })
        }
    }

    /// One raw 64-bit word as a [`RetryOutcome`].
    pub fn draw_word(&self) -> RetryOutcome<u64> {
        if !self.supported {
            return RetryOutcome::Unsupported;
        }
        self.policy.draw_u64(&self.source)
    }

    /// One raw 32-bit word as a [`RetryOutcome`].
    pub fn draw_word32(&self) -> RetryOutcome<u32> {
        if !self.supported {
            return RetryOutcome::Unsupported;
        }
        self.policy.draw_u32(&self.source)
    }

    /// One raw 64-bit word.
    pub fn draw_u64(&self) -> Result<u64> {
        self.ensure_supported()?;
        self.policy.word_u64(&self.source)
    }

    /// One raw 32-bit word.
    pub fn draw_u32(&self) -> Result<u32> {
        self.ensure_supported()?;
        self.policy.word_u32(&self.source)
    }

    /// Fill `dst` from 64-bit words, little-endian within each word.
    pub fn fill_bytes(&self, dst: &mut [u8]) -> Result<()> {
        self.ensure_supported()?;
        for chunk in dst.chunks_mut(8) {
            let word = self.policy.word_u64(&self.source)?;
            chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
        }
        Ok(())
    }

    /// Uniform integer in `[0, 2^k)`. See [`crate::bits`].
    pub fn random_bits(&self, k: u32) -> Result<BigUnsigned> {
        self.ensure_supported()?;
        bits::random_bits(&self.source, &self.policy, k)
    }

    /// Value in `[0, exclusive_bound)`, with modulo bias. See [`crate::bounded`].
    pub fn uniform_below(&self, exclusive_bound: i32) -> Result<i32> {
        self.ensure_supported()?;
        bounded::uniform_below(&self.source, &self.policy, exclusive_bound)
    }

    /// Value in `[0, inclusive_bound]`, with modulo bias. See [`crate::bounded`].
    pub fn uniform_upto(&self, inclusive_bound: i32) -> Result<i32> {
        self.ensure_supported()?;
        bounded::uniform_upto(&self.source, &self.policy, inclusive_bound)
    }

    /// `length` pairwise-distinct values within `bound`.
    pub fn sample_distinct(&self, length: usize, bound: Bound) -> Result<SampleSet> {
        self.ensure_supported()?;
        sequence::sample_distinct(&self.source, &self.policy, length, bound)
    }

    /// `amount` independent [`SampleSet`]s.
    pub fn sample_batch(&self, length: usize, bound: Bound, amount: usize) -> Result<SampleBatch> {
        self.ensure_supported()?;
        sequence::sample_batch(&self.source, &self.policy, length, bound, amount)
    }
}

/// Typed-failure bridge into the `rand` ecosystem.
///
/// Use [`rand::TryRngCore::unwrap_err`] to obtain a panicking `RngCore` when
/// a `rand` API insists on one.
impl<S: EntropySource> rand::TryRngCore for Drng<S> {
    type Error = Error;

    fn try_next_u32(&mut self) -> Result<u32> {
        self.draw_u32()
    }

    fn try_next_u64(&mut self) -> Result<u64> {
        self.draw_u64()
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        self.fill_bytes(dst)
    }
}
