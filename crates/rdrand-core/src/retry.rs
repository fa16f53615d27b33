//! Bounded retry around single hardware draws.
//!
//! RDRAND and RDSEED may report an empty buffer on any given cycle. A
//! [`RetryPolicy`] re-issues the draw up to `max_attempts` times and turns the
//! result into a [`RetryOutcome`]. It never loops without bound and never
//! substitutes a software value.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::source::{EntropySource, Instruction};

/// Attempts per draw unless configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Outcome of one bounded-retry draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum RetryOutcome<W> {
    Success(W),
    /// Every attempt returned `None`.
    Exhausted,
    /// The source reported no hardware support; nothing was attempted.
    Unsupported,
}

impl<W> RetryOutcome<W> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Transform the drawn word, keeping failures as they are.
    pub fn map<U>(self, f: impl FnOnce(W) -> U) -> RetryOutcome<U> {
        match self {
            Self::Success(word) => RetryOutcome::Success(f(word)),
            Self::Exhausted => RetryOutcome::Exhausted,
            Self::Unsupported => RetryOutcome::Unsupported,
        }
    }

    /// Convert to a `Result`, naming the instruction and budget on failure.
    pub fn into_result(self, instruction: Instruction, attempts: u32) -> Result<W> {
        match self {
            Self::Success(word) => Ok(word),
            Self::Exhausted => Err(Error::Exhausted {
                instruction,
                attempts,
            }),
            Self::Unsupported => Err(Error::Unsupported { instruction }),
        }
    }
}

/// How many times a single draw may be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// A policy allowing `max_attempts` draws. Zero is raised to one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw one 64-bit word.
    pub fn draw_u64<S: EntropySource + ?Sized>(&self, source: &S) -> RetryOutcome<u64> {
        self.run(source, || source.try_draw_u64())
    }

    /// Draw one 32-bit word.
    pub fn draw_u32<S: EntropySource + ?Sized>(&self, source: &S) -> RetryOutcome<u32> {
        self.run(source, || source.try_draw_u32())
    }

    /// [`Self::draw_u64`] as a `Result`.
    pub fn word_u64<S: EntropySource + ?Sized>(&self, source: &S) -> Result<u64> {
        self.draw_u64(source)
            .into_result(source.instruction(), self.max_attempts)
    }

    /// [`Self::draw_u32`] as a `Result`.
    pub fn word_u32<S: EntropySource + ?Sized>(&self, source: &S) -> Result<u32> {
        self.draw_u32(source)
            .into_result(source.instruction(), self.max_attempts)
    }

    fn run<S, W>(&self, source: &S, mut attempt: impl FnMut() -> Option<W>) -> RetryOutcome<W>
    where
        S: EntropySource + ?Sized,
    {
        let instruction = source.instruction();
        if !source.supports() {
            log::debug!("{instruction} unsupported, refusing to draw");
            return RetryOutcome::Unsupported;
        }

        for n in 1..=self.max_attempts {
            if let Some(word) = attempt() {
                return RetryOutcome::Success(word);
            }
            log::trace!("{instruction} underflow on attempt {n}/{}", self.max_attempts);
        }

        log::debug!(
            "{instruction} exhausted after {} attempt(s)",
            self.max_attempts
        );
        RetryOutcome::Exhausted
    }
}
