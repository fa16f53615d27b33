//! RDRAND and RDSEED sources.
//!
//! Each source captures its capability bit once at construction, so
//! [`EntropySource::supports`] never re-runs CPUID. A capability passed in as
//! present is still confirmed against CPUID: executing the instruction on a
//! CPU without it raises `#UD`.

use crate::platform::{self, Capabilities};
use crate::retry::{RetryOutcome, RetryPolicy};
use crate::source::{EntropySource, Instruction};

/// RDRAND: output of the on-chip DRBG.
#[derive(Debug, Clone, Copy)]
pub struct RdRand {
    supported: bool,
}

impl RdRand {
    pub fn new(caps: &Capabilities) -> Self {
        Self {
            supported: caps.rdrand && platform::rdrand_supported(),
        }
    }

    /// Construct from a fresh CPUID query.
    pub fn detect() -> Self {
        Self::new(&Capabilities::detect())
    }
}

impl EntropySource for RdRand {
    fn instruction(&self) -> Instruction {
        Instruction::RdRand
    }

    fn supports(&self) -> bool {
        self.supported
    }

    fn try_draw_u64(&self) -> Option<u64> {
        if !self.supported {
            return None;
        }
        // SAFETY: `supported` is only true when CPUID reports RDRAND.
        unsafe { arch::rdrand64() }
    }

    fn try_draw_u32(&self) -> Option<u32> {
        if !self.supported {
            return None;
        }
        // SAFETY: as above.
        unsafe { arch::rdrand32() }
    }
}

/// RDSEED: conditioned output of the on-chip entropy source.
///
/// Underflows far more often than RDRAND under load.
#[derive(Debug, Clone, Copy)]
pub struct RdSeed {
    supported: bool,
}

impl RdSeed {
    pub fn new(caps: &Capabilities) -> Self {
        Self {
            supported: caps.rdseed && platform::rdseed_supported(),
        }
    }

    pub fn detect() -> Self {
        Self::new(&Capabilities::detect())
    }
}

impl EntropySource for RdSeed {
    fn instruction(&self) -> Instruction {
        Instruction::RdSeed
    }

    fn supports(&self) -> bool {
        self.supported
    }

    fn try_draw_u64(&self) -> Option<u64> {
        if !self.supported {
            return None;
        }
        // SAFETY: `supported` is only true when CPUID reports RDSEED.
        unsafe { arch::rdseed64() }
    }

    fn try_draw_u32(&self) -> Option<u32> {
        if !self.supported {
            return None;
        }
        // SAFETY: as above.
        unsafe { arch::rdseed32() }
    }
}

// ---------------------------------------------------------------------------
// Raw draws over detected hardware
// ---------------------------------------------------------------------------

/// One 64-bit RDRAND word with up to `max_attempts` tries.
pub fn draw_word_rdrand(max_attempts: u32) -> RetryOutcome<u64> {
    RetryPolicy::new(max_attempts).draw_u64(&RdRand::detect())
}

/// One 64-bit RDSEED word with up to `max_attempts` tries.
pub fn draw_word_rdseed(max_attempts: u32) -> RetryOutcome<u64> {
    RetryPolicy::new(max_attempts).draw_u64(&RdSeed::detect())
}

/// One 32-bit RDRAND word with up to `max_attempts` tries.
pub fn draw_word_rdrand32(max_attempts: u32) -> RetryOutcome<u32> {
    RetryPolicy::new(max_attempts).draw_u32(&RdRand::detect())
}

/// One 32-bit RDSEED word with up to `max_attempts` tries.
pub fn draw_word_rdseed32(max_attempts: u32) -> RetryOutcome<u32> {
    RetryPolicy::new(max_attempts).draw_u32(&RdSeed::detect())
}

// ---------------------------------------------------------------------------
// Instruction wrappers
// ---------------------------------------------------------------------------

// Intrinsic calls are safe inside `#[target_feature]` fns from Rust 1.86 on,
// but 1.85 still needs the inner blocks.
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod arch {
    use std::arch::x86_64::{_rdrand32_step, _rdrand64_step, _rdseed32_step, _rdseed64_step};

    #[target_feature(enable = "rdrand")]
    pub unsafe fn rdrand64() -> Option<u64> {
        let mut v = 0u64;
        // SAFETY: caller guarantees the feature is present.
        (unsafe { _rdrand64_step(&mut v) } == 1).then_some(v)
    }

    #[target_feature(enable = "rdrand")]
    pub unsafe fn rdrand32() -> Option<u32> {
        let mut v = 0u32;
        // SAFETY: caller guarantees the feature is present.
        (unsafe { _rdrand32_step(&mut v) } == 1).then_some(v)
    }

    #[target_feature(enable = "rdseed")]
    pub unsafe fn rdseed64() -> Option<u64> {
        let mut v = 0u64;
        // SAFETY: caller guarantees the feature is present.
        (unsafe { _rdseed64_step(&mut v) } == 1).then_some(v)
    }

    #[target_feature(enable = "rdseed")]
    pub unsafe fn rdseed32() -> Option<u32> {
        let mut v = 0u32;
        // SAFETY: caller guarantees the feature is present.
        (unsafe { _rdseed32_step(&mut v) } == 1).then_some(v)
    }
}

#[cfg(not(target_arch = "x86_64"))]
mod arch {
    pub unsafe fn rdrand64() -> Option<u64> {
        None
    }

    pub unsafe fn rdrand32() -> Option<u32> {
        None
    }

    pub unsafe fn rdseed64() -> Option<u64> {
        None
    }

    pub unsafe fn rdseed32() -> Option<u32> {
        None
    }
}
