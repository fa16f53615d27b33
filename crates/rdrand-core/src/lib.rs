//! # rdrand-core
//!
//! **Hardware random numbers from RDRAND and RDSEED, with typed failures.**
//!
//! `rdrand-core` draws raw words from the x86 random-number instructions,
//! retries transient underflow a bounded number of times, and builds three
//! primitives on top: arbitrary-width unsigned integers, single bounded
//! integers, and non-repeating sequences of bounded integers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rdrand_core::{Bound, Capabilities, Drng};
//!
//! // Query CPUID once, then pass the result explicitly.
//! let caps = Capabilities::detect();
//! caps.require_all().expect("RDRAND/RDSEED not supported");
//!
//! let drng = Drng::rdrand(&caps);
//! let wide = drng.random_bits(256).unwrap();
//! let die = drng.uniform_upto(5).unwrap() + 1;
//! let lottery = drng.sample_distinct(6, Bound::Boundary(49)).unwrap();
//! println!("{wide:x} {die} {:?}", lottery.values());
//! ```
//!
//! ## Architecture
//!
//! EntropySource → RetryPolicy → (BitAssembler | BoundedSampler → DistinctSequenceSampler)
//!
//! - [`source`]: the [`EntropySource`] trait; [`sources`] holds RDRAND, RDSEED
//!   and test doubles.
//! - [`retry`]: bounded retry, default [`DEFAULT_MAX_ATTEMPTS`] attempts per draw.
//! - [`bits`]: `k`-bit integers from 32-bit words.
//! - [`bounded`]: one integer in `[0, N)` or `[0, N]` by signed modulo
//!   reduction (documented modulo bias).
//! - [`sequence`]: pairwise-distinct samples and batches of them.
//! - [`Drng`]: façade that ties one source to one policy, plus the helpers in
//!   [`rands`].
//!
//! Nothing here terminates the process or falls back to software randomness.
//! Every failure is an [`Error`] for the caller to act on.

pub mod biguint;
pub mod bits;
pub mod bounded;
pub mod drng;
pub mod error;
pub mod platform;
pub mod rands;
pub mod retry;
pub mod sequence;
pub mod source;
pub mod sources;

pub use biguint::BigUnsigned;
pub use bounded::{branchless_abs, plain_abs};
pub use drng::Drng;
pub use error::{Error, Result};
pub use platform::{Capabilities, PlatformInfo, platform_info, rdrand_supported, rdseed_supported};
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryOutcome, RetryPolicy};
pub use sequence::{Bound, DEFAULT_BOUNDARY, SampleBatch, SampleSet};
pub use source::{EntropySource, Instruction};
pub use sources::hardware::{
    draw_word_rdrand, draw_word_rdrand32, draw_word_rdseed, draw_word_rdseed32,
};
pub use sources::{RdRand, RdSeed, detect_available_sources};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
