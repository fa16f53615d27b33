//! Abstract entropy source trait.
//!
//! Every hardware generator implements the [`EntropySource`] trait, which
//! exposes a capability check and "try once" draws. A `None` from a draw is a
//! transient underflow of the instruction's internal buffer, not an error;
//! [`crate::retry::RetryPolicy`] turns it into a definite outcome.

use serde::Serialize;

/// Hardware instruction backing an entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Instruction {
    /// DRBG output, reseeded from the on-chip conditioner.
    RdRand,
    /// Conditioned seed output straight from the on-chip entropy source.
    RdSeed,
}

impl Instruction {
    /// Lower-case identifier used by the CLI (`"rdrand"`, `"rdseed"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::RdRand => "rdrand",
            Self::RdSeed => "rdseed",
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RdRand => write!(f, "RDRAND"),
            Self::RdSeed => write!(f, "RDSEED"),
        }
    }
}

impl std::str::FromStr for Instruction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rdrand" => Ok(Self::RdRand),
            "rdseed" => Ok(Self::RdSeed),
            other => Err(format!(
                "unknown instruction '{other}'. expected one of: rdrand, rdseed"
            )),
        }
    }
}

/// Trait that every entropy source must implement.
///
/// Draws take `&self`: the instruction is stateless across calls, so a single
/// source can be shared between threads.
pub trait EntropySource: Send + Sync {
    /// Instruction this source draws from.
    fn instruction(&self) -> Instruction;

    /// Whether the instruction can be executed on this machine.
    ///
    /// Implementations must answer from a cached value; callers may ask on
    /// every draw.
    fn supports(&self) -> bool;

    /// One 64-bit draw. `None` signals a transient underflow.
    fn try_draw_u64(&self) -> Option<u64>;

    /// One 32-bit draw. `None` signals a transient underflow.
    fn try_draw_u32(&self) -> Option<u32>;
}

impl<S: EntropySource + ?Sized> EntropySource for &S {
    fn instruction(&self) -> Instruction {
        (**self).instruction()
    }

    fn supports(&self) -> bool {
        (**self).supports()
    }

    fn try_draw_u64(&self) -> Option<u64> {
        (**self).try_draw_u64()
    }

    fn try_draw_u32(&self) -> Option<u32> {
        (**self).try_draw_u32()
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn instruction(&self) -> Instruction {
        (**self).instruction()
    }

    fn supports(&self) -> bool {
        (**self).supports()
    }

    fn try_draw_u64(&self) -> Option<u64> {
        (**self).try_draw_u64()
    }

    fn try_draw_u32(&self) -> Option<u32> {
        (**self).try_draw_u32()
    }
}
