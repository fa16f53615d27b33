//! Error taxonomy shared by every sampling operation.
//!
//! Precondition errors (`InvalidLength`, `InvalidBound`, `EmptyRange`,
//! `ZeroStep`, `EmptySequence`) are always raised before any entropy is drawn.
//! Hardware errors (`Unsupported`, `Exhausted`) are returned as values; the core
//! never terminates the process. Deciding to exit belongs to the host.

use crate::source::Instruction;

/// Errors returned by the sampling core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The CPU does not implement the instruction.
    Unsupported { instruction: Instruction },
    /// Every attempt of a bounded retry came back empty.
    Exhausted {
        instruction: Instruction,
        attempts: u32,
    },
    /// A sequence length exceeds the number of distinct values its bound allows.
    InvalidLength { length: usize, limit: usize },
    /// A bound admits no value at all.
    InvalidBound { bound: i64 },
    /// `randrange` was asked for a range containing no values.
    EmptyRange,
    /// `randrange` was given a step of zero.
    ZeroStep,
    /// `choice` was given an empty slice.
    EmptySequence,
}

impl Error {
    /// True for errors caused by the hardware rather than by the arguments.
    pub fn is_hardware(&self) -> bool {
        matches!(self, Self::Unsupported { .. } | Self::Exhausted { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported { instruction } => {
                write!(f, "{instruction} instruction not supported by this CPU")
            }
            Self::Exhausted {
                instruction,
                attempts,
            } => write!(
                f,
                "{instruction} returned no value after {attempts} attempt(s)"
            ),
            Self::InvalidLength { length, limit } => write!(
                f,
                "length {length} exceeds the {limit} distinct value(s) available; \
                 values are never repeated"
            ),
            Self::InvalidBound { bound } => {
                write!(f, "bound {bound} admits no value")
            }
            Self::EmptyRange => write!(f, "empty range for randrange()"),
            Self::ZeroStep => write!(f, "zero step for randrange()"),
            Self::EmptySequence => write!(f, "cannot choose from an empty sequence"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
