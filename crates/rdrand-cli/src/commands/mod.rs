pub mod bits;
pub mod bounded;
pub mod check;
pub mod range;
pub mod rands;
pub mod word;

use clap::error::ErrorKind;
use rdrand_core::{
    Capabilities, Drng, EntropySource, Error, Instruction, RdRand, RdSeed, RetryPolicy,
};
use serde::Serialize;

/// The generator every sampling command runs against.
pub type HostDrng = Drng<Box<dyn EntropySource>>;

/// Output mode selected by `--json`.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as JSON, or the plain-text rendering from `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) {
        if !self.json {
            println!("{}", text());
            return;
        }
        match serde_json::to_string(value) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: failed to encode JSON: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Detect capabilities once; exit if RDRAND or RDSEED is missing.
pub fn require_capabilities() -> Capabilities {
    let caps = Capabilities::detect();
    if let Err(err) = caps.require_all() {
        eprintln!("This CPU does not support the rdrand/rdseed instruction.");
        fail(err);
    }
    caps
}

/// Build a generator for `instruction` with `attempts` tries per draw.
pub fn make_drng(caps: &Capabilities, instruction: Instruction, attempts: u32) -> HostDrng {
    let source: Box<dyn EntropySource> = match instruction {
        Instruction::RdRand => Box::new(RdRand::new(caps)),
        Instruction::RdSeed => Box::new(RdSeed::new(caps)),
    };
    Drng::with_policy(source, RetryPolicy::new(attempts))
}

/// Process exit status for a core error.
///
/// Exhausted hardware gets its own status so scripts can retry later.
pub fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Exhausted { .. } => 2,
        _ => 1,
    }
}

/// Process exit status for an argument-parsing error.
///
/// Help and version requests succeed. Every usage error is 1, keeping 2 free
/// for exhausted hardware.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Report `err` and terminate.
pub fn fail(err: Error) -> ! {
    log::debug!("terminating on {err:?}");
    eprintln!("Error: {err}");
    std::process::exit(exit_code(&err))
}

/// Terminate on error instead of unwrapping.
pub trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T> OrExit<T> for rdrand_core::Result<T> {
    fn or_exit(self) -> T {
        self.unwrap_or_else(|err| fail(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let exhausted = Error::Exhausted {
            instruction: Instruction::RdSeed,
            attempts: 10,
        };
        assert_eq!(exit_code(&exhausted), 2);
        assert_eq!(
            exit_code(&Error::Unsupported {
                instruction: Instruction::RdRand
            }),
            1
        );
        assert_eq!(exit_code(&Error::InvalidLength { length: 2, limit: 1 }), 1);
    }

    #[test]
    fn test_make_drng_respects_capabilities() {
        let drng = make_drng(&Capabilities::none(), Instruction::RdSeed, 3);
        assert_eq!(drng.instruction(), Instruction::RdSeed);
        assert_eq!(drng.policy().max_attempts(), 3);
        assert!(!drng.is_supported());
    }
}
