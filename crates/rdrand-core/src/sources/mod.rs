//! Entropy source implementations.

pub mod hardware;
pub mod mock;

use crate::platform::Capabilities;
use crate::source::EntropySource;

pub use hardware::{RdRand, RdSeed};

/// Hardware source constructors for the given capabilities.
pub fn all_sources(caps: &Capabilities) -> Vec<Box<dyn EntropySource>> {
    vec![Box::new(RdRand::new(caps)), Box::new(RdSeed::new(caps))]
}

/// Sources whose instruction is present on this machine.
pub fn detect_available_sources() -> Vec<Box<dyn EntropySource>> {
    all_sources(&Capabilities::detect())
        .into_iter()
        .filter(|s| s.supports())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Instruction;

    #[test]
    fn test_all_sources_covers_both_instructions() {
        let names: Vec<Instruction> = all_sources(&Capabilities::all())
            .iter()
            .map(|s| s.instruction())
            .collect();
        assert_eq!(names, [Instruction::RdRand, Instruction::RdSeed]);
    }

    #[test]
    fn test_injected_absence_disables_every_source() {
        assert!(
            all_sources(&Capabilities::none())
                .iter()
                .all(|s| !s.supports())
        );
    }

    #[test]
    fn test_detected_sources_are_usable() {
        for source in detect_available_sources() {
            assert!(source.supports(), "{} listed but unsupported", source.instruction());
        }
    }
}
