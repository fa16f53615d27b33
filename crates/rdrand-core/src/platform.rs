//! Platform detection and capability discovery.
//!
//! CPUID is queried once into a [`Capabilities`] value which is then passed
//! explicitly to the hardware sources. Tests construct `Capabilities` by hand
//! to exercise both the supported and unsupported paths.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::source::Instruction;

/// Which random-number instructions this CPU implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub rdrand: bool,
    pub rdseed: bool,
}

impl Capabilities {
    /// Query CPUID for RDRAND and RDSEED.
    pub fn detect() -> Self {
        let caps = Self {
            rdrand: rdrand_supported(),
            rdseed: rdseed_supported(),
        };
        log::debug!("detected capabilities: {caps:?}");
        caps
    }

    /// Both instructions present.
    pub fn all() -> Self {
        Self {
            rdrand: true,
            rdseed: true,
        }
    }

    /// Neither instruction present.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn supports(&self, instruction: Instruction) -> bool {
        match instruction {
            Instruction::RdRand => self.rdrand,
            Instruction::RdSeed => self.rdseed,
        }
    }

    /// Fail with `Unsupported` for the first missing instruction.
    ///
    /// Hosts that expose both instructions call this once at start-up and
    /// refuse to initialize on error.
    pub fn require_all(&self) -> Result<()> {
        for instruction in [Instruction::RdRand, Instruction::RdSeed] {
            if !self.supports(instruction) {
                return Err(Error::Unsupported { instruction });
            }
        }
        Ok(())
    }
}

/// Check if the RDRAND instruction is supported by the current CPU.
#[cfg(target_arch = "x86_64")]
pub fn rdrand_supported() -> bool {
    std::arch::is_x86_feature_detected!("rdrand")
}

#[cfg(not(target_arch = "x86_64"))]
pub fn rdrand_supported() -> bool {
    false
}

/// Check if the RDSEED instruction is supported by the current CPU.
#[cfg(target_arch = "x86_64")]
pub fn rdseed_supported() -> bool {
    std::arch::is_x86_feature_detected!("rdseed")
}

#[cfg(not(target_arch = "x86_64"))]
pub fn rdseed_supported() -> bool {
    false
}

/// Platform information.
pub fn platform_info() -> PlatformInfo {
    PlatformInfo {
        system: std::env::consts::OS.to_string(),
        machine: std::env::consts::ARCH.to_string(),
        family: std::env::consts::FAMILY.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub system: String,
    pub machine: String,
    pub family: String,
}
