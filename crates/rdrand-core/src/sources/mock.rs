//! Test doubles for [`EntropySource`].
//!
//! Every double counts its `try_draw_*` calls so tests can assert exactly how
//! much entropy an operation consumed.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::source::{EntropySource, Instruction};

/// Replays a fixed script of draw replies, then underflows forever.
///
/// 32-bit draws consume one reply and keep its low half.
pub struct ScriptedSource {
    instruction: Instruction,
    script: Mutex<VecDeque<Option<u64>>>,
    draws: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Option<u64>>) -> Self {
        Self {
            instruction: Instruction::RdRand,
            script: Mutex::new(script.into_iter().collect()),
            draws: AtomicUsize::new(0),
        }
    }

    /// A script where every draw succeeds with the given words in order.
    pub fn words(words: impl IntoIterator<Item = u64>) -> Self {
        Self::new(words.into_iter().map(Some))
    }

    pub fn with_instruction(mut self, instruction: Instruction) -> Self {
        self.instruction = instruction;
        self
    }

    /// Number of `try_draw_*` calls made so far.
    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::Relaxed)
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn next(&self) -> Option<u64> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .flatten()
    }
}

impl EntropySource for ScriptedSource {
    fn instruction(&self) -> Instruction {
        self.instruction
    }

    fn supports(&self) -> bool {
        true
    }

    fn try_draw_u64(&self) -> Option<u64> {
        self.next()
    }

    fn try_draw_u32(&self) -> Option<u32> {
        self.next().map(|w| w as u32)
    }
}

/// Supported, but every draw underflows.
#[derive(Default)]
pub struct FailingSource {
    draws: AtomicUsize,
}

impl FailingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::Relaxed)
    }
}

impl EntropySource for FailingSource {
    fn instruction(&self) -> Instruction {
        Instruction::RdRand
    }

    fn supports(&self) -> bool {
        true
    }

    fn try_draw_u64(&self) -> Option<u64> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn try_draw_u32(&self) -> Option<u32> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        None
    }
}

/// Reports the instruction as absent. Draws are counted but should never happen.
#[derive(Default)]
pub struct UnsupportedSource {
    draws: AtomicUsize,
}

impl UnsupportedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::Relaxed)
    }
}

impl EntropySource for UnsupportedSource {
    fn instruction(&self) -> Instruction {
        Instruction::RdRand
    }

    fn supports(&self) -> bool {
        false
    }

    fn try_draw_u64(&self) -> Option<u64> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn try_draw_u32(&self) -> Option<u32> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        None
    }
}

/// Deterministic uniform words from a seeded `StdRng`.
///
/// Stands in for working hardware in statistical tests.
pub struct SeededSource {
    rng: Mutex<StdRng>,
    draws: AtomicUsize,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            draws: AtomicUsize::new(0),
        }
    }

    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::Relaxed)
    }
}

impl EntropySource for SeededSource {
    fn instruction(&self) -> Instruction {
        Instruction::RdRand
    }

    fn supports(&self) -> bool {
        true
    }

    fn try_draw_u64(&self) -> Option<u64> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        Some(self.rng.lock().unwrap_or_else(|e| e.into_inner()).next_u64())
    }

    fn try_draw_u32(&self) -> Option<u32> {
        self.draws.fetch_add(1, Ordering::Relaxed);
        Some(self.rng.lock().unwrap_or_else(|e| e.into_inner()).next_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replays_then_underflows() {
        let src = ScriptedSource::new([Some(1), None, Some(u64::MAX)]);
        assert_eq!(src.try_draw_u64(), Some(1));
        assert_eq!(src.try_draw_u64(), None);
        assert_eq!(src.try_draw_u32(), Some(u32::MAX));
        assert_eq!(src.remaining(), 0);
        assert_eq!(src.try_draw_u64(), None);
        assert_eq!(src.draws(), 4);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededSource::new(42);
        let b = SeededSource::new(42);
        for _ in 0..16 {
            assert_eq!(a.try_draw_u64(), b.try_draw_u64());
        }
        assert_eq!(a.draws(), 16);
    }
}
