//! Common test utilities for the tileworld test suite.
//!
//! Provides a scripted random source so individual coin flips and noise draws
//! can be pinned down exactly.

#![allow(dead_code)]

use rand::RngCore;

/// Replays a fixed cycle of 64-bit words.
///
/// `rand` turns each `random_bool(p)` into one `next_u64` compared against
/// `p * 2^64`, so a word of `0` always answers "yes" (a fair coin lands on
/// left and no noise ever fires) while `u64::MAX` always answers "no".
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    words: Vec<u64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(words: Vec<u64>) -> Self {
        assert!(!words.is_empty(), "a scripted rng needs at least one word");
        Self { words, cursor: 0 }
    }

    /// Every draw returns zero.
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }

    /// Every draw returns `u64::MAX`.
    pub fn ones() -> Self {
        Self::new(vec![u64::MAX])
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.cursor % self.words.len()];
        self.cursor += 1;
        word
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
