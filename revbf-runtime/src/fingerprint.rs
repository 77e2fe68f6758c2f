//! State fingerprints
//!
//! A fingerprint summarizes the visible machine state: the nonzero cells in
//! a fixed tape window, the pointer, and the instruction kind at `pc` with
//! the loop close folded onto the loop head. It is a SHA-256 digest
//! truncated to 64 bits, so equal states always agree and different states
//! collide only by accident.

use crate::tape::Tape;
use revbf_spec::TokenKind;
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn compute(tape: &Tape, pointer: usize, kind: TokenKind, window: usize) -> Self {
        let mut hasher = Sha256::new();

        for (index, value) in tape.nonzero_within(window) {
            hasher.update((index as u64).to_le_bytes());
            hasher.update(value.to_le_bytes());
        }
        hasher.update((pointer as u64).to_le_bytes());
        hasher.update([kind.loop_head().code()]);

        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(bytes))
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
