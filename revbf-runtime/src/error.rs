//! Runtime error types for revbf

use revbf_spec::{SpecError, TokenKind};
use revbf_tokenizer::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid program: {0}")]
    Spec(#[from] SpecError),

    #[error("Pointer underflow at PC {pc}: pointer {pointer} shifted by {delta}")]
    PointerUnderflow { pc: usize, pointer: usize, delta: i64 },

    #[error("Undo stack underflow at PC {pc}: {kind} reversed before it ran forward")]
    UndoStackUnderflow { pc: usize, kind: TokenKind },

    #[error("Invalid input value {value} at PC {pc}: cells hold 0..{cell_width}")]
    InvalidInputValue { pc: usize, value: i64, cell_width: u32 },

    #[error("Loop token at PC {pc} has no partner")]
    UnlinkedLoop { pc: usize },

    #[error("Cannot step backward from the beginning of the program")]
    ReverseAtBeginning,
}

impl RuntimeError {
    /// Token index the failing step was executing, if any
    pub fn pc(&self) -> Option<usize> {
        match self {
            RuntimeError::PointerUnderflow { pc, .. }
            | RuntimeError::UndoStackUnderflow { pc, .. }
            | RuntimeError::InvalidInputValue { pc, .. }
            | RuntimeError::UnlinkedLoop { pc } => Some(*pc),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
