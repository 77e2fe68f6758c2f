//! Tokenizer errors

use revbf_spec::SpecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unmatched '{marker}' at line {line}, column {column} (byte {offset})")]
    UnmatchedBracket {
        marker: char,
        offset: usize,
        line: usize,
        column: usize,
    },

    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl LoadError {
    /// Byte offset of the offending source character, if known
    pub fn offset(&self) -> Option<usize> {
        match self {
            LoadError::UnmatchedBracket { offset, .. } => Some(*offset),
            LoadError::Spec(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
