//! # Error Types for revbf-spec

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Malformed program at token {index}: {reason}")]
    MalformedProgram { index: usize, reason: String },
}

impl SpecError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        SpecError::MalformedProgram {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;
