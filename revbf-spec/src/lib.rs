//! # revbf Specification
//!
//! Core types shared by the revbf tokenizer and runtime.
//!
//! ## Key Features
//! - Eight-instruction tape language (`+ - < > [ ] . ,`)
//! - Tokens with run-length deltas and mutually linked loop partners
//! - Per-token reversal bookkeeping: undo stacks for lossy instructions,
//!   pass-counter stacks for loop sites
//! - `Start` / `End` sentinels framing every program
//! - Configurable cell width, folding, and fingerprint window

pub mod config;
pub mod error;
pub mod program;
pub mod token;

pub use config::{Config, ConfigError, DEFAULT_CELL_WIDTH, DEFAULT_FINGERPRINT_WINDOW};
pub use error::SpecError;
pub use program::Program;
pub use token::{Token, TokenKind};

/// Characters with meaning in source text; everything else is comment
pub const SIGNIFICANT_CHARS: &str = "+-<>[].,";
