//! revbf Tokenizer
//!
//! Turn source text into a framed program of tokens.
//!
//! ## Example
//!
//! ```rust
//! use revbf_tokenizer::tokenize;
//! use revbf_spec::TokenKind;
//!
//! let program = tokenize("+++[-]>.", true).unwrap();
//! assert_eq!(program.count(TokenKind::Zero), 1);
//! ```

pub mod error;
pub mod lexer;
pub mod tokenizer;

pub use error::{LoadError, Result};
pub use lexer::Op;
pub use tokenizer::{tokenize, tokenize_with};
