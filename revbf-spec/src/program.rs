//! # Program Structure
//!
//! A program is a token sequence framed by a `Start` sentinel at index 0
//! and an `End` sentinel at the last index. Its structure never changes
//! after construction; only the per-token bookkeeping does.

use crate::error::{Result, SpecError};
use crate::token::{Token, TokenKind};
use std::fmt;

/// Loaded program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<Token>,
    source: String,
}

impl Program {
    /// Create a program with no instructions
    pub fn new() -> Self {
        Self {
            tokens: vec![Token::sentinel(TokenKind::Start), Token::sentinel(TokenKind::End)],
            source: String::new(),
        }
    }

    /// Build a program from a framed token sequence, validating its structure
    pub fn from_tokens(tokens: Vec<Token>, source: impl Into<String>) -> Result<Self> {
        let program = Self {
            tokens,
            source: source.into(),
        };
        program.validate()?;
        Ok(program)
    }

    /// Validate sentinels, deltas, and partner links (mutual and properly nested)
    pub fn validate(&self) -> Result<()> {
        let last = match self.tokens.len() {
            0 | 1 => return Err(SpecError::malformed(0, "program must hold both sentinels")),
            len => len - 1,
        };

        if self.tokens[0].kind != TokenKind::Start {
            return Err(SpecError::malformed(0, "first token must be start"));
        }
        if self.tokens[last].kind != TokenKind::End {
            return Err(SpecError::malformed(last, "last token must be end"));
        }

        let mut open_heads = Vec::new();
        for (index, token) in self.tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Start | TokenKind::End if index != 0 && index != last => {
                    return Err(SpecError::malformed(index, "sentinel inside program"));
                }
                TokenKind::Add | TokenKind::Shift if token.delta == 0 => {
                    return Err(SpecError::malformed(index, "zero delta"));
                }
                TokenKind::LoopOpen | TokenKind::LoopClose => {
                    let partner = token
                        .partner
                        .ok_or_else(|| SpecError::malformed(index, "unlinked loop token"))?;
                    let mate = self
                        .tokens
                        .get(partner)
                        .ok_or_else(|| SpecError::malformed(index, "partner out of bounds"))?;

                    let (expected, ordered) = if token.kind == TokenKind::LoopOpen {
                        (TokenKind::LoopClose, partner > index)
                    } else {
                        (TokenKind::LoopOpen, partner < index)
                    };
                    if mate.kind != expected || !ordered {
                        return Err(SpecError::malformed(index, "partner is not a matching bracket"));
                    }
                    if mate.partner != Some(index) {
                        return Err(SpecError::malformed(index, "partner link is not mutual"));
                    }

                    if token.kind == TokenKind::LoopOpen {
                        open_heads.push(index);
                    } else if open_heads.pop() != Some(partner) {
                        return Err(SpecError::malformed(index, "loop pairs cross"));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// All tokens, sentinels included
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Mutable access for bookkeeping; the token sequence itself is fixed
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Token> {
        self.tokens.get_mut(index)
    }

    /// Mutable slice for bookkeeping; its length cannot change
    #[inline]
    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Token count, sentinels included
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there is nothing between the sentinels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 2
    }

    /// Index of the `End` sentinel
    #[inline]
    pub fn end_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Source text the program was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of tokens of the given kind
    pub fn count(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|token| token.kind == kind).count()
    }

    /// Number of matched bracket pairs
    pub fn loop_sites(&self) -> usize {
        self.count(TokenKind::LoopOpen)
    }

    /// Clear every token's runtime bookkeeping
    pub fn reset_bookkeeping(&mut self) {
        for token in &mut self.tokens {
            token.reset_bookkeeping();
        }
    }

    /// No token carries bookkeeping
    pub fn is_pristine(&self) -> bool {
        self.tokens.iter().all(Token::is_pristine)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the program back to canonical source text
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token.kind {
                TokenKind::Add => {
                    let symbol = if token.delta > 0 { "+" } else { "-" };
                    write!(f, "{}", symbol.repeat(token.delta.unsigned_abs() as usize))?;
                }
                TokenKind::Shift => {
                    let symbol = if token.delta > 0 { ">" } else { "<" };
                    write!(f, "{}", symbol.repeat(token.delta.unsigned_abs() as usize))?;
                }
                TokenKind::LoopOpen => write!(f, "[")?,
                TokenKind::LoopClose => write!(f, "]")?,
                TokenKind::Output => write!(f, ".")?,
                TokenKind::Input => write!(f, ",")?,
                TokenKind::Zero => write!(f, "[-]")?,
                TokenKind::Start | TokenKind::End => {}
            }
        }
        Ok(())
    }
}
