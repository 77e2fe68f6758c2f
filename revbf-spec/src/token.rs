//! # Token model
//!
//! A token is one instruction of a loaded program. Its static fields are
//! fixed by the tokenizer; the bookkeeping fields (`undo_stack`,
//! `pass_stack`, `in_progress`) are owned by the stepper and cleared on
//! every load and reset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Beginning-of-program sentinel (always index 0)
    Start,
    /// `[`: jump past the partner when the current cell is zero
    LoopOpen,
    /// `]`: jump back to the partner loop head
    LoopClose,
    /// `+` / `-` run: add `delta` to the current cell
    Add,
    /// `>` / `<` run: move the pointer by `delta`
    Shift,
    /// `.`: emit the current cell
    Output,
    /// `,`: overwrite the current cell with an input value
    Input,
    /// Folded `[-]` / `[+]`: clear the current cell
    Zero,
    /// End-of-program sentinel (always the last index)
    End,
}

impl TokenKind {
    /// Stable numeric code, used by state fingerprints
    pub const fn code(self) -> u8 {
        match self {
            TokenKind::Start => 0,
            TokenKind::LoopOpen => 1,
            TokenKind::LoopClose => 2,
            TokenKind::Add => 3,
            TokenKind::Shift => 4,
            TokenKind::Output => 5,
            TokenKind::Input => 6,
            TokenKind::Zero => 7,
            TokenKind::End => 8,
        }
    }

    /// Fold `LoopClose` onto `LoopOpen`; both stand for the loop head
    pub const fn loop_head(self) -> Self {
        match self {
            TokenKind::LoopClose => TokenKind::LoopOpen,
            other => other,
        }
    }

    /// Instructions that destroy the overwritten cell value
    pub const fn is_lossy(self) -> bool {
        matches!(self, TokenKind::Zero | TokenKind::Input)
    }

    pub const fn is_loop(self) -> bool {
        matches!(self, TokenKind::LoopOpen | TokenKind::LoopClose)
    }

    pub const fn is_sentinel(self) -> bool {
        matches!(self, TokenKind::Start | TokenKind::End)
    }

    /// Instructions that carry a run-length `delta`
    pub const fn is_foldable(self) -> bool {
        matches!(self, TokenKind::Add | TokenKind::Shift)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Start => "start",
            TokenKind::LoopOpen => "loop_open",
            TokenKind::LoopClose => "loop_close",
            TokenKind::Add => "add",
            TokenKind::Shift => "shift",
            TokenKind::Output => "output",
            TokenKind::Input => "input",
            TokenKind::Zero => "zero",
            TokenKind::End => "end",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One instruction of a program plus its reversal bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Instruction kind
    pub kind: TokenKind,

    /// Cell delta (Add) or pointer delta (Shift); 0 for other kinds
    pub delta: i64,

    /// Index of the matching bracket (LoopOpen / LoopClose only)
    pub partner: Option<usize>,

    /// Byte offset of the first source character (None for sentinels)
    pub offset: Option<usize>,

    /// 1-based source line
    pub line: usize,

    /// 1-based source column
    pub column: usize,

    /// Overwritten cell values (Zero / Input)
    pub undo_stack: Vec<u32>,

    /// Head crossings from the tail, one counter per invocation (LoopOpen)
    pub pass_stack: Vec<u64>,

    /// An invocation of this loop site is open (LoopOpen)
    pub in_progress: bool,
}

impl Token {
    /// Create a token read from source
    pub fn new(kind: TokenKind, offset: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            delta: 0,
            partner: None,
            offset: Some(offset),
            line,
            column,
            undo_stack: Vec::new(),
            pass_stack: Vec::new(),
            in_progress: false,
        }
    }

    /// Create a Start / End marker
    pub fn sentinel(kind: TokenKind) -> Self {
        debug_assert!(kind.is_sentinel());
        Self {
            kind,
            delta: 0,
            partner: None,
            offset: None,
            line: 0,
            column: 0,
            undo_stack: Vec::new(),
            pass_stack: Vec::new(),
            in_progress: false,
        }
    }

    #[must_use]
    pub fn with_delta(mut self, delta: i64) -> Self {
        self.delta = delta;
        self
    }

    /// Drop all runtime bookkeeping
    pub fn reset_bookkeeping(&mut self) {
        self.undo_stack.clear();
        self.pass_stack.clear();
        self.in_progress = false;
    }

    /// No bookkeeping has been recorded since the last reset
    pub fn is_pristine(&self) -> bool {
        self.undo_stack.is_empty() && self.pass_stack.is_empty() && !self.in_progress
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Add | TokenKind::Shift => write!(f, "{}({:+})", self.kind, self.delta)?,
            TokenKind::LoopOpen | TokenKind::LoopClose => match self.partner {
                Some(partner) => write!(f, "{} -> {}", self.kind, partner)?,
                None => write!(f, "{}", self.kind)?,
            },
            _ => write!(f, "{}", self.kind)?,
        }
        if self.offset.is_some() {
            write!(f, " @ {}:{}", self.line, self.column)?;
        }
        Ok(())
    }
}
