//! # Lexer for revbf source text

use logos::Logos;

/// Significant source characters
///
/// Everything that is not one of the eight instructions or a newline is
/// comment and skipped by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[^+\-<>\[\].,\n]+")]
pub enum Op {
    #[token("+")]
    Inc,

    #[token("-")]
    Dec,

    #[token(">")]
    Right,

    #[token("<")]
    Left,

    #[token("[")]
    Open,

    #[token("]")]
    Close,

    #[token(".")]
    Output,

    #[token(",")]
    Input,

    /// Tracked for line/column diagnostics only
    #[token("\n")]
    Newline,
}

impl Op {
    /// Source character of this op
    pub const fn symbol(self) -> char {
        match self {
            Op::Inc => '+',
            Op::Dec => '-',
            Op::Right => '>',
            Op::Left => '<',
            Op::Open => '[',
            Op::Close => ']',
            Op::Output => '.',
            Op::Input => ',',
            Op::Newline => '\n',
        }
    }
}
