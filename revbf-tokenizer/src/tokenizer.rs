//! Source text to token sequence
//!
//! Pairs brackets through an explicit stack of pending loop heads and,
//! when optimizing, folds `+`/`-` and `<`/`>` runs and the `[-]` / `[+]`
//! clear-cell idiom.

use crate::error::{LoadError, Result};
use crate::lexer::Op;
use logos::Logos;
use revbf_spec::{Config, Program, Token, TokenKind};

/// Tokenize source text into a framed, validated program
pub fn tokenize(source: &str, optimize: bool) -> Result<Program> {
    let mut tokenizer = Tokenizer::new(optimize);
    let mut line = 1;
    // Column of the character at byte `cursor`, advanced token by token
    let mut cursor = 0;
    let mut column = 1;

    for (op, span) in Op::lexer(source).spanned() {
        // The skip rule covers every other character, so errors never carry an op
        let Ok(op) = op else { continue };

        if op == Op::Newline {
            line += 1;
            cursor = span.end;
            column = 1;
            continue;
        }

        column += source[cursor..span.start].chars().count();
        cursor = span.start;
        tokenizer.push(op, span.start, line, column)?;
    }

    let program = Program::from_tokens(tokenizer.finish()?, source)?;

    tracing::debug!(
        tokens = program.len(),
        loop_sites = program.loop_sites(),
        zeros = program.count(TokenKind::Zero),
        optimize,
        "tokenized program"
    );

    Ok(program)
}

/// Tokenize using the folding setting of a configuration
pub fn tokenize_with(source: &str, config: &Config) -> Result<Program> {
    tokenize(source, config.optimize)
}

struct Tokenizer {
    tokens: Vec<Token>,
    /// Indices of loop heads still waiting for their `]`
    pending: Vec<usize>,
    /// Last token, while it may still absorb a same-kind run
    fold_target: Option<usize>,
    optimize: bool,
}

impl Tokenizer {
    fn new(optimize: bool) -> Self {
        Self {
            // Index 0 is reserved for Start, so recorded partners are final
            tokens: vec![Token::sentinel(TokenKind::Start)],
            pending: Vec::new(),
            fold_target: None,
            optimize,
        }
    }

    fn push(&mut self, op: Op, offset: usize, line: usize, column: usize) -> Result<()> {
        let token = |kind| Token::new(kind, offset, line, column);

        match op {
            Op::Inc => self.push_run(token(TokenKind::Add).with_delta(1)),
            Op::Dec => self.push_run(token(TokenKind::Add).with_delta(-1)),
            Op::Right => self.push_run(token(TokenKind::Shift).with_delta(1)),
            Op::Left => self.push_run(token(TokenKind::Shift).with_delta(-1)),
            Op::Open => {
                self.pending.push(self.tokens.len());
                self.push_plain(token(TokenKind::LoopOpen));
            }
            Op::Close => {
                let open = self.pending.pop().ok_or(LoadError::UnmatchedBracket {
                    marker: ']',
                    offset,
                    line,
                    column,
                })?;

                if self.optimize && self.is_clear_idiom(open) {
                    // The folded token takes over the loop head's position
                    let head = &self.tokens[open];
                    let mut zero = Token::new(TokenKind::Zero, offset, head.line, head.column);
                    zero.offset = head.offset;
                    self.tokens.truncate(open);
                    self.push_plain(zero);
                } else {
                    let close = self.tokens.len();
                    self.tokens[open].partner = Some(close);
                    let mut tail = token(TokenKind::LoopClose);
                    tail.partner = Some(open);
                    self.push_plain(tail);
                }
            }
            Op::Output => self.push_plain(token(TokenKind::Output)),
            Op::Input => self.push_plain(token(TokenKind::Input)),
            Op::Newline => {}
        }

        Ok(())
    }

    /// Append an Add/Shift step, merging it into the previous run if allowed
    fn push_run(&mut self, token: Token) {
        if let Some(target) = self.fold_target {
            let last = &mut self.tokens[target];
            if last.kind == token.kind {
                last.delta += token.delta;
                if last.delta == 0 {
                    // A cancelled run vanishes and leaves a fold barrier behind
                    self.tokens.pop();
                    self.fold_target = None;
                }
                return;
            }
        }

        self.tokens.push(token);
        self.fold_target = self.optimize.then(|| self.tokens.len() - 1);
    }

    fn push_plain(&mut self, token: Token) {
        self.tokens.push(token);
        self.fold_target = None;
    }

    /// `[-]` / `[+]`: the loop body is exactly one unit Add
    fn is_clear_idiom(&self, open: usize) -> bool {
        self.tokens.len() == open + 2
            && self.tokens[open + 1].kind == TokenKind::Add
            && self.tokens[open + 1].delta.abs() == 1
    }

    fn finish(mut self) -> Result<Vec<Token>> {
        if let Some(&open) = self.pending.first() {
            let head = &self.tokens[open];
            return Err(LoadError::UnmatchedBracket {
                marker: '[',
                offset: head.offset.unwrap_or_default(),
                line: head.line,
                column: head.column,
            });
        }

        self.tokens.push(Token::sentinel(TokenKind::End));
        Ok(self.tokens)
    }
}
