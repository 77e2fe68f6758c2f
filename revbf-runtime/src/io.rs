//! I/O hooks
//!
//! The stepper never performs I/O itself. Output goes to an [`OutputSink`],
//! input comes from an [`InputSource`] that may report "no data yet".

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Receives one character per forward Output instruction, in program order
pub trait OutputSink {
    fn emit(&mut self, ch: char);
}

impl<F: FnMut(char)> OutputSink for F {
    fn emit(&mut self, ch: char) {
        self(ch)
    }
}

/// Supplies values for Input instructions
pub trait InputSource {
    /// Next value, or `None` when no data is available yet
    fn read(&mut self) -> Option<i64>;
}

impl<F: FnMut() -> Option<i64>> InputSource for F {
    fn read(&mut self) -> Option<i64> {
        self()
    }
}

/// Discards output
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn emit(&mut self, _ch: char) {}
}

/// Never has input available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn read(&mut self) -> Option<i64> {
        None
    }
}

/// Map a cell value to the character handed to the output sink
#[inline]
pub fn cell_char(value: u32) -> char {
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Input queue plus collected output
#[derive(Debug, Clone, Default)]
pub struct BufferedIo {
    inputs: VecDeque<i64>,
    output: String,
}

impl BufferedIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler with the bytes of `input` queued
    pub fn with_input(input: &str) -> Self {
        let mut io = Self::new();
        io.feed_str(input);
        io
    }

    pub fn feed(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    /// Queue every byte of `input`
    pub fn feed_str(&mut self, input: &str) {
        self.inputs.extend(input.bytes().map(i64::from));
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl OutputSink for BufferedIo {
    fn emit(&mut self, ch: char) {
        self.output.push(ch);
    }
}

impl InputSource for BufferedIo {
    fn read(&mut self) -> Option<i64> {
        self.inputs.pop_front()
    }
}

/// Shared handle to a [`BufferedIo`]
///
/// Attach clones of one handle as both sink and source of a stepper, keep
/// another to feed input and inspect output between steps.
#[derive(Debug, Clone, Default)]
pub struct SharedIo(Rc<RefCell<BufferedIo>>);

impl SharedIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: &str) -> Self {
        Self(Rc::new(RefCell::new(BufferedIo::with_input(input))))
    }

    pub fn feed(&self, value: i64) {
        self.0.borrow_mut().feed(value);
    }

    pub fn feed_str(&self, input: &str) {
        self.0.borrow_mut().feed_str(input);
    }

    pub fn pending_inputs(&self) -> usize {
        self.0.borrow().pending_inputs()
    }

    /// Copy of the output collected so far
    pub fn output(&self) -> String {
        self.0.borrow().output().to_string()
    }

    pub fn take_output(&self) -> String {
        self.0.borrow_mut().take_output()
    }
}

impl OutputSink for SharedIo {
    fn emit(&mut self, ch: char) {
        self.0.borrow_mut().emit(ch);
    }
}

impl InputSource for SharedIo {
    fn read(&mut self) -> Option<i64> {
        self.0.borrow_mut().read()
    }
}
