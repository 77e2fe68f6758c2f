//! Reversible stepping virtual machine
//!
//! `step(false)` executes the token at `pc`; `step(true)` undoes the token
//! at `pc - 1`. Each call crosses exactly one visible instruction boundary:
//! loop closes and the `Start` sentinel only redirect `pc`, so the stepper
//! keeps dispatching in the same direction until a real instruction has run.
//!
//! Arithmetic and pointer moves invert directly. Instructions that destroy
//! a cell value (Zero, Input) keep an undo stack on their token. Loop heads
//! keep one counter per invocation holding the number of times the head was
//! re-entered from the loop close; going backward, a positive counter means
//! the previous visible state was the loop close, zero means it was the head
//! itself before the invocation started.

use crate::error::{Result, RuntimeError};
use crate::fingerprint::Fingerprint;
use crate::io::{cell_char, InputSource, NoInput, NullOutput, OutputSink, SharedIo};
use crate::state::{MachineState, RunSummary, StepOutcome, StopReason};
use crate::tape::{Tape, TapeView};
use revbf_spec::{Config, Program, SpecError, Token, TokenKind};
use revbf_tokenizer::tokenize_with;
use std::fmt;

pub struct Stepper {
    /// Loaded program, owning all token bookkeeping
    program: Program,

    /// pc, pointer, tape
    state: MachineState,

    config: Config,

    output: Box<dyn OutputSink>,

    input: Box<dyn InputSource>,
}

impl Stepper {
    /// Create a stepper holding an empty program
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(SpecError::from)?;

        Ok(Self {
            program: Program::new(),
            state: MachineState::new(),
            config,
            output: Box::new(NullOutput),
            input: Box::new(NoInput),
        })
    }

    /// Create a stepper and load `source` into it
    pub fn from_source(source: &str, config: Config) -> Result<Self> {
        let mut stepper = Self::new(config)?;
        stepper.load(source)?;
        Ok(stepper)
    }

    /// Tokenize and load `source`; on failure the current program is kept
    pub fn load(&mut self, source: &str) -> Result<()> {
        let program = tokenize_with(source, &self.config)?;
        self.load_program(program)
    }

    /// Replace the program and reset
    pub fn load_program(&mut self, program: Program) -> Result<()> {
        program.validate()?;
        self.program = program;
        self.reset();
        Ok(())
    }

    /// Return to the fresh-load state: pc, pointer, tape, and all bookkeeping
    pub fn reset(&mut self) {
        self.state.clear();
        self.program.reset_bookkeeping();
        tracing::debug!(tokens = self.program.len(), "stepper reset");
    }

    pub fn set_output(&mut self, sink: impl OutputSink + 'static) {
        self.output = Box::new(sink);
    }

    pub fn set_input(&mut self, source: impl InputSource + 'static) {
        self.input = Box::new(source);
    }

    /// Use one shared buffer as both input source and output sink
    pub fn attach(&mut self, io: &SharedIo) {
        self.set_output(io.clone());
        self.set_input(io.clone());
    }

    /// Execute one instruction forward, or undo one with `reverse`
    ///
    /// On error, and when input is pending, pc, pointer, and tape are exactly
    /// as before the call.
    pub fn step(&mut self, reverse: bool) -> Result<StepOutcome> {
        if reverse && self.at_beginning() {
            return Err(RuntimeError::ReverseAtBeginning);
        }

        let entry_pc = self.state.pc;
        let outcome = if reverse {
            self.step_backward()
        } else {
            self.step_forward()
        };

        // A redirect may already have moved pc before the failing instruction
        if !matches!(outcome, Ok(StepOutcome::Executed | StepOutcome::Halted)) {
            self.state.pc = entry_pc;
        }
        outcome
    }

    fn step_forward(&mut self) -> Result<StepOutcome> {
        let entry_pc = self.state.pc;
        loop {
            let pc = self.state.pc;
            let (kind, delta) = {
                let token = &self.program.tokens()[pc];
                (token.kind, token.delta)
            };
            tracing::trace!(pc, %kind, "step forward");

            match kind {
                TokenKind::Start => {
                    self.state.pc = pc + 1;
                    continue;
                }
                TokenKind::End if pc == entry_pc => return Ok(StepOutcome::Halted),
                // Empty program: stepping past Start is the only instruction
                TokenKind::End => return Ok(StepOutcome::Executed),
                TokenKind::Add => {
                    let value = self.wrapped(self.current(), delta);
                    self.set_current(value);
                }
                TokenKind::Shift => {
                    self.state.pointer = self.shifted(pc, delta)?;
                }
                TokenKind::Output => {
                    let ch = cell_char(self.current());
                    self.output.emit(ch);
                }
                TokenKind::Input => {
                    let Some(value) = self.input.read() else {
                        return Ok(StepOutcome::InputPending);
                    };
                    let value = self.checked_input(pc, value)?;
                    let old = self.current();
                    self.token_mut(pc).undo_stack.push(old);
                    self.set_current(value);
                }
                TokenKind::Zero => {
                    let old = self.current();
                    self.token_mut(pc).undo_stack.push(old);
                    self.set_current(0);
                }
                TokenKind::LoopOpen => {
                    let close = self.partner(pc)?;
                    let enter = self.current() != 0;

                    let head = self.token_mut(pc);
                    if head.in_progress {
                        // Re-entered from the loop close
                        if let Some(crossings) = head.pass_stack.last_mut() {
                            *crossings += 1;
                        }
                    } else {
                        head.pass_stack.push(0);
                    }
                    head.in_progress = enter;

                    self.state.pc = if enter { pc + 1 } else { close + 1 };
                    return Ok(StepOutcome::Executed);
                }
                TokenKind::LoopClose => {
                    // Re-evaluate the head instead of duplicating its logic
                    self.state.pc = self.partner(pc)?;
                    continue;
                }
            }

            self.state.pc = pc + 1;
            return Ok(StepOutcome::Executed);
        }
    }

    fn step_backward(&mut self) -> Result<StepOutcome> {
        loop {
            let pc = self.state.pc - 1;
            let (kind, delta) = {
                let token = &self.program.tokens()[pc];
                (token.kind, token.delta)
            };
            tracing::trace!(pc, %kind, "step backward");

            match kind {
                TokenKind::Start | TokenKind::End | TokenKind::Output => {}
                TokenKind::Add => {
                    let value = self.unwrapped(self.current(), delta);
                    self.set_current(value);
                }
                TokenKind::Shift => {
                    self.state.pointer = self.shifted(pc, delta.saturating_neg())?;
                }
                TokenKind::Input | TokenKind::Zero => {
                    let old = self
                        .token_mut(pc)
                        .undo_stack
                        .pop()
                        .ok_or(RuntimeError::UndoStackUnderflow { pc, kind })?;
                    self.set_current(old);
                }
                TokenKind::LoopOpen => {
                    let close = self.partner(pc)?;
                    let head = self.token_mut(pc);
                    let crossings = *head
                        .pass_stack
                        .last()
                        .ok_or(RuntimeError::UndoStackUnderflow { pc, kind })?;

                    if crossings > 0 {
                        // Arrived from the loop close: rest there, inside the body
                        if let Some(top) = head.pass_stack.last_mut() {
                            *top -= 1;
                        }
                        head.in_progress = true;
                        self.state.pc = close;
                        return Ok(StepOutcome::Executed);
                    }

                    // First evaluation of this invocation: undo it entirely
                    head.pass_stack.pop();
                    head.in_progress = false;
                }
                TokenKind::LoopClose => {
                    self.state.pc = self.partner(pc)? + 1;
                    continue;
                }
            }

            self.state.pc = pc;
            if pc == 1 {
                // Only Start lies behind: settle on it
                continue;
            }
            return Ok(StepOutcome::Executed);
        }
    }

    /// Step forward until the end, pending input, or `max_steps` steps
    pub fn run(&mut self, max_steps: u64) -> Result<RunSummary> {
        let mut steps = 0;
        while !self.at_end() {
            if steps >= max_steps {
                return Ok(RunSummary {
                    steps,
                    stop: StopReason::StepLimit,
                });
            }
            match self.step(false)? {
                StepOutcome::Executed => steps += 1,
                StepOutcome::InputPending => {
                    return Ok(RunSummary {
                        steps,
                        stop: StopReason::InputPending,
                    })
                }
                StepOutcome::Halted => break,
            }
        }

        Ok(RunSummary {
            steps,
            stop: StopReason::Finished,
        })
    }

    /// Step forward without a step budget
    pub fn run_to_end(&mut self) -> Result<RunSummary> {
        self.run(u64::MAX)
    }

    /// Step backward until the beginning or `max_steps` steps
    pub fn rewind(&mut self, max_steps: u64) -> Result<RunSummary> {
        let mut steps = 0;
        while !self.at_beginning() {
            if steps >= max_steps {
                return Ok(RunSummary {
                    steps,
                    stop: StopReason::StepLimit,
                });
            }
            self.step(true)?;
            steps += 1;
        }

        Ok(RunSummary {
            steps,
            stop: StopReason::Rewound,
        })
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::End
    }

    #[inline]
    pub fn at_beginning(&self) -> bool {
        self.state.pc == 0
    }

    /// Program counter
    #[inline]
    pub fn position(&self) -> usize {
        self.state.pc
    }

    /// Byte offset in the source of the token at `pc`
    pub fn position_in_source(&self) -> Option<usize> {
        self.program.tokens()[self.state.pc].offset
    }

    pub fn current_kind(&self) -> TokenKind {
        self.program.tokens()[self.state.pc].kind
    }

    #[inline]
    pub fn pointer(&self) -> usize {
        self.state.pointer
    }

    pub fn cell(&self, index: usize) -> u32 {
        self.state.tape.get(index)
    }

    pub fn tape(&self) -> &Tape {
        &self.state.tape
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fingerprint of the visible state
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(
            &self.state.tape,
            self.state.pointer,
            self.current_kind(),
            self.config.fingerprint_window,
        )
    }

    /// Render `width` cells starting at `start` with the pointer marked
    pub fn tape_view(&self, start: usize, width: usize) -> TapeView<'_> {
        TapeView::new(&self.state.tape, self.state.pointer, start, width)
    }

    #[inline]
    fn current(&self) -> u32 {
        self.state.tape.get(self.state.pointer)
    }

    #[inline]
    fn set_current(&mut self, value: u32) {
        self.state.tape.set(self.state.pointer, value);
    }

    fn token_mut(&mut self, pc: usize) -> &mut Token {
        &mut self.program.tokens_mut()[pc]
    }

    /// Matching bracket of the loop token at `pc`
    fn partner(&self, pc: usize) -> Result<usize> {
        self.program.tokens()[pc]
            .partner
            .ok_or(RuntimeError::UnlinkedLoop { pc })
    }

    /// `value + delta` modulo the cell width
    fn wrapped(&self, value: u32, delta: i64) -> u32 {
        let width = i64::from(self.config.cell_width);
        ((i64::from(value) + delta.rem_euclid(width)) % width) as u32
    }

    /// `value - delta` modulo the cell width
    fn unwrapped(&self, value: u32, delta: i64) -> u32 {
        let width = i64::from(self.config.cell_width);
        (i64::from(value) - delta.rem_euclid(width)).rem_euclid(width) as u32
    }

    fn shifted(&self, pc: usize, delta: i64) -> Result<usize> {
        let pointer = self.state.pointer;
        i64::try_from(pointer)
            .ok()
            .and_then(|current| current.checked_add(delta))
            .and_then(|moved| usize::try_from(moved).ok())
            .ok_or(RuntimeError::PointerUnderflow {
                pc,
                pointer,
                delta,
            })
    }

    fn checked_input(&self, pc: usize, value: i64) -> Result<u32> {
        let cell_width = self.config.cell_width;
        if (0..i64::from(cell_width)).contains(&value) {
            Ok(value as u32)
        } else {
            Err(RuntimeError::InvalidInputValue {
                pc,
                value,
                cell_width,
            })
        }
    }
}

impl fmt::Debug for Stepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stepper")
            .field("pc", &self.state.pc)
            .field("pointer", &self.state.pointer)
            .field("tokens", &self.program.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stepper(source: &str) -> Stepper {
        Stepper::from_source(source, Config::default()).unwrap()
    }

    fn unfolded(source: &str) -> Stepper {
        Stepper::from_source(source, Config::default().with_optimize(false)).unwrap()
    }

    #[test]
    fn test_fresh_stepper_is_empty() {
        let stepper = Stepper::new(Config::default()).unwrap();
        assert!(stepper.at_beginning());
        assert!(stepper.program().is_empty());
        assert_eq!(stepper.pointer(), 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = Config {
            cell_width: 0,
            ..Config::default()
        };
        assert!(matches!(Stepper::new(config), Err(RuntimeError::Spec(_))));
    }

    #[test]
    fn test_add_and_shift_forward_and_back() {
        let mut stepper = stepper("+++>");

        assert_eq!(stepper.step(false).unwrap(), StepOutcome::Executed);
        assert_eq!(stepper.cell(0), 3);
        assert_eq!(stepper.position(), 2);

        assert_eq!(stepper.step(false).unwrap(), StepOutcome::Executed);
        assert_eq!(stepper.pointer(), 1);
        assert!(stepper.at_end());
        assert_eq!(stepper.step(false).unwrap(), StepOutcome::Halted);
        assert!(stepper.at_end());

        stepper.step(true).unwrap();
        assert_eq!(stepper.pointer(), 0);
        assert_eq!(stepper.position(), 2);

        stepper.step(true).unwrap();
        assert_eq!(stepper.cell(0), 0);
        assert!(stepper.at_beginning());
    }

    #[test]
    fn test_add_wraps_at_cell_width() {
        let mut stepper = stepper("-");
        stepper.step(false).unwrap();
        assert_eq!(stepper.cell(0), 255);

        stepper.step(true).unwrap();
        assert_eq!(stepper.cell(0), 0);
    }

    #[test]
    fn test_wrapping_with_folded_runs_larger_than_width() {
        let config = Config::with_cell_bits(2).unwrap();
        let mut stepper = Stepper::from_source("+++++++", config).unwrap();
        stepper.step(false).unwrap();
        assert_eq!(stepper.cell(0), 3);

        stepper.step(true).unwrap();
        assert_eq!(stepper.cell(0), 0);
    }

    #[test]
    fn test_reverse_at_beginning() {
        let mut stepper = stepper("+");
        let err = stepper.step(true).unwrap_err();
        assert!(matches!(err, RuntimeError::ReverseAtBeginning));
        assert!(stepper.at_beginning());
        assert!(stepper.tape().is_blank());
    }

    #[test]
    fn test_pointer_underflow_leaves_state_untouched() {
        let mut stepper = stepper("<");
        let err = stepper.step(false).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::PointerUnderflow {
                pc: 1,
                pointer: 0,
                delta: -1
            }
        ));
        assert_eq!(stepper.position(), 0);
        assert_eq!(stepper.pointer(), 0);
    }

    #[test]
    fn test_zero_records_and_restores_value() {
        let mut stepper = stepper("+++[-]");
        assert_eq!(stepper.program().count(TokenKind::Zero), 1);

        stepper.run_to_end().unwrap();
        assert_eq!(stepper.cell(0), 0);
        assert_eq!(stepper.program().tokens()[2].undo_stack, vec![3]);

        stepper.step(true).unwrap();
        assert_eq!(stepper.cell(0), 3);
        assert!(stepper.program().tokens()[2].undo_stack.is_empty());
    }

    #[test]
    fn test_undo_stack_underflow() {
        let mut stepper = stepper("+[-]");
        stepper.state.pc = 3;

        let err = stepper.step(true).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UndoStackUnderflow {
                pc: 2,
                kind: TokenKind::Zero
            }
        ));
        assert_eq!(stepper.position(), 3);
    }

    #[test]
    fn test_input_undo_stack_underflow() {
        let mut stepper = stepper(",");
        stepper.state.pc = 2;

        let err = stepper.step(true).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UndoStackUnderflow {
                pc: 1,
                kind: TokenKind::Input
            }
        ));
        assert_eq!(stepper.position(), 2);
        assert!(stepper.tape().is_blank());
    }

    #[test]
    fn test_unlinked_loop_head_is_an_error() {
        let mut stepper = unfolded("[>]");
        stepper.program.tokens_mut()[1].partner = None;

        let err = stepper.step(false).unwrap_err();
        assert!(matches!(err, RuntimeError::UnlinkedLoop { pc: 1 }));
        assert!(stepper.at_beginning());
        assert!(stepper.program().is_pristine());
    }

    #[test]
    fn test_unlinked_loop_close_is_an_error() {
        let mut stepper = unfolded("[>]");
        stepper.program.tokens_mut()[3].partner = None;
        stepper.state.pc = 4;

        let err = stepper.step(true).unwrap_err();
        assert!(matches!(err, RuntimeError::UnlinkedLoop { pc: 3 }));
        assert_eq!(stepper.position(), 4);
    }

    #[test]
    fn test_loop_head_underflow() {
        let mut stepper = unfolded("[>]");
        stepper.state.pc = 4;

        let err = stepper.step(true).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UndoStackUnderflow {
                pc: 1,
                kind: TokenKind::LoopOpen
            }
        ));
        assert_eq!(stepper.position(), 4);
    }

    #[test]
    fn test_input_pending_changes_nothing() {
        let mut stepper = stepper(",");
        assert_eq!(stepper.step(false).unwrap(), StepOutcome::InputPending);
        assert!(stepper.at_beginning());
        assert!(stepper.program().is_pristine());

        let io = SharedIo::new();
        stepper.attach(&io);
        assert_eq!(stepper.step(false).unwrap(), StepOutcome::InputPending);

        io.feed(7);
        assert_eq!(stepper.step(false).unwrap(), StepOutcome::Executed);
        assert_eq!(stepper.cell(0), 7);

        stepper.step(true).unwrap();
        assert_eq!(stepper.cell(0), 0);
        assert!(stepper.at_beginning());
    }

    #[test]
    fn test_input_overwrites_and_restores() {
        let mut stepper = stepper("+++++,");
        let io = SharedIo::with_input("A");
        stepper.attach(&io);

        stepper.run_to_end().unwrap();
        assert_eq!(stepper.cell(0), 65);

        stepper.step(true).unwrap();
        assert_eq!(stepper.cell(0), 5);
    }

    #[test]
    fn test_invalid_input_value() {
        let mut stepper = stepper(",");
        let mut values = vec![256i64];
        stepper.set_input(move || values.pop());

        let err = stepper.step(false).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidInputValue {
                pc: 1,
                value: 256,
                cell_width: 256
            }
        ));
        assert!(stepper.at_beginning());
        assert!(stepper.tape().is_blank());
        assert!(stepper.program().is_pristine());
    }

    #[test]
    fn test_output_is_not_reversed() {
        let mut stepper = stepper("++++++++[>++++++++<-]>+.");
        let io = SharedIo::new();
        stepper.attach(&io);

        stepper.run_to_end().unwrap();
        assert_eq!(io.output(), "A");

        stepper.step(true).unwrap();
        assert_eq!(io.output(), "A");
        assert_eq!(stepper.current_kind(), TokenKind::Output);
    }

    #[test]
    fn test_skipped_loop() {
        let mut stepper = unfolded("[>]+");

        stepper.step(false).unwrap();
        assert_eq!(stepper.current_kind(), TokenKind::Add);
        assert_eq!(stepper.pointer(), 0);
        assert_eq!(stepper.program().tokens()[1].pass_stack, vec![0]);

        stepper.step(true).unwrap();
        assert!(stepper.at_beginning());
        assert!(stepper.program().is_pristine());
    }

    #[test]
    fn test_loop_counts_head_crossings() {
        let mut stepper = stepper("++[->+<]");

        let summary = stepper.run_to_end().unwrap();
        assert_eq!(summary.steps, 12);
        assert_eq!(summary.stop, StopReason::Finished);
        assert_eq!(stepper.cell(1), 2);

        let head = &stepper.program().tokens()[2];
        assert_eq!(head.pass_stack, vec![2]);
        assert!(!head.in_progress);

        // Back onto the loop close, inside the final pass
        stepper.step(true).unwrap();
        assert_eq!(stepper.current_kind(), TokenKind::LoopClose);
        assert_eq!(stepper.program().tokens()[2].pass_stack, vec![1]);

        let rewound = stepper.rewind(u64::MAX).unwrap();
        assert_eq!(rewound.steps, 11);
        assert_eq!(rewound.stop, StopReason::Rewound);
        assert!(stepper.program().is_pristine());
    }

    #[test]
    fn test_nested_loop_rewind() {
        let mut stepper = stepper("++[>+++[>++<-]<-]");
        let start = stepper.fingerprint();

        stepper.run_to_end().unwrap();
        assert_eq!(stepper.cell(2), 12);

        stepper.rewind(u64::MAX).unwrap();
        assert_eq!(stepper.fingerprint(), start);
        assert!(stepper.program().is_pristine());
    }

    #[test]
    fn test_empty_program() {
        let mut stepper = stepper("");
        assert_eq!(stepper.step(false).unwrap(), StepOutcome::Executed);
        assert!(stepper.at_end());
        assert_eq!(stepper.step(false).unwrap(), StepOutcome::Halted);

        stepper.step(true).unwrap();
        assert!(stepper.at_beginning());
    }

    #[test]
    fn test_comment_only_program() {
        let mut stepper = stepper("just words");
        assert!(stepper.program().is_empty());
        assert_eq!(stepper.run_to_end().unwrap().steps, 1);
    }

    #[test]
    fn test_run_step_limit() {
        let mut stepper = stepper("+[]");
        let summary = stepper.run(50).unwrap();
        assert_eq!(summary.steps, 50);
        assert_eq!(summary.stop, StopReason::StepLimit);
        assert!(!stepper.at_end());
    }

    #[test]
    fn test_rewind_step_limit() {
        let mut stepper = stepper("+>+>+");
        stepper.run_to_end().unwrap();

        let summary = stepper.rewind(2).unwrap();
        assert_eq!(summary.stop, StopReason::StepLimit);
        assert_eq!(stepper.pointer(), 1);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut stepper = stepper("+++[->+<]>[-]");
        let fresh = stepper.fingerprint();

        stepper.run(7).unwrap();
        stepper.reset();
        assert_eq!(stepper.fingerprint(), fresh);
        assert!(stepper.at_beginning());
        assert!(stepper.tape().is_blank());
        assert!(stepper.program().is_pristine());
    }

    #[test]
    fn test_failed_load_keeps_program() {
        let mut stepper = stepper("+");
        stepper.step(false).unwrap();

        let err = stepper.load("]").unwrap_err();
        assert!(matches!(err, RuntimeError::Load(_)));
        assert_eq!(stepper.program().source(), "+");
        assert_eq!(stepper.cell(0), 1);
    }

    #[test]
    fn test_load_resets() {
        let mut stepper = stepper("+");
        stepper.step(false).unwrap();

        stepper.load(">").unwrap();
        assert!(stepper.at_beginning());
        assert!(stepper.tape().is_blank());
    }

    #[test]
    fn test_position_in_source() {
        let mut stepper = stepper(" +\n>");
        assert_eq!(stepper.position_in_source(), None);

        stepper.step(false).unwrap();
        assert_eq!(stepper.position_in_source(), Some(3));
    }

    #[test]
    fn test_tape_view() {
        let mut stepper = stepper(">++");
        stepper.run_to_end().unwrap();
        assert_eq!(stepper.tape_view(0, 3).to_string(), "|  0|  2|  0|\n       ^");
    }

    #[test]
    fn test_fingerprint_tracks_loop_close_as_head() {
        let mut stepper = unfolded("+[-]");
        stepper.run(3).unwrap();
        assert_eq!(stepper.current_kind(), TokenKind::LoopClose);

        let at_close = stepper.fingerprint();
        let head = Fingerprint::compute(stepper.tape(), 0, TokenKind::LoopOpen, 1000);
        assert_eq!(at_close, head);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_width_and_value() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=1 << 31).prop_flat_map(|width| (Just(width), 0..width))
    }

    proptest! {
        #[test]
        fn test_wrapped_stays_in_range((width, value) in arb_width_and_value(), delta in any::<i64>()) {
            let stepper = Stepper::new(Config::new(width, true).unwrap()).unwrap();
            prop_assert!(stepper.wrapped(value, delta) < width);
            prop_assert!(stepper.unwrapped(value, delta) < width);
        }

        #[test]
        fn test_unwrapped_inverts_wrapped((width, value) in arb_width_and_value(), delta in any::<i64>()) {
            let stepper = Stepper::new(Config::new(width, true).unwrap()).unwrap();
            prop_assert_eq!(stepper.unwrapped(stepper.wrapped(value, delta), delta), value);
        }

        #[test]
        fn test_folded_add_matches_single_steps(count in 1usize..600, up in any::<bool>()) {
            let symbol = if up { "+" } else { "-" };
            let source = symbol.repeat(count);

            let mut folded = Stepper::from_source(&source, Config::default()).unwrap();
            let mut plain = Stepper::from_source(&source, Config::default().with_optimize(false)).unwrap();
            folded.run_to_end().unwrap();
            plain.run_to_end().unwrap();
            prop_assert_eq!(folded.cell(0), plain.cell(0));
        }
    }
}
