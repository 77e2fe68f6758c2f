//! # revbf Runtime
//!
//! Reversible stepping virtual machine for revbf programs.
//!
//! The [`Stepper`] executes one instruction per `step(false)` call and undoes
//! exactly one per `step(true)`, including data-dependent loop control flow.
//! Its visible state reduces to a [`Fingerprint`], so two points in an
//! execution can be compared for equality.
//!
//! ## Features
//!
//! - **Bidirectional stepping**: every forward step has an exact inverse
//! - **Loop reversal**: per-loop-site pass stacks replay data-dependent flow
//! - **Deferred input**: an empty input source pauses without side effects
//! - **Configurable cells**: any modulus from 1 up
//!
//! ## Example
//!
//! ```rust
//! use revbf_runtime::{Stepper, SharedIo};
//! use revbf_spec::Config;
//!
//! let mut stepper = Stepper::from_source("++>+++<[->+<]>.", Config::default()).unwrap();
//! let io = SharedIo::new();
//! stepper.attach(&io);
//!
//! let before = stepper.fingerprint();
//! stepper.step(false).unwrap();
//! stepper.step(true).unwrap();
//! assert_eq!(stepper.fingerprint(), before);
//!
//! stepper.run_to_end().unwrap();
//! assert_eq!(stepper.cell(1), 5);
//! ```

pub mod error;
pub mod fingerprint;
pub mod io;
pub mod state;
pub mod stepper;
pub mod tape;

pub use error::{Result, RuntimeError};
pub use fingerprint::Fingerprint;
pub use io::{cell_char, BufferedIo, InputSource, NoInput, NullOutput, OutputSink, SharedIo};
pub use state::{ExecutionResult, MachineState, RunSummary, StepOutcome, StopReason};
pub use stepper::Stepper;
pub use tape::{Tape, TapeView};

use revbf_spec::Config;

/// Simple execution helper
///
/// Loads `source` with the default configuration, feeds the characters of
/// `input` as input values, and runs forward until the program finishes or
/// the input runs dry.
pub fn run(source: &str, input: &str) -> Result<ExecutionResult> {
    run_with(source, input, Config::default())
}

/// [`run`] with an explicit configuration
pub fn run_with(source: &str, input: &str, config: Config) -> Result<ExecutionResult> {
    let mut stepper = Stepper::from_source(source, config)?;
    let io = SharedIo::with_input(input);
    stepper.attach(&io);

    let summary = stepper.run_to_end()?;
    Ok(ExecutionResult {
        output: io.take_output(),
        steps: summary.steps,
        stop: summary.stop,
    })
}
