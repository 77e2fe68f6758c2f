//! Machine state for revbf

use crate::tape::Tape;

/// Mutable machine registers and storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineState {
    /// Token index of the next forward step
    pub pc: usize,

    /// Addressed tape cell
    pub pointer: usize,

    /// Cell storage
    pub tape: Tape,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the fresh-load state
    pub fn clear(&mut self) {
        self.pc = 0;
        self.pointer = 0;
        self.tape.clear();
    }
}

/// Result of a single `step` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction boundary was crossed
    Executed,
    /// Input had no data; nothing changed, retry the same step later
    InputPending,
    /// Forward step at the end of the program; nothing changed
    Halted,
}

/// Why a run or rewind stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Reached the End sentinel
    Finished,
    /// Reached the beginning (rewind)
    Rewound,
    /// Waiting for input
    InputPending,
    /// Step budget spent
    StepLimit,
}

/// Summary of a multi-step run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps that crossed an instruction boundary
    pub steps: u64,

    /// Why the run stopped
    pub stop: StopReason,
}

/// Result of running a source text to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Text written by Output instructions
    pub output: String,

    /// Executed forward steps
    pub steps: u64,

    pub stop: StopReason,
}

impl ExecutionResult {
    /// Finished at the End sentinel
    pub fn finished(&self) -> bool {
        self.stop == StopReason::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear() {
        let mut state = MachineState::new();
        state.pc = 5;
        state.pointer = 2;
        state.tape.set(2, 9);

        state.clear();
        assert_eq!(state, MachineState::new());
    }
}
