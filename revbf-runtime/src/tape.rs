//! Tape storage

use std::fmt;

/// Growable cell array; every cell past the stored prefix reads as 0
#[derive(Debug, Clone, Default)]
pub struct Tape {
    cells: Vec<u32>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    pub fn set(&mut self, index: usize, value: u32) {
        if index >= self.cells.len() {
            if value == 0 {
                return;
            }
            self.cells.resize(index + 1, 0);
        }
        self.cells[index] = value;
    }

    /// Zero every cell, keeping the allocation
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Stored cells with trailing zeros removed
    pub fn cells(&self) -> &[u32] {
        let used = self
            .cells
            .iter()
            .rposition(|&value| value != 0)
            .map_or(0, |last| last + 1);
        &self.cells[..used]
    }

    /// Nonzero cells with index below `window`, in index order
    pub fn nonzero_within(&self, window: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.cells
            .iter()
            .take(window)
            .copied()
            .enumerate()
            .filter(|&(_, value)| value != 0)
    }

    /// Every cell holds 0
    pub fn is_blank(&self) -> bool {
        self.cells().is_empty()
    }
}

impl PartialEq for Tape {
    fn eq(&self, other: &Self) -> bool {
        self.cells() == other.cells()
    }
}

impl Eq for Tape {}

/// Window of a tape with the pointer marked, one cell per column
///
/// ```text
/// |  0| 72|  0|  0|
///       ^
/// ```
pub struct TapeView<'a> {
    tape: &'a Tape,
    pointer: usize,
    start: usize,
    width: usize,
}

impl<'a> TapeView<'a> {
    pub fn new(tape: &'a Tape, pointer: usize, start: usize, width: usize) -> Self {
        Self {
            tape,
            pointer,
            start,
            width,
        }
    }
}

impl fmt::Display for TapeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.start..self.start + self.width;
        for index in range.clone() {
            write!(f, "|{:>3}", self.tape.get(index))?;
        }
        writeln!(f, "|")?;

        let marker = range
            .map(|index| if index == self.pointer { "   ^" } else { "    " })
            .collect::<String>();
        write!(f, "{}", marker.trim_end())
    }
}
