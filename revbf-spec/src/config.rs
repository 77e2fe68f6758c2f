//! # Configuration for revbf
//!
//! Cell width, folding, and fingerprint parameters shared by the tokenizer
//! and the stepper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of distinct cell values (8-bit cells)
pub const DEFAULT_CELL_WIDTH: u32 = 256;

/// Default number of tape cells covered by a state fingerprint
pub const DEFAULT_FINGERPRINT_WINDOW: usize = 1000;

/// Largest supported cell size in bits
pub const MAX_CELL_BITS: u8 = 31;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of distinct cell values; cells hold `0..cell_width`
    pub cell_width: u32,
    /// Fold runs of `+`/`-` and `<`/`>` and the `[-]` idiom at load time
    pub optimize: bool,
    /// Tape cells (from index 0) included in a state fingerprint
    pub fingerprint_window: usize,
}

impl Config {
    /// Default configuration: 8-bit cells, folding on, 1000-cell fingerprint
    pub const DEFAULT: Self = Self {
        cell_width: DEFAULT_CELL_WIDTH,
        optimize: true,
        fingerprint_window: DEFAULT_FINGERPRINT_WINDOW,
    };

    /// Create a new configuration with validation
    pub const fn new(cell_width: u32, optimize: bool) -> Result<Self, ConfigError> {
        if cell_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }

        Ok(Self {
            cell_width,
            optimize,
            fingerprint_window: DEFAULT_FINGERPRINT_WINDOW,
        })
    }

    /// Configuration with `2^bits` cell values
    pub const fn with_cell_bits(bits: u8) -> Result<Self, ConfigError> {
        if bits == 0 || bits > MAX_CELL_BITS {
            return Err(ConfigError::CellBitsOutOfRange(bits));
        }

        Self::new(1u32 << bits, true)
    }

    /// Same configuration with folding switched on or off
    #[must_use]
    pub const fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Same configuration with a different fingerprint window
    #[must_use]
    pub const fn with_fingerprint_window(mut self, cells: usize) -> Self {
        self.fingerprint_window = cells;
        self
    }

    /// Largest value a cell can hold
    #[inline]
    pub const fn max_cell(&self) -> u32 {
        self.cell_width - 1
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ cells: 0..{}, optimize: {}, fingerprint window: {} cells }}",
            self.cell_width, self.optimize, self.fingerprint_window,
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Cells must be able to hold at least one value
    ZeroCellWidth,
    /// Cell bits must be in range [1, 31]
    CellBitsOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCellWidth => {
                write!(f, "cell_width must be positive")
            }
            ConfigError::CellBitsOutOfRange(bits) => {
                write!(f, "cell bits must be in range [1, {}], got {}", MAX_CELL_BITS, bits)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
