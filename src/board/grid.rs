//! Logical board dimensions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{PairsError, Result};

/// Logical board size.
///
/// Parsed from `WxH` tokens: `W` is the column count, `H` the row count.
///
/// ```
/// use rust_pairs::board::GridSize;
///
/// let grid: GridSize = "4x3".parse().unwrap();
/// assert_eq!((grid.rows, grid.cols), (3, 4));
/// assert_eq!(grid.total(), 12);
/// assert!("4by3".parse::<GridSize>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    /// Create a grid size.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Reject boards that cannot hold a single pair.
    pub fn validate(self) -> Result<Self> {
        if (self.rows as u64) * (self.cols as u64) < 2 {
            return Err(PairsError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

impl FromStr for GridSize {
    type Err = PairsError;

    fn from_str(token: &str) -> Result<Self> {
        let malformed = || PairsError::MalformedPreset {
            token: token.to_string(),
        };

        let (w, h) = token
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(malformed)?;
        let cols = w.trim().parse::<u32>().map_err(|_| malformed())?;
        let rows = h.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok(Self { rows, cols })
    }
}
