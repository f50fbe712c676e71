#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clicks::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod clicks;
mod error;
mod generator;
mod types;

/// Side of the default square board.
pub const BOARD_SIDE: Coord = 15;

/// Mines placed on the default board.
pub const DEFAULT_MINES: CellCount = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config, clamping it into something a board can be generated from.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows_clamped = rows.max(1);
        let cols_clamped = cols.max(1);
        let mines_clamped = mines.min(mult(rows_clamped, cols_clamped));
        if (rows_clamped, cols_clamped, mines_clamped) != (rows, cols, mines) {
            log::warn!(
                "Board config clamped from {}x{} with {} mines to {}x{} with {} mines",
                rows,
                cols,
                mines,
                rows_clamped,
                cols_clamped,
                mines_clamped
            );
        }
        Self::new_unchecked((rows_clamped, cols_clamped), mines_clamped)
    }

    /// Like [`BoardConfig::new`] but rejects invalid values instead of clamping them.
    pub fn try_new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub fn square(side: Coord, mines: CellCount) -> Self {
        Self::new((side, side), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked((BOARD_SIDE, BOARD_SIDE), DEFAULT_MINES)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flagged | Self::Unflagged => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
