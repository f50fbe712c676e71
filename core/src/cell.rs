use serde::{Deserialize, Serialize};

/// One square of the minefield.
///
/// `is_mine` and `neighbor_mines` are fixed when the board is generated, only the revealed and flagged bits change
/// during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    neighbor_mines: u8,
}

impl Cell {
    pub(crate) const fn mine() -> Self {
        Self {
            is_mine: true,
            is_revealed: false,
            is_flagged: false,
            neighbor_mines: 0,
        }
    }

    pub(crate) const fn safe(neighbor_mines: u8) -> Self {
        Self {
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighbor_mines,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Mines in the 8-neighborhood, always 0 for mine cells.
    pub const fn neighbor_mines(self) -> u8 {
        self.neighbor_mines
    }

    /// Hidden and unflagged, the only state a reveal can act on.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub(crate) fn set_revealed(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.is_flagged = !self.is_flagged;
        self.is_flagged
    }
}
