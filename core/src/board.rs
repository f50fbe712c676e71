use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl BoardState {
    /// Indicates the game has ended and no moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A minefield together with the player's progress on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Places mines where `mine_mask` is set and computes every neighbor count.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let size: Coord2 = (
            Coord::try_from(rows).map_err(|_| GameError::InvalidCoords)?,
            Coord::try_from(cols).map_err(|_| GameError::InvalidCoords)?,
        );

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            if mine_mask[[row, col]] {
                Cell::mine()
            } else {
                // both axes were checked to fit in Coord above
                let count = NeighborIter::new((row as Coord, col as Coord), size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Cell::safe(count as u8)
            }
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Ok(Self {
            cells,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
            state: BoardState::default(),
            triggered_mine: None,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions are validated on construction
        (rows as Coord, cols as Coord)
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Reveals a hidden cell, flood-filling outwards from cells without adjacent mines.
    ///
    /// Revealed or flagged cells and finished games are left untouched and report [`RevealOutcome::NoChange`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() || !self[coords].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self[coords].is_mine() {
            self.cells[coords.to_nd_index()].set_revealed();
            self.triggered_mine = Some(coords);
            self.state = BoardState::Lost;
            self.reveal_all_mines();
            log::debug!("Mine hit at {:?}, game lost", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {:?}, {} cells opened", coords, opened);

        if self.check_win() {
            self.state = BoardState::Won;
            log::debug!("All {} safe cells revealed, game won", self.revealed_count);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Flags or unflags a hidden cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = if cell.toggle_flag() {
            self.flagged_count = self.flagged_count.saturating_add(1);
            MarkOutcome::Flagged
        } else {
            self.flagged_count = self.flagged_count.saturating_sub(1);
            MarkOutcome::Unflagged
        };
        log::debug!("Flag at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Whether every cell without a mine has been revealed.
    pub fn check_win(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let is_zero = {
                let cell = &mut self.cells[coords.to_nd_index()];
                if !cell.is_hidden() || cell.is_mine() {
                    continue;
                }
                cell.set_revealed();
                cell.neighbor_mines() == 0
            };
            self.revealed_count = self.revealed_count.saturating_add(1);
            opened += 1;
            log::trace!("Flood opened {:?}", coords);

            if is_zero {
                let cells = &self.cells;
                to_visit.extend(
                    cells
                        .iter_neighbors(coords)
                        .filter(|&pos| cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        opened
    }

    fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            cell.set_revealed();
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
