use ndarray::Array2;

use super::*;

/// Uniform mine placement: draws random coordinates and retries whenever one already holds a mine.
///
/// There is no safe-first-click guarantee, any cell may hold a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RejectionSampler {
    fn generate(self, config: BoardConfig) -> Board {
        use rand::prelude::*;

        let config = BoardConfig::new(config.size, config.mines);
        let (rows, cols) = config.size;
        let total_cells = config.total_cells();

        // optimize for full boards
        if config.mines >= total_cells {
            let mine_mask = Array2::from_elem(config.size.to_nd_index(), true);
            return board_from_mask(&mine_mask, config);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut collisions: u32 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let slot = &mut mine_mask[coords.to_nd_index()];
            if *slot {
                collisions += 1;
                continue;
            }
            *slot = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} board, {} collisions resampled",
            mines_placed,
            rows,
            cols,
            collisions
        );
        board_from_mask(&mine_mask, config)
    }
}

fn board_from_mask(mine_mask: &Array2<bool>, config: BoardConfig) -> Board {
    match Board::from_mine_mask(mine_mask) {
        Ok(board) => board,
        // the config was clamped to a non-empty size that fits in Coord
        Err(err) => unreachable!("invalid mask for {:?}: {}", config, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(board: &Board, (row, col): Coord2) -> u8 {
        let (rows, cols) = board.size();
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
                if (r, c) != (row, col) && board[(r, c)].is_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..32 {
            let board = RejectionSampler::new(seed).generate(BoardConfig::default());

            let mines = board.iter().filter(|(_, cell)| cell.is_mine()).count();
            assert_eq!(mines, 20);
            assert_eq!(board.total_mines(), 20);
        }
    }

    #[test]
    fn neighbor_counts_match_brute_force() {
        for seed in 0..8 {
            let board = RejectionSampler::new(seed).generate(BoardConfig::square(15, 60));

            for (coords, cell) in board.iter() {
                if cell.is_mine() {
                    assert_eq!(cell.neighbor_mines(), 0);
                } else {
                    assert_eq!(cell.neighbor_mines(), brute_force_count(&board, coords));
                }
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RejectionSampler::new(42).generate(BoardConfig::default());
        let b = RejectionSampler::new(42).generate(BoardConfig::default());

        assert_eq!(a, b);
    }

    #[test]
    fn fresh_board_is_untouched() {
        let board = RejectionSampler::new(7).generate(BoardConfig::default());

        assert_eq!(board.state(), BoardState::Playing);
        assert!(board.iter().all(|(_, cell)| cell.is_hidden()));
        assert_eq!(board.mines_left(), 20);
    }

    #[test]
    fn full_board_is_filled_without_sampling() {
        let board = RejectionSampler::new(1).generate(BoardConfig::new((3, 3), 9));

        assert_eq!(board.total_mines(), 9);
        assert!(board.iter().all(|(_, cell)| cell.is_mine()));
    }

    #[test]
    fn excess_mines_are_clamped() {
        let board = RejectionSampler::new(1).generate(BoardConfig::new_unchecked((2, 2), 10));

        assert_eq!(board.total_mines(), 4);
    }
}
