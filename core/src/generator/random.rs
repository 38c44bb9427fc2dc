use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Rejection sampling over the whole grid: draw a cell uniformly, keep it if it
/// is neither a mine yet nor the excluded cell, repeat until every mine is placed.
///
/// The configuration is checked up front, a board with no room left besides
/// the excluded cell is refused instead of sampled forever.
pub fn generate<R: Rng>(config: GameConfig, excluded: Coord2, rng: &mut R) -> Result<Board> {
    config.validate()?;
    let excluded = config.validate_coords(excluded)?;

    let mut board = Board::empty(config.size());
    let mut attempts: u64 = 0;
    while board.mine_count() < config.mines {
        attempts += 1;
        let coords = (rng.random_range(0..config.rows), rng.random_range(0..config.cols));
        if coords == excluded {
            continue;
        }
        board.place_mine(coords);
    }
    board.compute_neighbor_mines();

    log::debug!(
        "Generated {}x{} board with {} mines avoiding {:?} after {} draws",
        config.rows,
        config.cols,
        board.mine_count(),
        excluded,
        attempts
    );
    Ok(board)
}

/// Purely random generation, only guaranteeing the first revealed cell is safe.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl RandomBoardGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig, excluded: Coord2) -> Result<Board> {
        generate(config, excluded, &mut self.rng)
    }
}
