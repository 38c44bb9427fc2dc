use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Produces the mined board for a session once the first move is known.
pub trait BoardGenerator {
    /// Places `config.mines` mines on a fresh board, never on `excluded`, and
    /// fills in the neighbor counts.
    fn generate(&mut self, config: GameConfig, excluded: Coord2) -> Result<Board>;
}

impl<G: BoardGenerator + ?Sized> BoardGenerator for &mut G {
    fn generate(&mut self, config: GameConfig, excluded: Coord2) -> Result<Board> {
        (**self).generate(config, excluded)
    }
}
