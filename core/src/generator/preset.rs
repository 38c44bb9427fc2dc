use super::*;

/// Replays a known layout, e.g. for tests or for restoring a shared puzzle.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetBoardGenerator {
    board: Board,
}

impl PresetBoardGenerator {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Board::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl BoardGenerator for PresetBoardGenerator {
    fn generate(&mut self, config: GameConfig, excluded: Coord2) -> Result<Board> {
        config.validate()?;
        let excluded = config.validate_coords(excluded)?;

        if self.board.size() != config.size() || self.board.mine_count() != config.mines {
            log::warn!(
                "Preset layout is {:?} with {} mines, expected {:?} with {}",
                self.board.size(),
                self.board.mine_count(),
                config.size(),
                config.mines
            );
            return Err(ConfigError::LayoutMismatch.into());
        }
        if self.board.contains_mine(excluded) {
            log::warn!("Preset layout has a mine on the first move at {:?}", excluded);
            return Err(ConfigError::LayoutMismatch.into());
        }

        Ok(self.board.clone())
    }
}
