use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed dimensions and mine count of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    ) -> core::result::Result<Self, ConfigError> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// At least one cell must stay free of mines so the first move can be safe.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }

        let max = self.max_mines();
        if self.mines > max {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                max,
            });
        }

        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords {
                coords,
                size: self.size(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_classic_beginner_board() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        assert_eq!(config.total_cells(), 81);
        assert_eq!(config.safe_cells(), 71);
    }

    #[test]
    fn rejects_board_without_a_free_cell() {
        assert_eq!(
            GameConfig::new(1, 1, 1),
            Err(ConfigError::TooManyMines { mines: 1, max: 0 })
        );
        assert!(GameConfig::new(1, 1, 0).is_ok());
        assert!(GameConfig::new(3, 3, 8).is_ok());
        assert!(GameConfig::new(3, 3, 9).is_err());
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 0), Err(ConfigError::EmptyBoard));
        assert_eq!(GameConfig::new(5, 0, 0), Err(ConfigError::EmptyBoard));
    }

    #[test]
    fn deserialized_config_can_be_validated() {
        let config: GameConfig =
            serde_json::from_str(r#"{"rows":2,"cols":2,"mines":4}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyMines { mines: 4, max: 3 })
        );
    }

    #[test]
    fn coords_outside_the_board_are_rejected() {
        let config = GameConfig::new(2, 3, 1).unwrap();
        assert_eq!(config.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(
            config.validate_coords((2, 0)),
            Err(GameError::InvalidCoords {
                coords: (2, 0),
                size: (2, 3)
            })
        );
    }
}
