use thiserror::Error;

use crate::{CellCount, Coord2};

/// Rejected board configuration, raised before any board exists.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, requested {mines} but at most {max} fit")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("Board of {rows}x{cols} cells exceeds the coordinate range")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("Preset layout does not fit the configuration or mines the first move")]
    LayoutMismatch,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid coordinates {coords:?} for a board of size {size:?}")]
    InvalidCoords { coords: Coord2, size: Coord2 },
}

pub type Result<T> = core::result::Result<T, GameError>;
