use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Full state of one cell, mine knowledge included.
///
/// `neighbor_mines` is only meaningful for cells without a mine. A cell is
/// never revealed and flagged at the same time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mines: u8,
}

impl Cell {
    /// Whether a reveal targeting this cell would do anything.
    pub const fn is_revealable(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

/// Rectangular grid of cells, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

/// Unchecked wire form, only turned into a `Board` through `TryFrom`.
#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl TryFrom<RawBoard> for Board {
    type Error = ConfigError;

    fn try_from(raw: RawBoard) -> core::result::Result<Self, Self::Error> {
        let (rows, cols) = raw.cells.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(ConfigError::BoardTooLarge { rows, cols });
        }

        let mines = raw.cells.iter().filter(|cell| cell.is_mine).count();
        if mines != usize::from(raw.mine_count) {
            return Err(ConfigError::LayoutMismatch);
        }

        Ok(Self {
            cells: raw.cells,
            mine_count: raw.mine_count,
        })
    }
}

impl Board {
    /// A board with no mines placed yet.
    pub fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Builds a board from known mine positions, duplicates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }
        board.compute_neighbor_mines();
        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if in_bounds(coords, size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords { coords, size })
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (saturate(rows), saturate(cols))
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        in_bounds(coords, self.size()).then(|| &self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    /// All cells with their coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine)
            .map(|(coords, _)| coords)
    }

    /// Marks a mine, returns `false` if one was already there.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_mut(coords);
        if cell.is_mine {
            return false;
        }
        cell.is_mine = true;
        self.mine_count += 1;
        true
    }

    pub(crate) fn compute_neighbor_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let count = if self[coords].is_mine {
                    0
                } else {
                    self.adjacent_mine_count(coords)
                };
                self.cell_mut(coords).neighbor_mines = count;
            }
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn counts_corner_mine() {
        let board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board[(0, 1)].neighbor_mines, 1);
        assert_eq!(board[(1, 0)].neighbor_mines, 1);
        assert_eq!(board[(1, 1)].neighbor_mines, 1);
        assert_eq!(board[(2, 2)].neighbor_mines, 0);
        assert_eq!(board[(0, 0)].neighbor_mines, 0);
    }

    #[test]
    fn counts_edge_and_interior_mines() {
        // . * .
        // . . .
        // * . *
        let board = board((3, 3), &[(0, 1), (2, 0), (2, 2)]);

        assert_eq!(board[(0, 0)].neighbor_mines, 1);
        assert_eq!(board[(1, 0)].neighbor_mines, 2);
        assert_eq!(board[(1, 1)].neighbor_mines, 3);
        assert_eq!(board[(1, 2)].neighbor_mines, 2);
        assert_eq!(board[(2, 1)].neighbor_mines, 2);
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let ring: alloc::vec::Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        let board = board((3, 3), &ring);

        assert_eq!(board.mine_count(), 8);
        assert_eq!(board[(1, 1)].neighbor_mines, 8);
        assert_eq!(board.safe_cell_count(), 1);
    }

    #[test]
    fn duplicate_mines_are_counted_once() {
        let board = board((2, 2), &[(1, 1), (1, 1)]);
        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.mine_coords().collect::<alloc::vec::Vec<_>>(), [(1, 1)]);
    }

    #[test]
    fn rejects_mines_outside_the_board() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(0, 2)]),
            Err(GameError::InvalidCoords {
                coords: (0, 2),
                size: (2, 2)
            })
        );
    }

    #[test]
    fn deserializing_keeps_a_valid_board() {
        let board = board((3, 4), &[(0, 1), (2, 3)]);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(serde_json::from_value::<Board>(json).unwrap(), board);
    }

    #[test]
    fn deserializing_rejects_oversized_board() {
        let oversized = serde_json::json!({
            "cells": Array2::<Cell>::default((265, 265)),
            "mine_count": 0,
        });
        assert!(serde_json::from_value::<Board>(oversized).is_err());
    }

    #[test]
    fn deserializing_rejects_wrong_mine_count() {
        let mut json = serde_json::to_value(board((2, 2), &[(0, 0)])).unwrap();
        json["mine_count"] = serde_json::json!(3);
        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn get_is_bounds_checked() {
        let board = Board::empty((2, 4));
        assert!(board.get((1, 3)).is_some());
        assert!(board.get((2, 0)).is_none());
        assert_eq!(board.size(), (2, 4));
    }
}
