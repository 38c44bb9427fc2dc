use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Pending -> Playing
/// - Pending -> Won (the first move clears the whole board)
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No mines placed yet, waiting for the first reveal
    #[default]
    Pending,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a single call did to the game as a whole.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Ongoing,
    Win,
    Loss,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

/// Player-visible view of one cell.
///
/// `is_mine` is only disclosed for revealed cells, and once the game is over
/// for mines and flagged cells. `neighbor_mines` is only set on revealed safe
/// cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub row: Coord,
    pub col: Coord,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub is_mine: Option<bool>,
    pub neighbor_mines: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResult {
    /// Every cell whose visible state changed, in the order it changed.
    pub changed_cells: Vec<CellSnapshot>,
    pub outcome: Outcome,
    pub transition: Option<Transition>,
}

impl RevealResult {
    pub fn has_update(&self) -> bool {
        !self.changed_cells.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResult {
    pub changed: bool,
    pub flags_placed: CellCount,
    /// The toggled cell after the change, if anything changed.
    pub cell: Option<CellSnapshot>,
}

/// One game from the first reveal to a win or a loss, replayable with `reset`.
#[derive(Clone, Debug)]
pub struct Session<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    board: Board,
    phase: Phase,
    flags_placed: CellCount,
    cells_revealed: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Session {
    /// Session with uniformly random layouts drawn from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomBoardGenerator::from_seed(seed))
    }
}

impl<G: BoardGenerator> Session<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            board: Board::empty(config.size()),
            phase: Phase::Pending,
            flags_placed: 0,
            cells_revealed: 0,
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.cells_revealed
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flags_placed as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, row: Coord, col: Coord) -> Result<CellSnapshot> {
        let coords = self.config.validate_coords((row, col))?;
        Ok(self.snapshot(coords))
    }

    /// Every cell, row by row, for a full repaint.
    pub fn snapshots(&self) -> impl Iterator<Item = CellSnapshot> + '_ {
        self.board
            .iter_cells()
            .map(|(coords, _)| self.snapshot(coords))
    }

    /// Reveals a cell, flooding through cells without neighboring mines.
    ///
    /// The first reveal of a session places the mines, never on the revealed
    /// cell. Revealed or flagged targets and finished games are left untouched.
    pub fn reveal(&mut self, row: Coord, col: Coord) -> Result<RevealResult> {
        let coords = self.config.validate_coords((row, col))?;
        let before = self.phase;

        if self.phase.is_finished() || !self.board[coords].is_revealable() {
            return Ok(RevealResult::default());
        }

        if self.phase.is_pending() {
            self.start(coords)?;
        }

        let mut changes = Vec::new();
        self.reveal_cells([coords], &mut changes);
        Ok(self.result(before, changes))
    }

    /// Reveals the hidden neighbors of a revealed number once as many of its
    /// neighbors are flagged. A misplaced flag makes this lose the game.
    pub fn chord(&mut self, row: Coord, col: Coord) -> Result<RevealResult> {
        let coords = self.config.validate_coords((row, col))?;
        let before = self.phase;

        let cell = self.board[coords];
        if self.phase != Phase::Playing || !cell.is_revealed || cell.neighbor_mines == 0 {
            return Ok(RevealResult::default());
        }

        let flagged = self
            .board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos].is_flagged)
            .count();
        if flagged != usize::from(cell.neighbor_mines) {
            return Ok(RevealResult::default());
        }

        let targets: Vec<_> = self
            .board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos].is_revealable())
            .collect();
        log::debug!("Chord at {:?} reveals {} neighbors", coords, targets.len());

        let mut changes = Vec::new();
        self.reveal_cells(targets, &mut changes);
        Ok(self.result(before, changes))
    }

    /// Flags or unflags a hidden cell; at most as many flags as mines.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<FlagResult> {
        let coords = self.config.validate_coords((row, col))?;

        let changed = if self.phase.is_finished() {
            false
        } else {
            let cell = self.board.cell_mut(coords);
            if cell.is_revealed {
                false
            } else if cell.is_flagged {
                cell.is_flagged = false;
                self.flags_placed -= 1;
                true
            } else if self.flags_placed < self.config.mines {
                cell.is_flagged = true;
                self.flags_placed += 1;
                true
            } else {
                log::debug!("Flag limit of {} reached", self.config.mines);
                false
            }
        };

        Ok(FlagResult {
            changed,
            flags_placed: self.flags_placed,
            cell: changed.then(|| self.snapshot(coords)),
        })
    }

    /// Starts over with a fresh, unmined board of the same configuration.
    pub fn reset(&mut self) {
        log::debug!("Reset from {:?}", self.phase);
        self.board = Board::empty(self.config.size());
        self.phase = Phase::Pending;
        self.flags_placed = 0;
        self.cells_revealed = 0;
        self.triggered_mine = None;
    }

    /// Places the mines around the first move, keeping flags set while pending.
    fn start(&mut self, first_move: Coord2) -> Result<()> {
        let mut board = self.generator.generate(self.config, first_move)?;
        if board.size() != self.config.size()
            || board.mine_count() != self.config.mines
            || board.contains_mine(first_move)
        {
            log::warn!("Generator produced a board that does not fit {:?}", self.config);
            return Err(ConfigError::LayoutMismatch.into());
        }

        let (rows, cols) = self.config.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let cell = board.cell_mut(coords);
                cell.is_revealed = false;
                cell.is_flagged = self.board[coords].is_flagged;
            }
        }

        self.board = board;
        self.phase = Phase::Playing;
        log::debug!("Game started at {:?}", first_move);
        Ok(())
    }

    /// Work-list flood fill, the revealable check doubles as the visited set.
    fn reveal_cells(
        &mut self,
        starts: impl IntoIterator<Item = Coord2>,
        changes: &mut Vec<CellSnapshot>,
    ) {
        let mut to_visit: Vec<Coord2> = starts.into_iter().collect();

        while let Some(coords) = to_visit.pop() {
            let cell = self.board[coords];
            if !cell.is_revealable() {
                continue;
            }

            self.board.cell_mut(coords).is_revealed = true;
            if cell.is_mine {
                log::debug!("Hit mine at {:?}", coords);
                self.triggered_mine = Some(coords);
                changes.push(self.snapshot(coords));
                self.end_game(false, changes);
                return;
            }

            self.cells_revealed += 1;
            changes.push(self.snapshot(coords));
            log::trace!("Revealed {:?}, neighbor mines: {}", coords, cell.neighbor_mines);

            if cell.neighbor_mines == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos].is_revealable()),
                );
            }
        }

        if self.cells_revealed == self.config.safe_cells() {
            self.end_game(true, changes);
        }
    }

    /// Flags every mine on a win, reveals every mine on a loss. Flag
    /// bookkeeping is left as the player had it.
    fn end_game(&mut self, won: bool, changes: &mut Vec<CellSnapshot>) {
        self.phase = if won { Phase::Won } else { Phase::Lost };
        log::debug!(
            "Game ended: {:?}, revealed {} of {} safe cells",
            self.phase,
            self.cells_revealed,
            self.config.safe_cells()
        );

        let marked: Vec<Coord2> = self
            .board
            .iter_cells()
            .filter(|(_, cell)| cell.is_mine || cell.is_flagged)
            .map(|(coords, _)| coords)
            .collect();

        for coords in marked {
            let cell = self.board.cell_mut(coords);
            if cell.is_mine {
                if won {
                    cell.is_flagged = true;
                } else {
                    cell.is_revealed = true;
                    cell.is_flagged = false;
                }
            }
            if self.triggered_mine != Some(coords) {
                changes.push(self.snapshot(coords));
            }
        }
    }

    fn result(&self, before: Phase, changed_cells: Vec<CellSnapshot>) -> RevealResult {
        let outcome = match (before.is_finished(), self.phase) {
            (false, Phase::Won) => Outcome::Win,
            (false, Phase::Lost) => Outcome::Loss,
            _ => Outcome::Ongoing,
        };
        let transition = (before != self.phase).then_some(Transition {
            from: before,
            to: self.phase,
        });

        RevealResult {
            changed_cells,
            outcome,
            transition,
        }
    }

    fn snapshot(&self, coords: Coord2) -> CellSnapshot {
        let cell = self.board[coords];
        let disclosed = cell.is_revealed
            || (self.phase.is_finished() && (cell.is_mine || cell.is_flagged));

        CellSnapshot {
            row: coords.0,
            col: coords.1,
            is_revealed: cell.is_revealed,
            is_flagged: cell.is_flagged,
            is_mine: disclosed.then_some(cell.is_mine),
            neighbor_mines: (cell.is_revealed && !cell.is_mine).then_some(cell.neighbor_mines),
        }
    }
}
