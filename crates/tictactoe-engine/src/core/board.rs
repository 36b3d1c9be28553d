use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};
use tracing::trace;

use crate::{InvalidPositionError, NoLegalMoveError};

use super::{
    marker::{Cell, Marker},
    position::{Position, WinLine},
};

/// Positions that are still free, in ascending order.
pub type UnmarkedPositions = ArrayVec<Position, { Position::COUNT }>;

/// The 3×3 playing grid.
///
/// All nine cells exist for the whole lifetime of the board; a reset only
/// clears their markers.
///
/// # Example
///
/// ```
/// use tictactoe_engine::{Board, Marker, Position};
///
/// let mut board = Board::new();
/// for index in [1, 2, 3] {
///     board.set(Position::new(index).unwrap(), Marker::PlayerA).unwrap();
/// }
///
/// assert_eq!(board.winner(), Some(Marker::PlayerA));
/// assert_eq!(board.unmarked_positions().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; Position::COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const EMPTY: Self = Board {
        cells: [Cell::EMPTY; Position::COUNT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub const fn cell(&self, position: Position) -> Cell {
        self.cells[position.slot()]
    }

    #[must_use]
    pub const fn get(&self, position: Position) -> Marker {
        self.cell(position).marker()
    }

    /// Places `marker` on an unmarked position.
    ///
    /// Callers are expected to pick from [`Self::unmarked_positions`]; the
    /// check here only turns a contract violation into an error.
    pub fn set(&mut self, position: Position, marker: Marker) -> Result<(), InvalidPositionError> {
        if marker.is_empty() {
            return Err(InvalidPositionError::EmptyMarker { position });
        }
        let cell = &mut self.cells[position.slot()];
        if cell.is_marked() {
            return Err(InvalidPositionError::Occupied { position });
        }
        cell.mark(marker);
        Ok(())
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    #[must_use]
    pub fn unmarked_positions(&self) -> UnmarkedPositions {
        Position::all()
            .filter(|position| self.cell(*position).is_unmarked())
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_marked())
    }

    /// Returns the marker that fills the first complete win line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Marker> {
        WinLine::ALL.into_iter().find_map(|line| {
            let [a, b, c] = line.positions().map(|position| self.get(position));
            (!a.is_empty() && a == b && b == c).then_some(a)
        })
    }

    #[must_use]
    pub fn someone_won(&self) -> bool {
        self.winner().is_some()
    }

    /// Iterates the board row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = [Marker; 3]> + '_ {
        self.cells
            .chunks_exact(3)
            .map(|row| [row[0].marker(), row[1].marker(), row[2].marker()])
    }

    /// Picks the computer's next move.
    ///
    /// Priority, first applicable wins:
    ///
    /// 1. complete a line holding two `computer` markers,
    /// 2. block a line holding two `human` markers,
    /// 3. take the center,
    /// 4. any unmarked position, chosen uniformly with `rng`.
    ///
    /// Lines are inspected in [`WinLine::ALL`] order.
    pub fn best_move_for<R>(
        &self,
        computer: Marker,
        human: Marker,
        rng: &mut R,
    ) -> Result<Position, NoLegalMoveError>
    where
        R: Rng + ?Sized,
    {
        if let Some(position) = self.completing_position(computer) {
            trace!(%position, "offensive move");
            return Ok(position);
        }
        if let Some(position) = self.completing_position(human) {
            trace!(%position, "defensive move");
            return Ok(position);
        }
        if self.cell(Position::CENTER).is_unmarked() {
            trace!("center move");
            return Ok(Position::CENTER);
        }
        let position = self
            .unmarked_positions()
            .choose(rng)
            .copied()
            .ok_or(NoLegalMoveError)?;
        trace!(%position, "random move");
        Ok(position)
    }

    /// Finds the free position of the first line holding exactly two `marker`s
    /// and one unmarked cell.
    fn completing_position(&self, marker: Marker) -> Option<Position> {
        if marker.is_empty() {
            return None;
        }
        WinLine::ALL.into_iter().find_map(|line| {
            let positions = line.positions();
            let owned = positions
                .iter()
                .filter(|position| self.get(**position) == marker)
                .count();
            let mut free = positions
                .into_iter()
                .filter(|position| self.cell(*position).is_unmarked());
            match (owned, free.next(), free.next()) {
                (2, Some(position), None) => Some(position),
                _ => None,
            }
        })
    }
}
