use crate::InvalidPositionError;

/// A board position, numbered 1 through 9 in row-major order.
///
/// ```text
///  1 | 2 | 3
/// ---+---+---
///  4 | 5 | 6
/// ---+---+---
///  7 | 8 | 9
/// ```
///
/// # Example
///
/// ```
/// use tictactoe_engine::Position;
///
/// let center = Position::new(5).unwrap();
/// assert_eq!(center, Position::CENTER);
/// assert!(Position::new(10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct Position(u8);

impl Position {
    /// Number of positions on the board.
    pub const COUNT: usize = 9;

    /// The center square, favored by the computer when no tactic applies.
    pub const CENTER: Self = Position(5);

    /// Creates a position from its 1-based number.
    pub const fn new(index: i64) -> Result<Self, InvalidPositionError> {
        if index < 1 || index > 9 {
            return Err(InvalidPositionError::OutOfRange { index });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index as u8;
        Ok(Position(index))
    }

    /// Returns the 1-based number of this position.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Iterates all positions in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=9).map(Position)
    }
}

impl TryFrom<i64> for Position {
    type Error = InvalidPositionError;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Position> for i64 {
    fn from(position: Position) -> Self {
        i64::from(position.0)
    }
}

/// One of the eight position triples that wins a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// All win lines in scan order: rows, then columns, then diagonals.
    ///
    /// [`Board::winner`](super::Board::winner) and the move heuristic report the first
    /// matching line in this order.
    pub const ALL: [Self; 8] = [
        WinLine::new(1, 2, 3),
        WinLine::new(4, 5, 6),
        WinLine::new(7, 8, 9),
        WinLine::new(2, 5, 8),
        WinLine::new(1, 4, 7),
        WinLine::new(3, 6, 9),
        WinLine::new(1, 5, 9),
        WinLine::new(3, 5, 7),
    ];

    const fn new(a: u8, b: u8, c: u8) -> Self {
        WinLine([Position(a), Position(b), Position(c)])
    }

    #[must_use]
    pub const fn positions(self) -> [Position; 3] {
        self.0
    }
}
