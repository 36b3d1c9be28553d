use std::fmt;

/// The symbol occupying a board cell.
///
/// `PlayerA` is drawn as `X` and always moves first in a round; `PlayerB` is
/// drawn as `O`. Which of them the human plays is decided per round (or per
/// match) by the match controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Marker {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Marker {
    /// The marker that opens every round.
    pub const FIRST_TO_MOVE: Self = Marker::PlayerA;

    /// Markers a player may hold, in display order.
    pub const PLAYABLE: [Self; 2] = [Marker::PlayerA, Marker::PlayerB];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Marker::Empty => ' ',
            Marker::PlayerA => 'X',
            Marker::PlayerB => 'O',
        }
    }

    /// Parses a player symbol (`x`/`o`, case-insensitive).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "X" => Some(Marker::PlayerA),
            "O" => Some(Marker::PlayerB),
            _ => None,
        }
    }

    /// Returns the complementary marker. `Empty` has no opponent.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Marker::Empty => Marker::Empty,
            Marker::PlayerA => Marker::PlayerB,
            Marker::PlayerB => Marker::PlayerA,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single board position and its occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    marker: Marker,
}

impl Cell {
    pub const EMPTY: Self = Cell {
        marker: Marker::Empty,
    };

    #[must_use]
    pub const fn marker(self) -> Marker {
        self.marker
    }

    #[must_use]
    pub const fn is_unmarked(self) -> bool {
        matches!(self.marker, Marker::Empty)
    }

    #[must_use]
    pub const fn is_marked(self) -> bool {
        !self.is_unmarked()
    }

    pub(crate) fn mark(&mut self, marker: Marker) {
        self.marker = marker;
    }
}
