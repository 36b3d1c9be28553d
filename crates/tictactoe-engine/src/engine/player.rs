use crate::Marker;

/// Which side of the table a player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum PlayerRole {
    #[display("human")]
    Human,
    #[display("computer")]
    Computer,
}

/// Resolves the marker a role plays given the human's choice.
///
/// The human gets what they chose; the computer gets the complement.
#[must_use]
pub const fn assign_marker(role: PlayerRole, human_choice: Marker) -> Marker {
    match role {
        PlayerRole::Human => human_choice,
        PlayerRole::Computer => human_choice.opponent(),
    }
}

/// A participant in a match and their running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    role: PlayerRole,
    marker: Marker,
    score: usize,
}

impl Player {
    /// Creates a player with no marker assigned yet and a zero score.
    #[must_use]
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            name: name.into(),
            role,
            marker: Marker::Empty,
            score: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn role(&self) -> PlayerRole {
        self.role
    }

    /// The marker this player holds, `Empty` until one is assigned.
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.marker
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    pub(crate) fn assign_marker(&mut self, human_choice: Marker) {
        self.marker = assign_marker(self.role, human_choice);
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// `"point"` for a score of one, `"points"` otherwise.
    #[must_use]
    pub const fn point_label(&self) -> &'static str {
        if self.score == 1 { "point" } else { "points" }
    }
}
