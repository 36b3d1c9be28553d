use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{Board, Marker, NoLegalMoveError, Position};

/// The computer's move source: the board heuristic plus a seeded random
/// fallback.
///
/// Two selectors created from the same [`MoveSeed`] make identical choices
/// on identical boards.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    seed: MoveSeed,
    rng: Pcg32,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector {
    /// Creates a selector seeded from the thread-local random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: MoveSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> MoveSeed {
        self.seed
    }

    /// Chooses a move for the `computer` marker. See [`Board::best_move_for`].
    pub fn select(
        &mut self,
        board: &Board,
        computer: Marker,
        human: Marker,
    ) -> Result<Position, NoLegalMoveError> {
        let position = board.best_move_for(computer, human, &mut self.rng)?;
        debug!(%computer, %position, "computer selected move");
        Ok(position)
    }
}

/// Seed for the computer's random fallback moves.
///
/// Serialized (and parsed) as a 32-character hexadecimal string.
///
/// # Example
///
/// ```
/// use tictactoe_engine::MoveSeed;
///
/// let seed: MoveSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdef0123456789abcdef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: {reason}")]
pub struct ParseMoveSeedError {
    input: String,
    reason: &'static str,
}

impl MoveSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for MoveSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for MoveSeed {
    type Err = ParseMoveSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ParseMoveSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error("expected 32 characters"));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error("not a hexadecimal number"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for MoveSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoveSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<MoveSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MoveSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        MoveSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::tests::board;

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];

    #[test]
    fn test_serialize_is_big_endian_hex() {
        let seed = MoveSeed::from_bytes(SEQUENTIAL);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let zeros = serde_json::to_string(&MoveSeed::from_bytes([0; 16])).unwrap();
        assert_eq!(zeros, "\"00000000000000000000000000000000\"");
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: MoveSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed, MoveSeed::from_bytes(SEQUENTIAL));
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
        ] {
            let err = input.parse::<MoveSeed>().unwrap_err();
            assert!(
                err.to_string().contains("invalid hex seed"),
                "{input:?}: {err}"
            );
        }

        let result: Result<MoveSeed, _> = serde_json::from_str("\"zz\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_parse_roundtrip_keeps_selection() {
        let seed: MoveSeed = rand::rng().random();
        let reparsed: MoveSeed = seed.to_string().parse().unwrap();

        // Center taken and no pairs: every pick goes through the random fallback.
        let board = board("X.. .O. ...");
        let mut selector1 = MoveSelector::with_seed(seed);
        let mut selector2 = MoveSelector::with_seed(reparsed);
        for _ in 0..20 {
            assert_eq!(
                selector1.select(&board, Marker::PlayerB, Marker::PlayerA),
                selector2.select(&board, Marker::PlayerB, Marker::PlayerA),
            );
        }
    }

    #[test]
    fn test_selector_reports_seed() {
        let seed = MoveSeed::from_bytes(SEQUENTIAL);
        assert_eq!(MoveSelector::with_seed(seed).seed(), seed);
        assert_eq!(seed.to_bytes(), SEQUENTIAL);
    }
}
