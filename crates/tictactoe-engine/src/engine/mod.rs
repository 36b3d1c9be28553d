//! Match logic built on top of the [`core`](crate::core) board types.
//!
//! - [`MatchController`] - the match state machine (marker choice, turns, scoring, champion)
//! - [`Player`] / [`PlayerRole`] - participants and their running scores
//! - [`MoveSelector`] - the computer's seeded move source
//! - [`MoveSeed`] - seed for reproducible computer play
//!
//! # Match Flow
//!
//! 1. The human picks `X` or `O`; the computer gets the other marker
//! 2. `X` moves first; turns alternate until a line is completed or the board is full
//! 3. The round winner scores a point (ties score nothing)
//! 4. The first player to [`WINS_LIMIT`] round wins is the champion
//!
//! Under [`MarkerPolicy::PerRound`] step 1 repeats before every round.

pub use self::{match_controller::*, move_selector::*, player::*};

mod match_controller;
mod move_selector;
mod player;
