use tracing::{debug, info};

use crate::{Board, Marker, MatchError, Position};

use super::{
    move_selector::MoveSelector,
    player::{Player, PlayerRole},
};

/// Round wins needed to become champion.
pub const WINS_LIMIT: usize = 5;

/// When the human picks a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum MarkerPolicy {
    /// Before every round and every rematch.
    #[default]
    PerRound,
    /// Once, before the first round; kept across rounds and rematches.
    PerMatch,
}

/// How a finished round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RoundOutcome {
    #[display("{_0} won")]
    Won(PlayerRole),
    #[display("tie")]
    Tie,
}

impl RoundOutcome {
    #[must_use]
    pub const fn winner(self) -> Option<PlayerRole> {
        match self {
            RoundOutcome::Won(role) => Some(role),
            RoundOutcome::Tie => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum MatchPhase {
    #[display("awaiting marker choice")]
    AwaitingMarkerChoice,
    #[display("in round ({turn} to move)")]
    InRound { turn: Marker },
    #[display("round over ({outcome})")]
    RoundOver { outcome: RoundOutcome },
    #[display("awaiting continue")]
    AwaitingContinue,
    #[display("match over")]
    MatchOver { champion: Option<PlayerRole> },
}

/// Drives a first-to-[`WINS_LIMIT`] match between a human and the computer.
///
/// The controller owns the board, both players and the computer's move
/// source. It performs no I/O: the caller asks it for the current
/// [`MatchPhase`], gathers whatever input that phase needs, and feeds it back
/// through the matching operation.
///
/// # Phases
///
/// ```text
/// AwaitingMarkerChoice ──choose_marker──▶ InRound ──(win or full board)──▶ RoundOver
///          ▲                                ▲                                  │
///          │ (per-round policy)             │ (per-match policy)         finish_round
///          └──────────── continue_match(true) / rematch ◀── AwaitingContinue ◀─┤
///                                                                              ▼
///                                                                          MatchOver
/// ```
///
/// # Example
///
/// ```
/// use tictactoe_engine::{MarkerPolicy, Marker, MatchController, MoveSelector, Position};
///
/// let mut game = MatchController::new("Ada", "Joshua", MarkerPolicy::PerRound, MoveSelector::new());
/// game.choose_marker(Marker::PlayerA).unwrap();
///
/// game.play_human_move(Position::new(1).unwrap()).unwrap();
/// let reply = game.play_computer_move().unwrap();
/// assert_eq!(reply, Position::CENTER);
/// ```
#[derive(Debug, Clone)]
pub struct MatchController {
    board: Board,
    human: Player,
    computer: Player,
    phase: MatchPhase,
    policy: MarkerPolicy,
    move_selector: MoveSelector,
    rounds_played: usize,
}

impl MatchController {
    #[must_use]
    pub fn new(
        human_name: impl Into<String>,
        computer_name: impl Into<String>,
        policy: MarkerPolicy,
        move_selector: MoveSelector,
    ) -> Self {
        let human = Player::new(human_name, PlayerRole::Human);
        let computer = Player::new(computer_name, PlayerRole::Computer);
        info!(
            human = human.name(),
            computer = computer.name(),
            ?policy,
            "match created"
        );
        Self {
            board: Board::new(),
            human,
            computer,
            phase: MatchPhase::AwaitingMarkerChoice,
            policy,
            move_selector,
            rounds_played: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn human(&self) -> &Player {
        &self.human
    }

    #[must_use]
    pub fn computer(&self) -> &Player {
        &self.computer
    }

    #[must_use]
    pub fn player(&self, role: PlayerRole) -> &Player {
        match role {
            PlayerRole::Human => &self.human,
            PlayerRole::Computer => &self.computer,
        }
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Rounds completed since the match (or the last rematch) began.
    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// The role whose turn it is, while a round is in progress.
    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerRole> {
        match self.phase {
            MatchPhase::InRound { turn } => self.role_of(turn),
            _ => None,
        }
    }

    /// The champion once the match is over; `None` while playing or when the
    /// human stopped early.
    #[must_use]
    pub fn champion(&self) -> Option<&Player> {
        match self.phase {
            MatchPhase::MatchOver {
                champion: Some(role),
            } => Some(self.player(role)),
            _ => None,
        }
    }

    /// Records the human's marker; the computer takes the other one.
    pub fn choose_marker(&mut self, choice: Marker) -> Result<(), MatchError> {
        self.expect_phase("choose a marker", MatchPhase::is_awaiting_marker_choice)?;
        if choice.is_empty() {
            return Err(MatchError::InvalidMarkerChoice);
        }
        self.human.assign_marker(choice);
        self.computer.assign_marker(choice);
        debug!(
            human = %self.human.marker(),
            computer = %self.computer.marker(),
            "markers assigned"
        );
        self.start_round();
        Ok(())
    }

    /// Plays the human's move. The position must be unmarked.
    pub fn play_human_move(&mut self, position: Position) -> Result<(), MatchError> {
        self.expect_turn("play a human move", PlayerRole::Human)?;
        self.place(PlayerRole::Human, position)
    }

    /// Lets the computer pick and play its move, returning the position.
    pub fn play_computer_move(&mut self) -> Result<Position, MatchError> {
        self.expect_turn("play a computer move", PlayerRole::Computer)?;
        let position = self
            .move_selector
            .select(&self.board, self.computer.marker(), self.human.marker())?;
        self.place(PlayerRole::Computer, position)?;
        Ok(position)
    }

    /// Leaves a finished round, ending the match if someone reached
    /// [`WINS_LIMIT`].
    pub fn finish_round(&mut self) -> Result<MatchPhase, MatchError> {
        self.expect_phase("finish the round", MatchPhase::is_round_over)?;
        let champion = [PlayerRole::Human, PlayerRole::Computer]
            .into_iter()
            .find(|role| self.player(*role).score() >= WINS_LIMIT);
        self.phase = match champion {
            Some(role) => {
                info!(champion = self.player(role).name(), "match over");
                MatchPhase::MatchOver {
                    champion: Some(role),
                }
            }
            None => MatchPhase::AwaitingContinue,
        };
        Ok(self.phase)
    }

    /// Starts the next round, or ends the match without a champion when
    /// `proceed` is false.
    pub fn continue_match(&mut self, proceed: bool) -> Result<(), MatchError> {
        self.expect_phase("continue the match", MatchPhase::is_awaiting_continue)?;
        if proceed {
            self.prepare_next_round();
        } else {
            info!(rounds = self.rounds_played, "match abandoned");
            self.phase = MatchPhase::MatchOver { champion: None };
        }
        Ok(())
    }

    /// Starts a new match with the same players and both scores at zero.
    pub fn rematch(&mut self) -> Result<(), MatchError> {
        self.expect_phase("start a rematch", MatchPhase::is_match_over)?;
        self.human.reset_score();
        self.computer.reset_score();
        self.rounds_played = 0;
        info!("rematch");
        self.prepare_next_round();
        Ok(())
    }

    fn role_of(&self, marker: Marker) -> Option<PlayerRole> {
        if marker.is_empty() {
            None
        } else if self.human.marker() == marker {
            Some(PlayerRole::Human)
        } else if self.computer.marker() == marker {
            Some(PlayerRole::Computer)
        } else {
            None
        }
    }

    /// Clears the board and hands the first move to [`Marker::FIRST_TO_MOVE`].
    fn start_round(&mut self) {
        self.board.reset();
        self.phase = MatchPhase::InRound {
            turn: Marker::FIRST_TO_MOVE,
        };
        debug!(phase = %self.phase, "round started");
    }

    /// Moves on to the next round (or the first round of a rematch).
    ///
    /// Under [`MarkerPolicy::PerRound`] the human chooses a marker again first.
    fn prepare_next_round(&mut self) {
        match self.policy {
            MarkerPolicy::PerRound => {
                self.board.reset();
                self.phase = MatchPhase::AwaitingMarkerChoice;
            }
            MarkerPolicy::PerMatch => self.start_round(),
        }
    }

    fn place(&mut self, role: PlayerRole, position: Position) -> Result<(), MatchError> {
        let marker = self.player(role).marker();
        self.board.set(position, marker)?;
        debug!(%role, %position, %marker, "move played");

        if self.board.someone_won() || self.board.is_full() {
            let outcome = self.settle_round();
            self.phase = MatchPhase::RoundOver { outcome };
        } else {
            self.phase = MatchPhase::InRound {
                turn: marker.opponent(),
            };
        }
        Ok(())
    }

    fn settle_round(&mut self) -> RoundOutcome {
        self.rounds_played += 1;
        let outcome = match self.board.winner().and_then(|marker| self.role_of(marker)) {
            Some(PlayerRole::Human) => {
                self.human.increment_score();
                RoundOutcome::Won(PlayerRole::Human)
            }
            Some(PlayerRole::Computer) => {
                self.computer.increment_score();
                RoundOutcome::Won(PlayerRole::Computer)
            }
            None => RoundOutcome::Tie,
        };
        info!(
            round = self.rounds_played,
            %outcome,
            human_score = self.human.score(),
            computer_score = self.computer.score(),
            "round over"
        );
        outcome
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        is_expected: fn(&MatchPhase) -> bool,
    ) -> Result<(), MatchError> {
        if is_expected(&self.phase) {
            Ok(())
        } else {
            Err(MatchError::UnexpectedPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn expect_turn(&self, operation: &'static str, role: PlayerRole) -> Result<(), MatchError> {
        if self.current_turn() == Some(role) {
            Ok(())
        } else {
            Err(MatchError::UnexpectedPhase {
                operation,
                phase: self.phase,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InvalidPositionError, MoveSeed, core::board::tests::board};

    fn pos(index: i64) -> Position {
        Position::new(index).unwrap()
    }

    fn new_match(policy: MarkerPolicy) -> MatchController {
        let seed = MoveSeed::from_bytes([7; 16]);
        MatchController::new("Ada", "Joshua", policy, MoveSelector::with_seed(seed))
    }

    /// Plays a round the computer always wins without touching the random
    /// fallback: X at 1, O center, X at 2, O blocks 3, X at 4, O wins on 3-5-7.
    fn play_losing_round(game: &mut MatchController) {
        if game.phase().is_awaiting_marker_choice() {
            game.choose_marker(Marker::PlayerA).unwrap();
        }
        game.play_human_move(pos(1)).unwrap();
        assert_eq!(game.play_computer_move(), Ok(pos(5)));
        game.play_human_move(pos(2)).unwrap();
        assert_eq!(game.play_computer_move(), Ok(pos(3)));
        game.play_human_move(pos(4)).unwrap();
        assert_eq!(game.play_computer_move(), Ok(pos(7)));
        assert_eq!(
            game.phase(),
            MatchPhase::RoundOver {
                outcome: RoundOutcome::Won(PlayerRole::Computer)
            }
        );
    }

    #[test]
    fn test_new_match_awaits_marker_choice() {
        let game = new_match(MarkerPolicy::PerRound);
        assert_eq!(game.phase(), MatchPhase::AwaitingMarkerChoice);
        assert_eq!(game.current_turn(), None);
        assert_eq!(game.human().score(), 0);
        assert_eq!(game.computer().score(), 0);
        assert_eq!(game.board(), &Board::EMPTY);
    }

    #[test]
    fn test_choose_marker_assigns_complement_and_first_mover() {
        let mut game = new_match(MarkerPolicy::PerRound);
        game.choose_marker(Marker::PlayerB).unwrap();
        assert_eq!(game.human().marker(), Marker::PlayerB);
        assert_eq!(game.computer().marker(), Marker::PlayerA);
        assert_eq!(
            game.phase(),
            MatchPhase::InRound {
                turn: Marker::FIRST_TO_MOVE
            }
        );
        assert_eq!(game.current_turn(), Some(PlayerRole::Computer));

        // Computer holds X, so it opens on the empty board with the center.
        assert_eq!(game.play_computer_move(), Ok(Position::CENTER));
        assert_eq!(game.current_turn(), Some(PlayerRole::Human));
    }

    #[test]
    fn test_choose_empty_marker_is_rejected() {
        let mut game = new_match(MarkerPolicy::PerRound);
        assert_eq!(
            game.choose_marker(Marker::Empty),
            Err(MatchError::InvalidMarkerChoice)
        );
        assert_eq!(game.phase(), MatchPhase::AwaitingMarkerChoice);
    }

    #[test]
    fn test_moves_out_of_turn_are_rejected() {
        let mut game = new_match(MarkerPolicy::PerRound);
        assert!(matches!(
            game.play_human_move(pos(1)),
            Err(MatchError::UnexpectedPhase { .. })
        ));

        game.choose_marker(Marker::PlayerA).unwrap();
        assert!(matches!(
            game.play_computer_move(),
            Err(MatchError::UnexpectedPhase { .. })
        ));
        assert!(matches!(
            game.finish_round(),
            Err(MatchError::UnexpectedPhase { .. })
        ));
        assert!(matches!(
            game.rematch(),
            Err(MatchError::UnexpectedPhase { .. })
        ));
    }

    #[test]
    fn test_occupied_position_is_rejected_without_state_change() {
        let mut game = new_match(MarkerPolicy::PerRound);
        game.choose_marker(Marker::PlayerA).unwrap();
        game.play_human_move(pos(1)).unwrap();
        let reply = game.play_computer_move().unwrap();

        let before = game.board().clone();
        assert_eq!(
            game.play_human_move(reply),
            Err(MatchError::InvalidPosition(InvalidPositionError::Occupied { position: reply }))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_turn(), Some(PlayerRole::Human));
    }

    #[test]
    fn test_one_won_round_scores_winner_only() {
        let mut game = new_match(MarkerPolicy::PerRound);
        play_losing_round(&mut game);
        assert_eq!(game.computer().score(), 1);
        assert_eq!(game.human().score(), 0);
        assert_eq!(game.rounds_played(), 1);

        assert_eq!(game.finish_round(), Ok(MatchPhase::AwaitingContinue));
    }

    #[test]
    fn test_human_win_is_scored() {
        let mut game = new_match(MarkerPolicy::PerRound);
        game.choose_marker(Marker::PlayerA).unwrap();
        game.board = board("XX. OO. ...");

        game.play_human_move(pos(3)).unwrap();
        assert_eq!(
            game.phase(),
            MatchPhase::RoundOver {
                outcome: RoundOutcome::Won(PlayerRole::Human)
            }
        );
        assert_eq!(
            RoundOutcome::Won(PlayerRole::Human).winner(),
            Some(PlayerRole::Human)
        );
        assert_eq!(game.human().score(), 1);
        assert_eq!(game.computer().score(), 0);
    }

    #[test]
    fn test_tie_changes_no_score() {
        let mut game = new_match(MarkerPolicy::PerRound);
        game.choose_marker(Marker::PlayerA).unwrap();
        game.board = board("XOX XOO OX.");

        game.play_human_move(pos(9)).unwrap();
        assert_eq!(
            game.phase(),
            MatchPhase::RoundOver {
                outcome: RoundOutcome::Tie
            }
        );
        assert_eq!(RoundOutcome::Tie.winner(), None);
        assert_eq!(game.human().score(), 0);
        assert_eq!(game.computer().score(), 0);
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_five_wins_make_a_champion() {
        let mut game = new_match(MarkerPolicy::PerRound);
        for round in 1..=WINS_LIMIT {
            play_losing_round(&mut game);
            let phase = game.finish_round().unwrap();
            if round < WINS_LIMIT {
                assert_eq!(phase, MatchPhase::AwaitingContinue);
                assert_eq!(game.champion(), None);
                game.continue_match(true).unwrap();
                assert_eq!(game.phase(), MatchPhase::AwaitingMarkerChoice);
                assert_eq!(game.board(), &Board::EMPTY);
            }
        }

        assert_eq!(
            game.phase(),
            MatchPhase::MatchOver {
                champion: Some(PlayerRole::Computer)
            }
        );
        assert_eq!(game.champion().map(Player::name), Some("Joshua"));
        assert_eq!(game.computer().score(), WINS_LIMIT);
        assert_eq!(game.human().score(), 0);
    }

    #[test]
    fn test_declining_to_continue_ends_without_champion() {
        let mut game = new_match(MarkerPolicy::PerRound);
        play_losing_round(&mut game);
        game.finish_round().unwrap();
        game.continue_match(false).unwrap();

        assert_eq!(game.phase(), MatchPhase::MatchOver { champion: None });
        assert_eq!(game.champion(), None);
        assert_eq!(game.computer().score(), 1);
    }

    #[test]
    fn test_rematch_per_round_resets_scores_and_asks_marker() {
        let mut game = new_match(MarkerPolicy::PerRound);
        play_losing_round(&mut game);
        game.finish_round().unwrap();
        game.continue_match(false).unwrap();

        game.rematch().unwrap();
        assert_eq!(game.phase(), MatchPhase::AwaitingMarkerChoice);
        assert_eq!(game.human().score(), 0);
        assert_eq!(game.computer().score(), 0);
        assert_eq!(game.rounds_played(), 0);
        assert_eq!(game.board(), &Board::EMPTY);
        assert_eq!(game.human().name(), "Ada");
        assert_eq!(game.computer().name(), "Joshua");
    }

    #[test]
    fn test_per_match_policy_keeps_markers() {
        let mut game = new_match(MarkerPolicy::PerMatch);
        play_losing_round(&mut game);
        game.finish_round().unwrap();
        game.continue_match(true).unwrap();
        assert_eq!(
            game.phase(),
            MatchPhase::InRound {
                turn: Marker::FIRST_TO_MOVE
            }
        );
        assert_eq!(game.board(), &Board::EMPTY);

        for _ in 1..WINS_LIMIT {
            play_losing_round(&mut game);
            if game.finish_round().unwrap().is_awaiting_continue() {
                game.continue_match(true).unwrap();
            }
        }
        assert!(game.phase().is_match_over());

        game.rematch().unwrap();
        assert_eq!(
            game.phase(),
            MatchPhase::InRound {
                turn: Marker::FIRST_TO_MOVE
            }
        );
        assert_eq!(game.human().marker(), Marker::PlayerA);
        assert_eq!(game.computer().marker(), Marker::PlayerB);
        assert_eq!(game.human().score(), 0);
        assert_eq!(game.computer().score(), 0);
    }

    #[test]
    fn test_full_matches_keep_score_invariants() {
        for n in 0..20u8 {
            let seed = MoveSeed::from_bytes([n; 16]);
            let mut game = MatchController::new(
                "Ada",
                "Joshua",
                MarkerPolicy::PerRound,
                MoveSelector::with_seed(seed),
            );
            let mut ties = 0;
            let mut choice = Marker::PlayerA;
            loop {
                match game.phase() {
                    MatchPhase::AwaitingMarkerChoice => {
                        game.choose_marker(choice).unwrap();
                        choice = choice.opponent();
                    }
                    MatchPhase::InRound { .. } => match game.current_turn() {
                        Some(PlayerRole::Human) => {
                            let first_free = game.board().unmarked_positions()[0];
                            game.play_human_move(first_free).unwrap();
                        }
                        Some(PlayerRole::Computer) => {
                            let position = game.play_computer_move().unwrap();
                            assert_eq!(game.board().get(position), game.computer().marker());
                        }
                        None => unreachable!("round in progress without a turn"),
                    },
                    MatchPhase::RoundOver { outcome } => {
                        if outcome.is_tie() {
                            ties += 1;
                        }
                        game.finish_round().unwrap();
                    }
                    MatchPhase::AwaitingContinue => game.continue_match(true).unwrap(),
                    MatchPhase::MatchOver { .. } => break,
                }
            }

            let champion = game.champion().expect("match played to completion");
            assert_eq!(champion.score(), WINS_LIMIT);
            assert_eq!(
                game.human().score() + game.computer().score() + ties,
                game.rounds_played()
            );
        }
    }
}
