use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tictactoe_engine::{
    Marker, MarkerPolicy, MatchController, MatchPhase, MoveSeed, MoveSelector, PlayerRole,
    RoundOutcome,
};

use crate::{command::play::DEFAULT_COMPUTER_NAME, util};

const RANDOM_PLAYER_NAME: &str = "Random";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of matches to play
    #[arg(long, default_value_t = 100)]
    matches: usize,
    /// Seed for every random choice in the run (32 hex characters)
    #[arg(long)]
    seed: Option<MoveSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Summary of a simulation run, written as JSON.
#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    generated_at: DateTime<Utc>,
    seed: MoveSeed,
    matches: usize,
    #[serde(flatten)]
    tally: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct Tally {
    computer_champion: usize,
    human_champion: usize,
    rounds: usize,
    computer_round_wins: usize,
    human_round_wins: usize,
    ties: usize,
}

impl Tally {
    fn record_round(&mut self, outcome: RoundOutcome) {
        self.rounds += 1;
        match outcome.winner() {
            Some(PlayerRole::Computer) => self.computer_round_wins += 1,
            Some(PlayerRole::Human) => self.human_round_wins += 1,
            None => self.ties += 1,
        }
    }

    fn record_champion(&mut self, champion: PlayerRole) {
        match champion {
            PlayerRole::Computer => self.computer_champion += 1,
            PlayerRole::Human => self.human_champion += 1,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        matches,
        seed,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, matches, "simulation started");

    let tally = simulate(*matches, seed)?;
    tracing::info!(?tally, "simulation finished");

    let report = SimulationReport {
        generated_at: Utc::now(),
        seed,
        matches: *matches,
        tally,
    };
    util::save_json(&report, output.as_deref())?;
    Ok(())
}

/// Plays `matches` full matches between the computer and a uniformly random
/// opponent in the human seat, always continuing until a champion emerges.
fn simulate(matches: usize, seed: MoveSeed) -> anyhow::Result<Tally> {
    let mut seeder = Pcg32::from_seed(seed.to_bytes());
    let mut tally = Tally::default();
    for index in 0..matches {
        let selector = MoveSelector::with_seed(seeder.random());
        let mut opponent = Pcg32::from_rng(&mut seeder);
        let mut game = MatchController::new(
            RANDOM_PLAYER_NAME,
            DEFAULT_COMPUTER_NAME,
            MarkerPolicy::PerRound,
            selector,
        );
        let champion = play_match(&mut game, &mut opponent, &mut tally)
            .with_context(|| format!("match {index} failed"))?;
        tracing::debug!(index, %champion, rounds = game.rounds_played(), "match finished");
        tally.record_champion(champion);
    }
    Ok(tally)
}

fn play_match(
    game: &mut MatchController,
    opponent: &mut Pcg32,
    tally: &mut Tally,
) -> anyhow::Result<PlayerRole> {
    loop {
        match game.phase() {
            MatchPhase::AwaitingMarkerChoice => {
                let marker = if opponent.random() {
                    Marker::PlayerA
                } else {
                    Marker::PlayerB
                };
                game.choose_marker(marker)?;
            }
            MatchPhase::InRound { .. } => match game.current_turn() {
                Some(PlayerRole::Computer) => {
                    game.play_computer_move()?;
                }
                Some(PlayerRole::Human) => {
                    let position = *game
                        .board()
                        .unmarked_positions()
                        .choose(opponent)
                        .context("no unmarked position during a round")?;
                    game.play_human_move(position)?;
                }
                None => anyhow::bail!("no player to move in phase {}", game.phase()),
            },
            MatchPhase::RoundOver { outcome } => {
                tally.record_round(outcome);
                game.finish_round()?;
            }
            MatchPhase::AwaitingContinue => game.continue_match(true)?,
            MatchPhase::MatchOver { champion } => {
                return champion.context("simulated match ended without a champion");
            }
        }
    }
}
