use tictactoe_engine::{MarkerPolicy, MoveSeed, MoveSelector};

use crate::{command::play::app::PlayApp, console::Console};

mod app;

/// Name the computer plays under unless overridden.
pub(crate) const DEFAULT_COMPUTER_NAME: &str = "Joshua";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Name of the computer opponent
    #[clap(long, default_value = DEFAULT_COMPUTER_NAME)]
    computer_name: String,
    /// When you choose between X and O
    #[clap(long, value_enum, default_value_t = MarkerPolicyArg::PerRound)]
    marker_policy: MarkerPolicyArg,
    /// Seed for the computer's random moves (32 hex characters)
    #[clap(long)]
    seed: Option<MoveSeed>,
    /// Keep previous screens instead of clearing the terminal
    #[clap(long)]
    no_clear: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            computer_name: DEFAULT_COMPUTER_NAME.to_owned(),
            marker_policy: MarkerPolicyArg::PerRound,
            seed: None,
            no_clear: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum MarkerPolicyArg {
    /// Choose before every round
    PerRound,
    /// Choose once per match
    PerMatch,
}

impl From<MarkerPolicyArg> for MarkerPolicy {
    fn from(arg: MarkerPolicyArg) -> Self {
        match arg {
            MarkerPolicyArg::PerRound => MarkerPolicy::PerRound,
            MarkerPolicyArg::PerMatch => MarkerPolicy::PerMatch,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        computer_name,
        marker_policy,
        seed,
        no_clear,
    } = arg;

    let move_selector = seed.map_or_else(MoveSelector::new, MoveSelector::with_seed);
    tracing::debug!(seed = %move_selector.seed(), "computer seeded");

    let console = Console::stdio(!*no_clear);
    let mut app = PlayApp::new(
        console,
        computer_name,
        (*marker_policy).into(),
        move_selector,
    )?;
    app.run()
}
