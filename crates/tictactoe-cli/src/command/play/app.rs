use tictactoe_engine::{
    Marker, MarkerPolicy, MatchController, MatchPhase, MoveSelector, PlayerRole, Position,
    RoundOutcome, WINS_LIMIT,
};

use crate::{
    console::{Prompter, choice_prompt},
    ui,
};

/// Runs interactive matches over a [`Prompter`].
///
/// The app only translates between the match phases and the conversation;
/// all game rules live in [`MatchController`].
#[derive(Debug)]
pub(crate) struct PlayApp<P> {
    prompter: P,
    game: MatchController,
}

impl<P> PlayApp<P>
where
    P: Prompter,
{
    /// Asks for the human's name and sets up the match.
    pub(crate) fn new(
        mut prompter: P,
        computer_name: &str,
        policy: MarkerPolicy,
        move_selector: MoveSelector,
    ) -> anyhow::Result<Self> {
        prompter.clear()?;
        let human_name = prompter.ask_open_question("What's your name?", computer_name)?;
        let game = MatchController::new(human_name, computer_name, policy, move_selector);
        Ok(Self { prompter, game })
    }

    #[cfg(test)]
    pub(crate) fn into_prompter(self) -> P {
        self.prompter
    }

    pub(crate) fn run(&mut self) -> anyhow::Result<()> {
        self.display_welcome_message()?;
        loop {
            self.play_match()?;
            self.display_champion()?;
            if self.game.champion().is_none() || !self.play_again()? {
                break;
            }
            self.game.rematch()?;
            self.prompter.clear()?;
        }
        self.display_goodbye_message()?;
        Ok(())
    }

    fn play_match(&mut self) -> anyhow::Result<()> {
        loop {
            match self.game.phase() {
                MatchPhase::AwaitingMarkerChoice => self.choose_marker()?,
                MatchPhase::InRound { .. } => self.current_player_moves()?,
                MatchPhase::RoundOver { outcome } => {
                    self.display_result(outcome)?;
                    self.display_scores()?;
                    self.game.finish_round()?;
                }
                MatchPhase::AwaitingContinue => {
                    let proceed = self.prompter.ask_yes_no("Continue the match? (y/n)")?;
                    self.game.continue_match(proceed)?;
                    if proceed {
                        self.prompter.clear()?;
                    }
                }
                MatchPhase::MatchOver { .. } => return Ok(()),
            }
        }
    }

    fn choose_marker(&mut self) -> anyhow::Result<()> {
        let [a, b] = Marker::PLAYABLE.map(|marker| marker.to_string().to_lowercase());
        let question = format!("Choose your marker ({a} or {b}):");
        let answer = self
            .prompter
            .ask_closed_question(&question, &[a.as_str(), b.as_str()])?;
        let Some(marker) = Marker::from_symbol(&answer) else {
            anyhow::bail!("unexpected marker answer {answer:?}");
        };
        self.game.choose_marker(marker)?;
        Ok(())
    }

    fn current_player_moves(&mut self) -> anyhow::Result<()> {
        match self.game.current_turn() {
            Some(PlayerRole::Human) => self.human_moves(),
            Some(PlayerRole::Computer) => {
                self.game.play_computer_move()?;
                Ok(())
            }
            None => anyhow::bail!("no player to move in phase {}", self.game.phase()),
        }
    }

    fn human_moves(&mut self) -> anyhow::Result<()> {
        self.clear_screen_and_display_board()?;
        let options: Vec<i64> = self
            .game
            .board()
            .unmarked_positions()
            .iter()
            .map(|position| i64::from(*position))
            .collect();
        let question = choice_prompt("Choose a square", &options);
        let choice = self.prompter.ask_integer_choice(&question, &options)?;
        self.game.play_human_move(Position::try_from(choice)?)?;
        Ok(())
    }

    fn display_welcome_message(&mut self) -> anyhow::Result<()> {
        let human = self.game.human().name().to_owned();
        let computer = self.game.computer().name().to_owned();
        self.prompter.clear()?;
        self.prompter
            .say(&format!("Hi {human}. Welcome to Tic Tac Toe!"))?;
        self.prompter
            .say(&format!("You are playing against {computer}."))?;
        self.prompter.say(&format!(
            "The first to win {WINS_LIMIT} games is the Champion!"
        ))?;
        self.prompter.blank_line()?;
        Ok(())
    }

    fn display_board(&mut self) -> anyhow::Result<()> {
        let human = self.game.human();
        let computer = self.game.computer();
        let header = format!(
            "{} is {}. {} is {}.",
            human.name(),
            ui::marker_phrase(human.marker()),
            computer.name(),
            ui::marker_phrase(computer.marker()),
        );
        let lines = ui::board_lines(self.game.board());
        self.prompter.say(&header)?;
        self.prompter.blank_line()?;
        for line in lines {
            self.prompter.say(&line)?;
        }
        self.prompter.blank_line()?;
        Ok(())
    }

    fn clear_screen_and_display_board(&mut self) -> anyhow::Result<()> {
        self.prompter.clear()?;
        self.display_board()
    }

    fn display_result(&mut self, outcome: RoundOutcome) -> anyhow::Result<()> {
        self.clear_screen_and_display_board()?;
        let message = match outcome.winner() {
            Some(role) => format!("{} won!", self.game.player(role).name()),
            None => "It's a tie!".to_owned(),
        };
        self.prompter.say(&message)?;
        Ok(())
    }

    fn display_scores(&mut self) -> anyhow::Result<()> {
        for role in [PlayerRole::Human, PlayerRole::Computer] {
            let player = self.game.player(role);
            let line = format!(
                "{} has {} {}.",
                player.name(),
                player.score(),
                player.point_label()
            );
            self.prompter.say(&line)?;
        }
        self.prompter.say(&format!(
            "Remember, the first to win {WINS_LIMIT} games is the Champion!"
        ))?;
        self.prompter.blank_line()?;
        Ok(())
    }

    fn display_champion(&mut self) -> anyhow::Result<()> {
        let message = match self.game.champion() {
            Some(champion) => format!(
                "{} won {WINS_LIMIT} games and is the CHAMPION!",
                champion.name()
            ),
            None => "The match ended without a champion.".to_owned(),
        };
        self.prompter.say(&message)?;
        Ok(())
    }

    fn play_again(&mut self) -> anyhow::Result<bool> {
        Ok(self
            .prompter
            .ask_yes_no("Would you like to play another match? (y/n)")?)
    }

    fn display_goodbye_message(&mut self) -> anyhow::Result<()> {
        self.prompter
            .say("Thanks for playing Tic Tac Toe! Goodbye!")?;
        self.prompter.blank_line()?;
        Ok(())
    }
}
