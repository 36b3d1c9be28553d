//! Line-based terminal I/O: messages, screen clearing and retrying prompts.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::ui;

/// Longest name a player may enter.
pub(crate) const NAME_CHAR_LIMIT: usize = 15;

const YES_NO_OPTIONS: [&str; 4] = ["y", "yes", "n", "no"];

/// The conversation surface the match runner needs.
///
/// Every `ask_*` method keeps asking until it gets an acceptable answer, so
/// callers only ever see validated input.
pub(crate) trait Prompter {
    fn say(&mut self, message: &str) -> io::Result<()>;

    fn blank_line(&mut self) -> io::Result<()> {
        self.say("")
    }

    fn clear(&mut self) -> io::Result<()>;

    /// Asks for a non-empty answer of at most [`NAME_CHAR_LIMIT`] characters
    /// that differs from `disallowed` (ignoring case).
    fn ask_open_question(&mut self, question: &str, disallowed: &str) -> io::Result<String>;

    fn ask_yes_no(&mut self, question: &str) -> io::Result<bool>;

    /// Asks for one of `options` (ignoring case); returns it lowercased.
    fn ask_closed_question(&mut self, question: &str, options: &[&str]) -> io::Result<String>;

    fn ask_integer_choice(&mut self, question: &str, options: &[i64]) -> io::Result<i64>;
}

#[derive(Debug)]
pub(crate) struct Console<R, W> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    pub(crate) fn stdio(clear_screen: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), clear_screen)
    }
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(reader: R, writer: W, clear_screen: bool) -> Self {
        Self {
            reader,
            writer,
            clear_screen,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_writer(self) -> W {
        self.writer
    }

    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_owned())
    }

    /// Prints `question` and reads answers until `parse` accepts one.
    ///
    /// `parse` returns the apology to print for a rejected answer.
    fn ask<'a, T>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> Result<T, &'a str>,
    ) -> io::Result<T> {
        loop {
            self.say(question)?;
            self.writer.flush()?;
            let answer = self.read_answer()?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(apology) => self.say(apology)?,
            }
        }
    }
}

impl<R, W> Prompter for Console<R, W>
where
    R: BufRead,
    W: Write,
{
    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn ask_open_question(&mut self, question: &str, disallowed: &str) -> io::Result<String> {
        let too_long = format!(
            "Sorry, must enter a value and it must be at most {NAME_CHAR_LIMIT} characters."
        );
        self.ask(question, |answer| {
            if answer.is_empty() || answer.chars().count() > NAME_CHAR_LIMIT {
                Err(too_long.as_str())
            } else if answer.eq_ignore_ascii_case(disallowed) {
                Err("Sorry, that name is already taken.")
            } else {
                Ok(answer.to_owned())
            }
        })
    }

    fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        self.ask(question, |answer| {
            let answer = answer.to_lowercase();
            if YES_NO_OPTIONS.contains(&answer.as_str()) {
                Ok(answer.starts_with('y'))
            } else {
                Err("Sorry, must be y or n.")
            }
        })
    }

    fn ask_closed_question(&mut self, question: &str, options: &[&str]) -> io::Result<String> {
        self.ask(question, |answer| {
            let answer = answer.to_lowercase();
            if options.iter().any(|option| option.to_lowercase() == answer) {
                Ok(answer)
            } else {
                Err("Sorry, invalid choice.")
            }
        })
    }

    fn ask_integer_choice(&mut self, question: &str, options: &[i64]) -> io::Result<i64> {
        self.ask(question, |answer| match answer.parse::<i64>() {
            Ok(choice) if options.contains(&choice) => Ok(choice),
            _ => Err("Sorry, that's not a valid choice."),
        })
    }
}

/// Formats the choices of an integer question, e.g. `Choose a square (1, 2, or 3):`.
pub(crate) fn choice_prompt(subject: &str, options: &[i64]) -> String {
    format!("{subject} ({}):", ui::joinor(options, ", ", "or"))
}
