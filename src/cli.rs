use crate::error::{SubmitError, ValidationError};
use crate::feedback::{Guess, LetterMark};
use crate::game_state::{GameInterface, UserAction};
use crate::session::{GameSnapshot, GameStatus, MAX_GUESSES};
use crate::streak::StreakStats;
use crate::tracker::LetterTracker;
use crate::word_source::DEFAULT_DICTIONARY_API;
use clap::{ArgAction, Parser};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Guess the five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list used instead of the built-in one
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Only accept words from the local list; never call the dictionary API
    #[arg(long)]
    pub offline: bool,

    /// Dictionary API base URL; `<url>/<word>` must answer 2xx for real words
    #[arg(long = "api-url", default_value = DEFAULT_DICTIONARY_API)]
    pub api_url: String,

    /// Directory holding the streak record and the log file
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Keep statistics in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Print statistics and exit
    #[arg(long, conflicts_with = "reset_stats")]
    pub stats: bool,

    /// Reset all statistics and exit
    #[arg(long = "reset-stats")]
    pub reset_stats: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn parse_action(line: &str) -> Option<UserAction> {
    let input = line.trim();
    match input.to_ascii_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "next" | "new" => Some(UserAction::NewGame),
        ":stats" => Some(UserAction::ShowStats),
        _ => Some(UserAction::Guess(input.to_string())),
    }
}

fn tile(letter: char, mark: LetterMark, color: bool) -> String {
    let text = format!(" {letter} ");
    if !color {
        return text;
    }
    match mark {
        LetterMark::Correct => text.black().on_green().to_string(),
        LetterMark::Present => text.black().on_yellow().to_string(),
        LetterMark::Absent => text.white().on_dark_grey().to_string(),
    }
}

pub fn format_guess_row(guess: &Guess, color: bool) -> String {
    let tiles: String = guess
        .word
        .letters()
        .into_iter()
        .zip(guess.feedback.marks())
        .map(|(letter, &mark)| tile(letter, mark, color))
        .collect();
    format!("{tiles}  {}", guess.feedback)
}

pub fn format_letter_status(letters: &LetterTracker) -> String {
    let group = |wanted: LetterMark| -> String {
        letters
            .iter()
            .filter(|&(_, mark)| mark == wanted)
            .map(|(c, _)| c)
            .collect()
    };
    format!(
        "Correct: {}  Present: {}  Absent: {}",
        group(LetterMark::Correct),
        group(LetterMark::Present),
        group(LetterMark::Absent)
    )
}

pub fn format_stats(stats: &StreakStats) -> Vec<String> {
    let last = stats
        .last_played_date
        .map_or_else(|| "never".to_string(), |d| d.format("%Y-%m-%d %H:%M UTC").to_string());
    vec![
        format!("Current streak: {}", stats.current_streak),
        format!("Longest streak: {}", stats.longest_streak),
        format!("Games played:   {}", stats.total_games),
        format!("Games won:      {} ({}%)", stats.total_wins, stats.win_percentage),
        format!("Last played:    {last}"),
    ]
}

pub fn rejection_message(error: &SubmitError) -> String {
    match error {
        SubmitError::Invalid(ValidationError::MalformedGuess(_)) => {
            "Please enter exactly 5 letters.".to_string()
        }
        SubmitError::Invalid(ValidationError::DuplicateGuess(word)) => {
            format!("You already guessed {word}.")
        }
        SubmitError::Invalid(ValidationError::UnknownWord(word)) => {
            format!("{word} is not a valid English word.")
        }
        SubmitError::GameOver => "The game is over. Type 'next' for a new game.".to_string(),
    }
}

pub fn game_over_message(snapshot: &GameSnapshot) -> String {
    let secret = snapshot.secret.map(|w| w.to_string()).unwrap_or_default();
    match snapshot.status {
        GameStatus::Won => format!(
            "Congratulations! You guessed {secret} in {}/{MAX_GUESSES}.",
            snapshot.current_row
        ),
        GameStatus::Lost => format!("Game over! The word was: {secret}"),
        GameStatus::InProgress => String::new(),
    }
}

/// CLI implementation of the `GameInterface` trait.
///
/// Reads one command or guess per line; end of input counts as `exit`.
pub struct CliInterface<R: BufRead, O: Write> {
    reader: R,
    out: O,
    color: bool,
}

impl<R: BufRead> CliInterface<R, io::Stdout> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            out: io::stdout(),
            color: true,
        }
    }
}

impl<R: BufRead, O: Write> CliInterface<R, O> {
    /// Plain, uncolored output to any writer.
    pub fn with_output(reader: R, out: O) -> Self {
        Self {
            reader,
            out,
            color: false,
        }
    }

    #[must_use]
    pub fn into_output(self) -> O {
        self.out
    }

    fn say(&mut self, line: &str) {
        // Nothing sensible to do if the terminal is gone.
        let _ = writeln!(self.out, "{line}");
    }
}

impl<R: BufRead, O: Write> GameInterface for CliInterface<R, O> {
    fn read_action(&mut self) -> Option<UserAction> {
        self.say("\nEnter your guess (5 letters), or ':stats', 'next', 'exit':");
        let _ = self.out.flush();
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => parse_action(&input),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_new_game(&mut self, snapshot: &GameSnapshot) {
        self.say(&format!(
            "New game started. Guess the 5-letter word in {MAX_GUESSES} tries."
        ));
        self.say(&format!(
            "Current streak: {} | Longest: {}",
            snapshot.streak.current_streak, snapshot.streak.longest_streak
        ));
    }

    fn display_guess(&mut self, guess: &Guess, snapshot: &GameSnapshot) {
        let row = format_guess_row(guess, self.color);
        self.say(&row);
        self.say(&format_letter_status(&snapshot.letter_status));
        if snapshot.status == GameStatus::InProgress {
            self.say(&format!("Guesses left: {}", snapshot.remaining_guesses));
        }
    }

    fn display_rejection(&mut self, error: &SubmitError) {
        self.say(&rejection_message(error));
    }

    fn display_game_over(&mut self, snapshot: &GameSnapshot) {
        self.say(&game_over_message(snapshot));
        self.say(&format!(
            "Current streak: {} | Longest: {} | Won {}%",
            snapshot.streak.current_streak,
            snapshot.streak.longest_streak,
            snapshot.streak.win_percentage
        ));
        self.say("Type 'next' for a new game or 'exit' to quit.");
    }

    fn display_stats(&mut self, stats: &StreakStats) {
        for line in format_stats(stats) {
            self.say(&line);
        }
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}
