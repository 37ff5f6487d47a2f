//! TUI (Terminal User Interface) module for guess5
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiModel`: what is on screen and how key presses change it; no terminal
//!   access, so it can be exercised directly
//! - `TuiInterface`: owns the terminal, renders the model and implements
//!   `GameInterface` for the game loop
//!
//! # State Machine
//! - `EnteringGuess` → (guess accepted, game not over) → `EnteringGuess`
//! - `EnteringGuess` → (winning or sixth guess) → `GameOver`
//! - `GameOver` → (N) → `EnteringGuess`

use crate::cli::{format_stats, game_over_message, rejection_message};
use crate::error::SubmitError;
use crate::feedback::{Guess, LetterMark};
use crate::game_state::{GameInterface, UserAction};
use crate::session::{GameSnapshot, GameStatus, MAX_GUESSES};
use crate::streak::StreakStats;
use crate::tracker::LetterTracker;
use crate::word::WORD_LENGTH;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// (background, foreground) for a tile; `None` is a letter not yet evaluated.
fn tile_colors(mark: Option<LetterMark>) -> (Color, Color) {
    match mark {
        None => (Color::DarkGray, Color::White),
        Some(LetterMark::Correct) => (Color::Green, Color::Black),
        Some(LetterMark::Present) => (Color::Yellow, Color::Black),
        Some(LetterMark::Absent) => (Color::Gray, Color::White),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TuiState {
    #[default]
    EnteringGuess,
    /// Game has ended - outcome message stored in `message`
    GameOver,
}

#[derive(Debug, Default)]
struct TuiModel {
    guesses: Vec<Guess>,
    letters: LetterTracker,
    current_input: String,
    state: TuiState,
    streak: Option<StreakStats>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiModel {
    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UserAction::Exit);
        }
        if key.code == KeyCode::Esc {
            return Some(UserAction::Exit);
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }
        match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.current_input.len() < WORD_LENGTH {
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.len() == WORD_LENGTH => {
                info_log!("handle_guess_input() - submitting '{}'", self.current_input);
                return Some(UserAction::Guess(self.current_input.clone()));
            }
            KeyCode::Enter => {
                self.error_message = "Not enough letters!".to_string();
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn sync(&mut self, snapshot: &GameSnapshot) {
        self.guesses.clone_from(&snapshot.history);
        self.letters.clone_from(&snapshot.letter_status);
        self.streak = Some(snapshot.streak);
    }

    fn apply_new_game(&mut self, snapshot: &GameSnapshot) {
        self.sync(snapshot);
        self.current_input.clear();
        self.state = TuiState::EnteringGuess;
        self.message = format!("New game! Guess the word in {MAX_GUESSES} tries.");
        self.error_message.clear();
        self.status = "Type your first guess".to_string();
    }

    fn apply_guess(&mut self, guess: &Guess, snapshot: &GameSnapshot) {
        self.sync(snapshot);
        self.current_input.clear();
        self.error_message.clear();
        self.message.clear();
        self.status = format!(
            "{} -> {} | {} guesses left",
            guess.word, guess.feedback, snapshot.remaining_guesses
        );
    }

    fn apply_rejection(&mut self, error: &SubmitError) {
        self.error_message = rejection_message(error);
    }

    fn apply_game_over(&mut self, snapshot: &GameSnapshot) {
        self.sync(snapshot);
        self.state = TuiState::GameOver;
        self.message = game_over_message(snapshot);
        self.status = match snapshot.status {
            GameStatus::Won => "You won!".to_string(),
            _ => "Out of guesses".to_string(),
        };
    }

    fn apply_stats(&mut self, stats: &StreakStats) {
        self.streak = Some(*stats);
    }

    fn should_show_current_input(&self) -> bool {
        self.state == TuiState::EnteringGuess && self.guesses.len() < MAX_GUESSES
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    model: TuiModel,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            model: TuiModel {
                status: "Ready to start".to_string(),
                ..TuiModel::default()
            },
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let model = &self.model;
        self.terminal.draw(|f| {
            Self::render_static(f, model);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout.
    fn render_static(f: &mut Frame, model: &TuiModel) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Board: 6 rows, 2 lines each, plus borders
                Constraint::Length(5),  // Keyboard
                Constraint::Min(8),     // Info panel (takes remaining space)
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], model);
        Self::render_keyboard(f, chunks[2], &model.letters);
        Self::render_info(f, chunks[3], model);
        Self::render_status(f, chunks[4], &model.status);
        Self::render_instructions(f, chunks[5], model.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("GUESS5")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn tile_span(letter: char, mark: Option<LetterMark>) -> Span<'static> {
        let (bg_color, fg_color) = tile_colors(mark);
        Span::styled(
            format!(" {letter} "),
            Style::default().fg(fg_color).bg(bg_color),
        )
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_board(f: &mut Frame, area: Rect, model: &TuiModel) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for row in 0..MAX_GUESSES {
            let y = inner.y + (row as u16 * ROW_SPACING);
            if y >= inner.y + inner.height {
                return;
            }
            let mut spans = vec![Span::raw("  ")];
            if let Some(guess) = model.guesses.get(row) {
                for (letter, &mark) in guess.word.letters().into_iter().zip(guess.feedback.marks()) {
                    spans.push(Self::tile_span(letter, Some(mark)));
                    spans.push(Span::raw(" "));
                }
            } else {
                let typing = row == model.guesses.len() && model.should_show_current_input();
                for i in 0..WORD_LENGTH {
                    let letter = if typing {
                        model.current_input.chars().nth(i).unwrap_or(' ')
                    } else {
                        ' '
                    };
                    spans.push(Self::tile_span(letter, None));
                    spans.push(Span::raw(" "));
                }
            }
            Self::render_line(f, inner, y, spans);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_keyboard(f: &mut Frame, area: Rect, letters: &LetterTracker) {
        let block = Block::default().title("Letters").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for (i, keys) in KEYBOARD_ROWS.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                return;
            }
            let mut spans = vec![Span::raw(" ".repeat(i + 2))];
            for key in keys.chars() {
                spans.push(Self::tile_span(key, letters.get(key)));
            }
            Self::render_line(f, inner, y, spans);
        }
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, model: &TuiModel) {
        let mut lines = Vec::new();

        if let Some(stats) = &model.streak {
            for line in format_stats(stats) {
                lines.push(Line::from(line));
            }
            lines.push(Line::from(""));
        }

        if !model.message.is_empty() {
            let style = if model.state == TuiState::GameOver {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(model.message.as_str(), style)]));
        }

        if !model.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                model.error_message.as_str(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Statistics").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type your 5-letter guess | ENTER: Submit | ESC: Quit",
            TuiState::GameOver => "N: New Game | Q/ESC: Quit",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => {
                debug_log!("handle_input() - Key event: {:?}", key);
                Ok(self.model.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        if self.draw().is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }
        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Terminal input failed: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_new_game(&mut self, snapshot: &GameSnapshot) {
        self.model.apply_new_game(snapshot);
        self.draw_or_log();
    }

    fn display_guess(&mut self, guess: &Guess, snapshot: &GameSnapshot) {
        self.model.apply_guess(guess, snapshot);
        self.draw_or_log();
    }

    fn display_rejection(&mut self, error: &SubmitError) {
        self.model.apply_rejection(error);
        self.draw_or_log();
    }

    fn display_game_over(&mut self, snapshot: &GameSnapshot) {
        self.model.apply_game_over(snapshot);
        self.draw_or_log();
    }

    fn display_stats(&mut self, stats: &StreakStats) {
        self.model.apply_stats(stats);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.model.message = "Exiting...".to_string();
        self.model.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::feedback::evaluate;
    use crate::word::Word;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_word(model: &mut TuiModel, word: &str) -> Option<UserAction> {
        for c in word.chars() {
            assert_eq!(model.handle_key(key(KeyCode::Char(c))), None);
        }
        model.handle_key(key(KeyCode::Enter))
    }

    fn snapshot(secret: &str, words: &[&str]) -> GameSnapshot {
        let secret = Word::parse(secret).unwrap();
        let mut letter_status = LetterTracker::new();
        let history: Vec<Guess> = words
            .iter()
            .map(|w| {
                let word = Word::parse(w).unwrap();
                let guess = Guess {
                    word,
                    feedback: evaluate(&secret, &word),
                };
                letter_status.record(&guess);
                guess
            })
            .collect();
        let solved = history.last().is_some_and(|g| g.feedback.is_solved());
        let status = if solved {
            GameStatus::Won
        } else if history.len() == MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        GameSnapshot {
            current_row: history.len(),
            remaining_guesses: MAX_GUESSES - history.len(),
            history,
            status,
            letter_status,
            secret: status.is_over().then_some(secret),
            streak: StreakStats {
                current_streak: 0,
                longest_streak: 0,
                total_games: 0,
                total_wins: 0,
                win_percentage: 0,
                last_played_date: None,
            },
        }
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut model = TuiModel::default();
        assert_eq!(
            type_word(&mut model, "crane"),
            Some(UserAction::Guess("CRANE".to_string()))
        );
        // Input is kept until the guess is accepted.
        assert_eq!(model.current_input, "CRANE");
    }

    #[test]
    fn test_input_capped_at_five_letters() {
        let mut model = TuiModel::default();
        for c in "abcdefg".chars() {
            model.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(model.current_input, "ABCDE");
        model.handle_key(key(KeyCode::Backspace));
        assert_eq!(model.current_input, "ABCD");
    }

    #[test]
    fn test_short_enter_and_digits_show_errors() {
        let mut model = TuiModel::default();
        assert_eq!(type_word(&mut model, "ab"), None);
        assert_eq!(model.error_message, "Not enough letters!");
        model.handle_key(key(KeyCode::Char('3')));
        assert!(model.error_message.contains("'3'"));
        assert_eq!(model.current_input, "AB");
    }

    #[test]
    fn test_modifiers_and_releases_are_ignored() {
        let mut model = TuiModel::default();
        model.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT));
        let mut release = key(KeyCode::Char('b'));
        release.kind = KeyEventKind::Release;
        model.handle_key(release);
        assert!(model.current_input.is_empty());
    }

    #[test]
    fn test_exit_keys() {
        let mut model = TuiModel::default();
        assert_eq!(model.handle_key(key(KeyCode::Esc)), Some(UserAction::Exit));
        assert_eq!(
            model.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UserAction::Exit)
        );
    }

    #[test]
    fn test_accepted_guess_clears_input() {
        let mut model = TuiModel::default();
        type_word(&mut model, "brain");
        let snap = snapshot("APPLE", &["BRAIN"]);
        model.apply_guess(&snap.history[0], &snap);
        assert!(model.current_input.is_empty());
        assert_eq!(model.guesses.len(), 1);
        assert_eq!(model.letters.get('A'), Some(LetterMark::Present));
        assert_eq!(model.status, "BRAIN -> XXYXX | 5 guesses left");
    }

    #[test]
    fn test_rejection_keeps_input_for_editing() {
        let mut model = TuiModel::default();
        type_word(&mut model, "zzzzz");
        let word = Word::parse("ZZZZZ").unwrap();
        model.apply_rejection(&SubmitError::Invalid(ValidationError::UnknownWord(word)));
        assert_eq!(model.current_input, "ZZZZZ");
        assert_eq!(model.error_message, "ZZZZZ is not a valid English word.");
    }

    #[test]
    fn test_game_over_then_new_game() {
        let mut model = TuiModel::default();
        let won = snapshot("APPLE", &["BRAIN", "APPLE"]);
        model.apply_game_over(&won);
        assert_eq!(model.state, TuiState::GameOver);
        assert!(!model.should_show_current_input());
        assert!(model.message.contains("APPLE"));

        // Letters do nothing once the game is over.
        assert_eq!(model.handle_key(key(KeyCode::Char('a'))), None);
        assert_eq!(
            model.handle_key(key(KeyCode::Char('n'))),
            Some(UserAction::NewGame)
        );

        model.apply_new_game(&snapshot("CHAIR", &[]));
        assert_eq!(model.state, TuiState::EnteringGuess);
        assert!(model.guesses.is_empty());
        assert!(model.letters.is_empty());
        assert!(model.should_show_current_input());
    }

    #[test]
    fn test_tile_colors() {
        assert_eq!(tile_colors(Some(LetterMark::Correct)).0, Color::Green);
        assert_eq!(tile_colors(Some(LetterMark::Present)).0, Color::Yellow);
        assert_eq!(tile_colors(None), (Color::DarkGray, Color::White));
    }
}
