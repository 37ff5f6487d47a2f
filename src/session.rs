//! The game state machine.
//!
//! A session starts `InProgress` with a secret word and moves to `Won` or
//! `Lost` exactly once. Every guess is validated before any field is touched,
//! so a rejected guess leaves the board exactly as it was.

use crate::error::SubmitError;
use crate::feedback::{Guess, evaluate};
use crate::storage::KeyValueStore;
use crate::streak::{StreakStats, StreakStore};
use crate::tracker::LetterTracker;
use crate::validator::validate;
use crate::word::Word;
use crate::word_source::WordSource;
use crate::{debug_log, info_log};

pub const MAX_GUESSES: usize = 6;

/// Used when the word source cannot produce a secret.
pub const DEFAULT_SECRET: Word = match Word::from_ascii(*b"APPLE") {
    Some(word) => word,
    None => panic!("default secret must be a valid word"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != Self::InProgress
    }
}

/// Everything a renderer needs after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub history: Vec<Guess>,
    pub current_row: usize,
    pub remaining_guesses: usize,
    pub status: GameStatus,
    pub letter_status: LetterTracker,
    /// Only revealed once the game is over.
    pub secret: Option<Word>,
    pub streak: StreakStats,
}

pub struct GameSession<W: WordSource, S: KeyValueStore> {
    word_source: W,
    streaks: StreakStore<S>,
    secret: Word,
    history: Vec<Guess>,
    status: GameStatus,
    letters: LetterTracker,
}

impl<W: WordSource, S: KeyValueStore> GameSession<W, S> {
    /// Build a session around its collaborators with `secret` in play.
    pub fn new(word_source: W, streaks: StreakStore<S>, secret: Word) -> Self {
        Self {
            word_source,
            streaks,
            secret,
            history: Vec::with_capacity(MAX_GUESSES),
            status: GameStatus::InProgress,
            letters: LetterTracker::new(),
        }
    }

    /// Expire a stale streak, fetch a secret, and start over with it.
    pub async fn begin(word_source: W, streaks: StreakStore<S>) -> Self {
        let mut session = Self::new(word_source, streaks, DEFAULT_SECRET);
        session.new_game().await;
        session
    }

    /// Reset every field for a fresh game around `secret`.
    pub fn start(&mut self, secret: Word) {
        debug_log!("Starting game with a new secret");
        self.secret = secret;
        self.history.clear();
        self.status = GameStatus::InProgress;
        self.letters.clear();
    }

    /// The session-start sequence: streak expiry check first, then a secret
    /// from the word source, falling back to [`DEFAULT_SECRET`].
    pub async fn new_game(&mut self) {
        if self.streaks.check_and_reset_streak() {
            info_log!("Current streak expired");
        }
        let secret = match self.word_source.random_secret_word().await {
            Ok(word) => word,
            Err(e) => {
                log::warn!("Could not pick a secret word ({e}); using {DEFAULT_SECRET}");
                DEFAULT_SECRET
            }
        };
        self.start(secret);
    }

    /// Validate, evaluate and record one guess.
    ///
    /// Nothing is mutated until validation (including the asynchronous word
    /// lookup) has succeeded; dropping the returned future early leaves the
    /// session untouched.
    pub async fn submit_guess(&mut self, raw: &str) -> Result<Guess, SubmitError> {
        if self.status.is_over() {
            return Err(SubmitError::GameOver);
        }
        let word = validate(raw, &self.history, &self.word_source).await?;

        let guess = Guess {
            word,
            feedback: evaluate(&self.secret, &word),
        };
        self.history.push(guess);
        self.letters.record(&guess);
        info_log!(
            "Guess {}/{}: {} -> {}",
            self.history.len(),
            MAX_GUESSES,
            guess.word,
            guess.feedback
        );

        if word == self.secret {
            self.status = GameStatus::Won;
            self.streaks.record_win();
        } else if self.history.len() == MAX_GUESSES {
            self.status = GameStatus::Lost;
            self.streaks.record_loss();
        }
        Ok(guess)
    }

    #[must_use]
    pub fn stats(&self) -> GameSnapshot {
        GameSnapshot {
            history: self.history.clone(),
            current_row: self.current_row(),
            remaining_guesses: self.remaining_guesses(),
            status: self.status,
            letter_status: self.letters.clone(),
            secret: self.revealed_secret(),
            streak: self.streaks.stats(),
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    #[must_use]
    pub fn current_row(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES - self.history.len()
    }

    #[must_use]
    pub fn letter_status(&self) -> &LetterTracker {
        &self.letters
    }

    #[must_use]
    pub fn revealed_secret(&self) -> Option<Word> {
        self.status.is_over().then_some(self.secret)
    }

    #[must_use]
    pub fn streaks(&self) -> &StreakStore<S> {
        &self.streaks
    }

    pub fn streaks_mut(&mut self) -> &mut StreakStore<S> {
        &mut self.streaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ValidationError, WordSourceError};
    use crate::feedback::LetterMark;
    use crate::storage::MemoryStore;
    use crate::word_source::{EmbeddedWordSource, load_words_from_str};
    use async_trait::async_trait;

    const WORDS: &str = "apple\nbrain\nchair\ndance\nearth\nfruit\ngrass\nhappy\nideas\nalert";

    fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    fn session(secret: &str) -> GameSession<EmbeddedWordSource, MemoryStore> {
        let source = EmbeddedWordSource::new(load_words_from_str(WORDS));
        GameSession::new(source, StreakStore::open(MemoryStore::new()), word(secret))
    }

    struct UnavailableSource;

    #[async_trait]
    impl WordSource for UnavailableSource {
        async fn is_valid_word(&self, _word: &Word) -> bool {
            false
        }

        async fn random_secret_word(&self) -> Result<Word, WordSourceError> {
            Err(WordSourceError::Empty)
        }
    }

    #[test]
    fn test_default_secret() {
        assert_eq!(DEFAULT_SECRET.as_str(), "APPLE");
    }

    #[tokio::test]
    async fn test_correct_guess_wins() {
        let mut game = session("APPLE");
        let guess = game.submit_guess("apple").await.unwrap();
        assert!(guess.feedback.is_solved());
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.current_row(), 1);
        assert_eq!(game.revealed_secret(), Some(word("APPLE")));

        let streak = game.stats().streak;
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.total_wins, 1);
        assert_eq!(streak.total_games, 1);
    }

    #[tokio::test]
    async fn test_six_misses_lose_and_seventh_is_rejected() {
        let mut game = session("APPLE");
        for (i, w) in ["BRAIN", "CHAIR", "DANCE", "EARTH", "FRUIT", "GRASS"]
            .iter()
            .enumerate()
        {
            assert_eq!(game.status(), GameStatus::InProgress);
            assert_eq!(game.revealed_secret(), None);
            game.submit_guess(w).await.unwrap();
            assert_eq!(game.current_row(), i + 1);
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.remaining_guesses(), 0);

        let before = game.stats();
        assert_eq!(
            game.submit_guess("HAPPY").await,
            Err(SubmitError::GameOver)
        );
        assert_eq!(game.stats(), before);
        assert_eq!(before.streak.total_games, 1);
        assert_eq!(before.streak.total_wins, 0);
    }

    #[tokio::test]
    async fn test_win_on_last_guess_is_a_win() {
        let mut game = session("APPLE");
        for w in ["BRAIN", "CHAIR", "DANCE", "EARTH", "FRUIT"] {
            game.submit_guess(w).await.unwrap();
        }
        game.submit_guess("APPLE").await.unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.stats().streak.total_wins, 1);
    }

    #[tokio::test]
    async fn test_guess_after_win_is_game_over() {
        let mut game = session("APPLE");
        game.submit_guess("APPLE").await.unwrap();
        assert_eq!(game.submit_guess("BRAIN").await, Err(SubmitError::GameOver));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.stats().streak.total_games, 1);
    }

    #[tokio::test]
    async fn test_rejections_do_not_mutate() {
        let mut game = session("APPLE");
        game.submit_guess("BRAIN").await.unwrap();
        let before = game.stats();

        let cases = [
            ("BRAI", SubmitError::Invalid(ValidationError::MalformedGuess("BRAI".into()))),
            ("brain", SubmitError::Invalid(ValidationError::DuplicateGuess(word("BRAIN")))),
            ("ZZZZZ", SubmitError::Invalid(ValidationError::UnknownWord(word("ZZZZZ")))),
        ];
        for (raw, expected) in cases {
            assert_eq!(game.submit_guess(raw).await, Err(expected));
            assert_eq!(game.stats(), before);
        }
    }

    #[tokio::test]
    async fn test_letter_status_tracks_best_mark() {
        let mut game = session("APPLE");
        game.submit_guess("ALERT").await.unwrap();
        assert_eq!(game.letter_status().get('A'), Some(LetterMark::Correct));
        assert_eq!(game.letter_status().get('L'), Some(LetterMark::Present));
        assert_eq!(game.letter_status().get('R'), Some(LetterMark::Absent));

        // CHAIR puts A in the wrong spot; the tracked mark stays Correct.
        game.submit_guess("CHAIR").await.unwrap();
        assert_eq!(game.letter_status().get('A'), Some(LetterMark::Correct));
    }

    #[tokio::test]
    async fn test_start_resets_everything() {
        let mut game = session("APPLE");
        game.submit_guess("APPLE").await.unwrap();
        game.start(word("BRAIN"));
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.history().is_empty());
        assert!(game.letter_status().is_empty());
        assert_eq!(game.remaining_guesses(), MAX_GUESSES);
        // The streak belongs to the device, not the game.
        assert_eq!(game.stats().streak.current_streak, 1);
        assert!(game.submit_guess("BRAIN").await.unwrap().feedback.is_solved());
    }

    #[tokio::test]
    async fn test_new_game_falls_back_to_default_secret() {
        let game = GameSession::begin(UnavailableSource, StreakStore::open(MemoryStore::new())).await;
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.secret, DEFAULT_SECRET);
    }

    #[tokio::test]
    async fn test_new_game_picks_from_word_source() {
        let source = EmbeddedWordSource::new(load_words_from_str("chair"));
        let game = GameSession::begin(source, StreakStore::open(MemoryStore::new())).await;
        assert_eq!(game.secret, word("CHAIR"));
    }

    #[tokio::test]
    async fn test_new_game_expires_stale_streak() {
        let mut game = session("APPLE");
        game.submit_guess("APPLE").await.unwrap();
        let long_ago = chrono::Utc::now() - chrono::TimeDelta::hours(30);
        game.streaks_mut().record_win_at(long_ago);
        assert_eq!(game.streaks().record().current_streak, 2);

        game.new_game().await;
        assert_eq!(game.streaks().record().current_streak, 0);
        assert_eq!(game.streaks().record().longest_streak, 2);
    }
}
