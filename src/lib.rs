// Library interface for guess5
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod storage;
pub mod streak;
pub mod tracker;
pub mod tui;
pub mod validator;
pub mod word;
pub mod word_source;

// Re-export commonly used items for easier testing
pub use error::{StorageError, SubmitError, ValidationError, WordSourceError};
pub use feedback::{Feedback, Guess, LetterMark, evaluate};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use session::{DEFAULT_SECRET, GameSession, GameSnapshot, GameStatus, MAX_GUESSES};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use streak::{StreakRecord, StreakStats, StreakStore};
pub use tracker::LetterTracker;
pub use word::Word;
pub use word_source::{
    DictionaryWordSource, EmbeddedWordSource, WordSource, load_words_from_file,
    load_words_from_str,
};
