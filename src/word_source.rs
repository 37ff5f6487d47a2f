//! Where words come from: validity checks for guesses and secret selection.

use crate::error::WordSourceError;
use crate::word::Word;
use crate::{debug_log, info_log};
use async_trait::async_trait;
use rand::prelude::IndexedRandom;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

pub const EMBEDDED_WORDS: &str = include_str!("resources/words.txt");

pub const DEFAULT_DICTIONARY_API: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Secrets are drawn from the head of the list, where the everyday words are.
pub const SECRET_POOL_SIZE: usize = 100;

/// Proper nouns that are fine to guess but never used as the secret.
pub const PERSON_NAMES: [&str; 17] = [
    "BILLY", "HARRY", "JIMMY", "JONES", "LEWIS", "MARIA", "PETER", "ROBIN", "ROGER", "SMITH",
    "TERRY", "TYLER", "FRANK", "JAPAN", "TEXAS", "ROMAN", "WELSH",
];

const DICTIONARY_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait WordSource: Send + Sync {
    /// Whether `word` is an acceptable guess. Lookup failures answer `false`.
    async fn is_valid_word(&self, word: &Word) -> bool;

    /// A word suitable as the secret; never a person name.
    async fn random_secret_word(&self) -> Result<Word, WordSourceError>;

    /// Check several words, one lookup at a time. Answers line up with `words`.
    async fn validate_words(&self, words: &[Word]) -> Vec<bool> {
        let mut answers = Vec::with_capacity(words.len());
        for word in words {
            answers.push(self.is_valid_word(word).await);
        }
        answers
    }
}

#[async_trait]
impl<T: WordSource + ?Sized> WordSource for Box<T> {
    async fn is_valid_word(&self, word: &Word) -> bool {
        (**self).is_valid_word(word).await
    }

    async fn random_secret_word(&self) -> Result<Word, WordSourceError> {
        (**self).random_secret_word().await
    }

    async fn validate_words(&self, words: &[Word]) -> Vec<bool> {
        (**self).validate_words(words).await
    }
}

pub fn load_words_from_str(data: &str) -> Vec<Word> {
    data.lines()
        .filter_map(|line| Word::parse(line.trim()).ok())
        .collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Ok(word) = Word::parse(line?.trim()) {
            words.push(word);
        }
    }
    Ok(words)
}

#[must_use]
pub fn is_person_name(word: &Word) -> bool {
    PERSON_NAMES.contains(&word.as_str())
}

/// A curated list held in memory.
#[derive(Debug, Clone)]
pub struct EmbeddedWordSource {
    words: Vec<Word>,
    lookup: HashSet<Word>,
}

impl EmbeddedWordSource {
    pub fn new(words: Vec<Word>) -> Self {
        let lookup = words.iter().copied().collect();
        Self { words, lookup }
    }

    /// The list compiled into the binary.
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(load_words_from_str(EMBEDDED_WORDS))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.lookup.contains(word)
    }

    fn secret_pool(&self) -> Vec<Word> {
        self.words
            .iter()
            .take(SECRET_POOL_SIZE)
            .filter(|w| !is_person_name(w))
            .copied()
            .collect()
    }

    pub fn pick_secret(&self) -> Result<Word, WordSourceError> {
        let mut rng = rand::rng();
        let pool = self.secret_pool();
        let chosen = if pool.is_empty() {
            // Only names at the head of the list; any word beats none.
            self.words.choose(&mut rng)
        } else {
            pool.choose(&mut rng)
        };
        chosen.copied().ok_or(WordSourceError::Empty)
    }
}

#[async_trait]
impl WordSource for EmbeddedWordSource {
    async fn is_valid_word(&self, word: &Word) -> bool {
        self.contains(word)
    }

    async fn random_secret_word(&self) -> Result<Word, WordSourceError> {
        self.pick_secret()
    }
}

/// Accepts anything in its local list, and asks a dictionary API about the rest.
pub struct DictionaryWordSource {
    local: EmbeddedWordSource,
    client: reqwest::Client,
    api_base: String,
}

impl DictionaryWordSource {
    pub fn new(local: EmbeddedWordSource, api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DICTIONARY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            local,
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn entry_url(&self, word: &Word) -> String {
        format!("{}/{}", self.api_base, word.as_str().to_ascii_lowercase())
    }
}

#[async_trait]
impl WordSource for DictionaryWordSource {
    async fn is_valid_word(&self, word: &Word) -> bool {
        if self.local.contains(word) {
            return true;
        }
        let url = self.entry_url(word);
        debug_log!("Looking up {word} at {url}");
        match self.client.get(&url).send().await {
            Ok(response) => {
                info_log!("Dictionary answered {} for {word}", response.status());
                response.status().is_success()
            }
            Err(e) => {
                log::warn!("Dictionary lookup for {word} failed: {e}");
                false
            }
        }
    }

    async fn random_secret_word(&self) -> Result<Word, WordSourceError> {
        self.local.pick_secret()
    }
}
