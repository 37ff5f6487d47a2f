use std::fmt;
use std::str::FromStr;

pub const WORD_LENGTH: usize = 5;

/// A five-letter word, always stored as uppercase ASCII `A`-`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

/// Returned by [`Word::parse`] for anything that is not exactly five letters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{input:?} is not a five-letter word")]
pub struct ParseWordError {
    pub input: String,
}

impl Word {
    /// Parse a word case-insensitively. No trimming is done here; callers
    /// reading user input trim before handing the string over.
    pub fn parse(input: &str) -> Result<Self, ParseWordError> {
        let bytes = input.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(ParseWordError {
                input: input.to_string(),
            });
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    /// Build a word from uppercase ASCII letters; usable in constants.
    #[must_use]
    pub const fn from_ascii(letters: [u8; WORD_LENGTH]) -> Option<Self> {
        let mut i = 0;
        while i < WORD_LENGTH {
            if !letters[i].is_ascii_uppercase() {
                return None;
            }
            i += 1;
        }
        Some(Self(letters))
    }

    #[must_use]
    pub fn letters(&self) -> [char; WORD_LENGTH] {
        self.0.map(char::from)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Number of occurrences of `letter` in this word.
    #[must_use]
    pub fn count(&self, letter: char) -> usize {
        self.letters().iter().filter(|&&c| c == letter).count()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
