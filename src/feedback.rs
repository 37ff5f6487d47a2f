use crate::word::{WORD_LENGTH, Word};
use std::fmt;

/// Evaluation of a single letter position.
///
/// Ordered `Absent < Present < Correct` so the best-known status of a letter
/// is simply the maximum of everything seen for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterMark {
    Absent,  // Gray
    Present, // Yellow
    Correct, // Green
}

impl LetterMark {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Per-letter marks for one guess, index-aligned with the guessed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([LetterMark; WORD_LENGTH]);

impl Feedback {
    #[must_use]
    pub fn marks(&self) -> &[LetterMark; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&m| m == LetterMark::Correct)
    }
}

impl From<[LetterMark; WORD_LENGTH]> for Feedback {
    fn from(marks: [LetterMark; WORD_LENGTH]) -> Self {
        Self(marks)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.0 {
            write!(f, "{}", mark.as_char())?;
        }
        Ok(())
    }
}

/// A submitted word together with its evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    pub word: Word,
    pub feedback: Feedback,
}

/// Compute the feedback for `guess` against `secret`.
///
/// Exact matches are resolved first and consume their secret letter, then
/// every remaining guess letter takes the first unconsumed occurrence of
/// itself in the secret, if any. A letter is therefore never reported as
/// `Correct` or `Present` more often than it occurs in the secret.
#[must_use]
pub fn evaluate(secret: &Word, guess: &Word) -> Feedback {
    let mut marks = [LetterMark::Absent; WORD_LENGTH];
    let mut secret_chars: [Option<char>; WORD_LENGTH] = secret.letters().map(Some);
    let guess_chars = guess.letters();

    // First pass: greens
    for i in 0..WORD_LENGTH {
        if secret_chars[i] == Some(guess_chars[i]) {
            marks[i] = LetterMark::Correct;
            secret_chars[i] = None;
        }
    }
    // Second pass: yellows
    for i in 0..WORD_LENGTH {
        if marks[i] == LetterMark::Correct {
            continue;
        }
        if let Some(pos) = secret_chars.iter().position(|&c| c == Some(guess_chars[i])) {
            marks[i] = LetterMark::Present;
            secret_chars[pos] = None;
        }
    }
    Feedback(marks)
}
