use crate::feedback::{Guess, LetterMark};
use std::collections::BTreeMap;

/// Best-known mark per letter across every guess of a session.
///
/// Backs the on-screen keyboard. A letter's mark only ever moves up the
/// `Absent < Present < Correct` order; letters never guessed are absent from
/// the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterTracker {
    marks: BTreeMap<char, LetterMark>,
}

impl LetterTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, guess: &Guess) {
        for (letter, &mark) in guess.word.letters().into_iter().zip(guess.feedback.marks()) {
            self.marks
                .entry(letter)
                .and_modify(|best| *best = (*best).max(mark))
                .or_insert(mark);
        }
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterMark> {
        self.marks.get(&letter.to_ascii_uppercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterMark)> + '_ {
        self.marks.iter().map(|(&c, &m)| (c, m))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}
