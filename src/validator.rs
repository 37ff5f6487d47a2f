use crate::error::ValidationError;
use crate::feedback::Guess;
use crate::word::Word;
use crate::word_source::WordSource;

/// Approve a raw guess against the current history, cheapest check first.
///
/// The dictionary lookup runs last, so malformed and repeated guesses never
/// reach the word source.
pub async fn validate<W: WordSource + ?Sized>(
    candidate: &str,
    history: &[Guess],
    word_source: &W,
) -> Result<Word, ValidationError> {
    let word = Word::parse(candidate)
        .map_err(|e| ValidationError::MalformedGuess(e.input))?;

    if history.iter().any(|g| g.word == word) {
        return Err(ValidationError::DuplicateGuess(word));
    }

    if !word_source.is_valid_word(&word).await {
        return Err(ValidationError::UnknownWord(word));
    }

    Ok(word)
}
