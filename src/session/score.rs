use crate::config::MAX_SCORE;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("score must be a whole number, got \"{0}\"")]
    NotANumber(String),
    #[error("score must be between 0 and {max}, got {0}", max = MAX_SCORE)]
    OutOfRange(i64),
}

/// Parses the stage score field. An empty field means "no score".
pub fn parse_score(input: &str) -> Result<Option<u8>, ScoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ScoreError::NotANumber(trimmed.to_string()))?;

    u8::try_from(value)
        .ok()
        .filter(|score| *score <= MAX_SCORE)
        .map(Some)
        .ok_or(ScoreError::OutOfRange(value))
}
