//! Lexical checks applied before evaluation.

use super::error::DomainError;

/// Removes every space character, including spaces between digits.
#[must_use]
pub fn normalize(expression: &str) -> String {
    expression.chars().filter(|&c| c != ' ').collect()
}

/// Returns true when `c` may appear in a normalized expression.
#[must_use]
pub const fn is_allowed(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '+' | '-' | '*' | '/')
}

/// Checks that every character belongs to the allowed alphabet.
///
/// Purely lexical: `"+5"` or `"5++5"` pass here and fail during evaluation.
#[must_use]
pub fn is_valid(expression: &str) -> bool {
    expression.chars().all(is_allowed)
}

/// Position and value of the first character outside the alphabet.
#[must_use]
pub fn first_invalid(expression: &str) -> Option<(usize, char)> {
    expression.chars().enumerate().find(|&(_, c)| !is_allowed(c))
}

/// Like [`is_valid`], but reports the first offending character.
///
/// # Errors
/// Returns `DomainError::InvalidCharacter` for the first character outside the alphabet.
pub fn validate(expression: &str) -> Result<(), DomainError> {
    match first_invalid(expression) {
        Some((position, ch)) => Err(DomainError::invalid_character(ch, position)),
        None => Ok(()),
    }
}
