//! Domain error types for the calculator module.

use thiserror::Error;

/// Failure kinds produced while calculating an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The expression contains a character outside `0-9 . + - * /`.
    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// An operand does not parse as a finite number (empty, lone `.`, two dots).
    #[error("Invalid number literal '{literal}'")]
    NumericParse { literal: String },

    /// The right operand of a `/` is exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The token stream did not reduce to exactly one finite value.
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

impl DomainError {
    /// Creates an `InvalidCharacter` error.
    #[must_use]
    pub fn invalid_character(ch: char, position: usize) -> Self {
        Self::InvalidCharacter { ch, position }
    }

    /// Creates a `NumericParse` error.
    #[must_use]
    pub fn numeric_parse(literal: impl Into<String>) -> Self {
        Self::NumericParse {
            literal: literal.into(),
        }
    }

    /// Creates an `Evaluation` error.
    #[must_use]
    pub fn evaluation(reason: impl Into<String>) -> Self {
        Self::Evaluation(reason.into())
    }

    /// Stable machine-readable code for logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter { .. } => "INVALID_CHARACTER",
            Self::NumericParse { .. } => "NUMERIC_PARSE",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::Evaluation(_) => "EVALUATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = DomainError::invalid_character('a', 2);
        assert!(matches!(
            err,
            DomainError::InvalidCharacter {
                ch: 'a',
                position: 2
            }
        ));

        let err = DomainError::numeric_parse("1.2.3");
        assert!(matches!(err, DomainError::NumericParse { .. }));

        let err = DomainError::evaluation("dangling operator");
        assert!(matches!(err, DomainError::Evaluation(_)));
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::invalid_character('(', 0);
        assert_eq!(err.to_string(), "Invalid character '(' at position 0");

        let err = DomainError::numeric_parse("");
        assert_eq!(err.to_string(), "Invalid number literal ''");

        assert_eq!(DomainError::DivisionByZero.to_string(), "Division by zero");

        let err = DomainError::evaluation("2 operands left");
        assert_eq!(err.to_string(), "Evaluation error: 2 operands left");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::DivisionByZero.code(), "DIVISION_BY_ZERO");
        assert_eq!(DomainError::numeric_parse(".").code(), "NUMERIC_PARSE");
        assert_eq!(DomainError::invalid_character('x', 1).code(), "INVALID_CHARACTER");
        assert_eq!(DomainError::evaluation("x").code(), "EVALUATION");
    }
}
