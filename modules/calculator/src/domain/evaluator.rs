//! Expression evaluator.
//!
//! Evaluation happens in two steps:
//!
//! 1. [`tokenize`] scans a validated expression once and splits it into two
//!    parallel sequences: operands and the binary operators between them.
//! 2. [`reduce`] resolves the sequences in two passes. The first pass folds
//!    every `*` and `/` left to right, producing a new, shorter stream that only
//!    holds `+` and `-`. The second pass folds that stream left to right.
//!
//! For a flat grammar without parentheses or unary operators the two passes
//! agree with standard arithmetic precedence.

use std::fmt;

use super::error::DomainError;

/// Binary operator of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Maps an operator character to its variant.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Tier 1 operators (`*`, `/`) bind tighter than tier 2 (`+`, `-`).
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    /// Combines two operands.
    ///
    /// # Errors
    /// Returns `DomainError::DivisionByZero` when dividing by exactly zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, DomainError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Sub => Ok(lhs - rhs),
            Self::Mul => Ok(lhs * rhs),
            Self::Div if rhs == 0.0 => Err(DomainError::DivisionByZero),
            Self::Div => Ok(lhs / rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Operands and operators in source order.
///
/// A stream that reduces successfully has exactly one more operand than
/// operators. Other shapes come from leading, trailing or doubled operators
/// and are rejected by [`reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    pub operands: Vec<f64>,
    pub operators: Vec<Operator>,
}

/// Splits an expression into operands and operators.
///
/// # Errors
/// - `DomainError::NumericParse` if the text before an operator, or the
///   trailing text, is not a finite number. An empty operand (as in `"+5"`
///   or `"5++5"`) is always a parse failure.
/// - `DomainError::InvalidCharacter` for anything outside `0-9 . + - * /`.
pub fn tokenize(expression: &str) -> Result<TokenStream, DomainError> {
    let mut stream = TokenStream::default();
    let mut buffer = String::new();

    for (position, c) in expression.chars().enumerate() {
        if c.is_ascii_digit() || c == '.' {
            buffer.push(c);
        } else if let Some(op) = Operator::from_char(c) {
            stream.operands.push(parse_operand(&buffer)?);
            stream.operators.push(op);
            buffer.clear();
        } else {
            return Err(DomainError::invalid_character(c, position));
        }
    }

    // A trailing operator leaves the buffer empty; reduce() reports the missing operand.
    if !buffer.is_empty() {
        stream.operands.push(parse_operand(&buffer)?);
    }

    Ok(stream)
}

fn parse_operand(literal: &str) -> Result<f64, DomainError> {
    literal
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DomainError::numeric_parse(literal))
}

/// Reduces a token stream to a single value.
///
/// # Errors
/// - `DomainError::DivisionByZero` if any `/` has a zero right operand.
/// - `DomainError::Evaluation` if the stream does not have exactly one more
///   operand than operators, or the result is not finite.
pub fn reduce(stream: &TokenStream) -> Result<f64, DomainError> {
    let additive = resolve_multiplicative(stream)?;
    let value = resolve_additive(&additive)?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::evaluation("result is not a finite number"))
    }
}

/// Tokenizes and reduces an expression that already passed validation.
///
/// # Errors
/// Any error from [`tokenize`] or [`reduce`].
pub fn evaluate(expression: &str) -> Result<f64, DomainError> {
    reduce(&tokenize(expression)?)
}

/// Tier 1: folds runs joined by `*` or `/` into single operands.
///
/// Builds a new stream instead of shrinking the input while scanning it.
fn resolve_multiplicative(stream: &TokenStream) -> Result<TokenStream, DomainError> {
    let mut operands = stream.operands.iter().copied();
    let mut acc = operands
        .next()
        .ok_or_else(|| DomainError::evaluation("expression has no operands"))?;
    let mut reduced = TokenStream::default();

    for &op in &stream.operators {
        let rhs = operands.next().ok_or_else(|| {
            DomainError::evaluation(format!("operator '{op}' is missing its right operand"))
        })?;

        if op.is_multiplicative() {
            acc = op.apply(acc, rhs)?;
        } else {
            reduced.operands.push(acc);
            reduced.operators.push(op);
            acc = rhs;
        }
    }
    reduced.operands.push(acc);

    let leftover = operands.count();
    if leftover > 0 {
        return Err(DomainError::evaluation(format!(
            "{leftover} operand(s) without an operator"
        )));
    }

    Ok(reduced)
}

/// Tier 2: folds the remaining `+` and `-` left to right.
fn resolve_additive(stream: &TokenStream) -> Result<f64, DomainError> {
    let Some((&first, rest)) = stream.operands.split_first() else {
        return Err(DomainError::evaluation("expression has no operands"));
    };
    if rest.len() != stream.operators.len() {
        return Err(DomainError::evaluation(format!(
            "{} operands left for {} operators",
            stream.operands.len(),
            stream.operators.len()
        )));
    }

    stream
        .operators
        .iter()
        .zip(rest)
        .try_fold(first, |acc, (&op, &rhs)| op.apply(acc, rhs))
}
