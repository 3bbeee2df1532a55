//! Domain service for the calculator
//!
//! Runs the full `normalize -> validate -> evaluate` pipeline.

use tracing::{debug, instrument};

use super::error::DomainError;
use super::{evaluator, validator};

/// Stateless calculation service.
///
/// Every call works on call-local buffers only, so one instance is shared
/// behind an `Arc` by all request handlers.
#[derive(Clone, Debug, Default)]
pub struct Service;

impl Service {
    /// Create a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Calculate an arithmetic expression.
    ///
    /// Spaces are removed first, so `"3 + 4"` evaluates like `"3+4"`.
    ///
    /// # Errors
    /// Returns the `DomainError` of the first failing stage.
    #[instrument(level = "debug", skip(self))]
    pub fn calculate(&self, expression: &str) -> Result<f64, DomainError> {
        let normalized = validator::normalize(expression);
        if !validator::is_valid(&normalized) {
            // Locate the offending character only on failure.
            validator::validate(&normalized)?;
        }

        match evaluator::evaluate(&normalized) {
            Ok(value) => {
                debug!(value, "expression evaluated");
                Ok(value)
            }
            Err(e) => {
                debug!(code = e.code(), error = %e, "expression rejected");
                Err(e)
            }
        }
    }
}
