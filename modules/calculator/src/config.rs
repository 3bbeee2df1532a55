//! Configuration for the calculator module.

use serde::{Deserialize, Serialize};

/// Configuration for the calculator module (`modules.calculator.config`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculatorConfig {
    /// Return the evaluator's own message in 422 bodies instead of the
    /// generic "Expression is not valid".
    pub expose_error_details: bool,

    /// Reject expressions longer than this many characters (before
    /// normalization). Unlimited when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_expression_len: Option<usize>,
}
