//! REST DTOs for the calculator module
//!
//! These types are transport-specific (serde + utoipa for REST/OpenAPI).

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Request to evaluate an expression.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Expression such as `"2 + 3 * 4"`. A missing or `null` field is an
    /// empty expression.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "2+3*4")]
    pub expression: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response containing the value of the expression.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculateResponse {
    /// The evaluated value
    pub result: f64,
}

/// Error envelope for 400 and 422 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message. Clients should rely on the status code, not the wording.
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
