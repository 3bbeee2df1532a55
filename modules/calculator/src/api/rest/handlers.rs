//! REST handlers for the calculator module

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::Extension;
use serde::de;
use serde_json::Value;

use crate::config::CalculatorConfig;
use crate::domain::Service;

use super::dto::{CalculateRequest, CalculateResponse, ErrorResponse};
use super::error::{ApiError, ErrorReply};

/// Handler for POST /api/v1/calculate
///
/// The body is decoded as JSON whatever its `Content-Type`, so a decode
/// failure always yields 400 rather than axum's 415.
#[utoipa::path(
    post,
    path = "/api/v1/calculate",
    tag = "calculator",
    operation_id = "calculator.calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Expression evaluated", body = CalculateResponse),
        (status = 400, description = "Body is not a valid calculate request", body = ErrorResponse),
        (status = 422, description = "Expression is not valid", body = ErrorResponse),
    )
)]
#[allow(clippy::unused_async)]
pub async fn handle_calculate(
    Extension(service): Extension<Arc<Service>>,
    Extension(config): Extension<Arc<CalculatorConfig>>,
    body: Bytes,
) -> Result<Json<CalculateResponse>, ErrorReply> {
    calculate(&service, &config, &body).map_err(|e| e.into_reply(config.expose_error_details))
}

fn calculate(
    service: &Service,
    config: &CalculatorConfig,
    body: &[u8],
) -> Result<Json<CalculateResponse>, ApiError> {
    let req = decode_request(body).map_err(ApiError::InvalidRequestFormat)?;

    if let Some(limit) = config.max_expression_len
        && req.expression.chars().count() > limit
    {
        return Err(ApiError::ExpressionTooLong { limit });
    }

    let result = service.calculate(&req.expression)?;
    Ok(Json(CalculateResponse { result }))
}

/// Decodes the first JSON value of the body.
///
/// Text after that value is ignored. A top-level `null` is an empty request;
/// any other non-object value is a format error.
fn decode_request(body: &[u8]) -> Result<CalculateRequest, serde_json::Error> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .unwrap_or_else(|| Err(de::Error::custom("request body is empty")))?;

    match value {
        Value::Null => Ok(CalculateRequest::default()),
        Value::Object(_) => serde_json::from_value(value),
        _ => Err(de::Error::custom("request body is not a JSON object")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn run(config: &CalculatorConfig, body: &str) -> Result<f64, ApiError> {
        calculate(&Service::new(), config, body.as_bytes()).map(|Json(resp)| resp.result)
    }

    #[test]
    fn test_calculate_success() {
        let cfg = CalculatorConfig::default();
        assert_eq!(run(&cfg, r#"{"expression":"2+2"}"#).unwrap(), 4.0);
    }

    #[test]
    fn test_calculate_malformed_body() {
        let cfg = CalculatorConfig::default();
        for body in [
            "",
            "  \n",
            "{",
            "not json",
            r#"{"expression":5}"#,
            "[]",
            r#"["1+1"]"#,
            r#""1+1""#,
            "42",
        ] {
            assert!(
                matches!(run(&cfg, body), Err(ApiError::InvalidRequestFormat(_))),
                "{body:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_calculate_length_guard() {
        let cfg = CalculatorConfig {
            max_expression_len: Some(5),
            ..CalculatorConfig::default()
        };
        assert_eq!(run(&cfg, r#"{"expression":"1+2+3"}"#).unwrap(), 6.0);
        assert!(matches!(
            run(&cfg, r#"{"expression":"1+2+3+4"}"#),
            Err(ApiError::ExpressionTooLong { limit: 5 })
        ));
    }

    #[test]
    fn test_calculate_domain_error() {
        let cfg = CalculatorConfig::default();
        assert!(matches!(
            run(&cfg, r#"{"expression":"2/0"}"#),
            Err(ApiError::Calculation(_))
        ));
    }

    #[test]
    fn test_null_expression_is_empty() {
        let cfg = CalculatorConfig::default();
        for body in [r#"{"expression":null}"#, "null", "{}"] {
            assert!(
                matches!(run(&cfg, body), Err(ApiError::Calculation(_))),
                "{body:?} should reach the calculator"
            );
        }
    }

    #[test]
    fn test_trailing_text_after_body_is_ignored() {
        let cfg = CalculatorConfig::default();
        assert_eq!(run(&cfg, r#"{"expression":"1+1"} trailing"#).unwrap(), 2.0);
        assert_eq!(run(&cfg, "{\"expression\":\"3*3\"}\n{\"expression\":\"0\"}").unwrap(), 9.0);
    }
}
