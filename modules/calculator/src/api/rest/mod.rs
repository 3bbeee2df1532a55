//! REST API layer for the calculator module.

use utoipa::OpenApi;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

/// `OpenAPI` document for the calculator REST API.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::handle_calculate),
    components(schemas(dto::CalculateRequest, dto::CalculateResponse, dto::ErrorResponse)),
    tags((name = "calculator", description = "Arithmetic expression evaluation"))
)]
pub struct ApiDoc;
