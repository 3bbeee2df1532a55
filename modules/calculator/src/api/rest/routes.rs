//! Route registration for the calculator module

use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Router};

use crate::config::CalculatorConfig;
use crate::domain::Service;

use super::handlers;

/// Path of the single calculator endpoint.
pub const CALCULATE_PATH: &str = "/api/v1/calculate";

/// Register all REST routes for the calculator module.
///
/// # Arguments
/// * `router` - Axum router to add routes to
/// * `service` - Domain Service
/// * `config` - Module configuration, shared with handlers
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    config: &CalculatorConfig,
) -> Router {
    // POST /api/v1/calculate - Evaluate an arithmetic expression
    let router = router.route(CALCULATE_PATH, post(handlers::handle_calculate));

    router
        .layer(Extension(service))
        .layer(Extension(Arc::new(config.clone())))
}
