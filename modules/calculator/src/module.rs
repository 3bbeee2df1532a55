//! Calculator module wiring.

use std::sync::Arc;

use axum::Router;
use calc_bootstrap::{ConfigError, ConfigProvider, module_config_or_default};
use utoipa::OpenApi;

use crate::api::rest::{ApiDoc, routes};
use crate::config::CalculatorConfig;
use crate::domain::Service;

/// The calculator module: owns the domain service and its REST routes.
#[derive(Debug, Clone)]
pub struct CalculatorModule {
    service: Arc<Service>,
    config: CalculatorConfig,
}

impl CalculatorModule {
    /// Name of the configuration section (`modules.calculator.config`).
    pub const NAME: &'static str = "calculator";

    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            service: Arc::new(Service::new()),
            config,
        }
    }

    /// Builds the module from its configuration section, using defaults
    /// when the section is absent.
    ///
    /// # Errors
    /// Returns `ConfigError` if the section is present but invalid.
    pub fn init(provider: &dyn ConfigProvider) -> Result<Self, ConfigError> {
        let config: CalculatorConfig = module_config_or_default(provider, Self::NAME)?;
        tracing::info!(
            expose_error_details = config.expose_error_details,
            max_expression_len = ?config.max_expression_len,
            "Calculator module initialized"
        );
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Adds the calculator routes to `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.service(), &self.config)
    }

    /// `OpenAPI` document of the module's REST API.
    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use calc_bootstrap::AppConfig;
    use serde_json::json;

    #[test]
    fn test_init_without_section_uses_defaults() {
        let module = CalculatorModule::init(&AppConfig::default()).unwrap();
        assert_eq!(module.config(), &CalculatorConfig::default());
    }

    #[test]
    fn test_init_reads_section() {
        let mut app = AppConfig::default();
        app.modules.insert(
            CalculatorModule::NAME.to_owned(),
            json!({ "config": { "expose_error_details": true, "max_expression_len": 32 } }),
        );

        let module = CalculatorModule::init(&app).unwrap();
        assert!(module.config().expose_error_details);
        assert_eq!(module.config().max_expression_len, Some(32));
    }

    #[test]
    fn test_init_rejects_invalid_section() {
        let mut app = AppConfig::default();
        app.modules.insert(
            CalculatorModule::NAME.to_owned(),
            json!({ "config": { "expose_error_details": "sometimes" } }),
        );

        assert!(CalculatorModule::init(&app).is_err());
    }
}
