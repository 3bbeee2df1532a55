//! Calculator Module
//!
//! Evaluates basic arithmetic expressions (`+ - * /`, decimal literals) and
//! exposes them over `POST /api/v1/calculate`.
//!
//! ## Architecture
//!
//! - `domain/validator.rs` - Normalization and lexical validation
//! - `domain/evaluator.rs` - Tokenization and two-tier reduction
//! - `domain/service.rs` - The `calculate` pipeline
//! - `api/rest/` - DTOs, handler, error mapping and routes
//! - `module.rs` - Configuration loading and route registration

// === MODULE DEFINITION ===
mod module;
pub use module::CalculatorModule;

pub mod config;
pub use config::CalculatorConfig;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;

pub use domain::{DomainError, Service};
