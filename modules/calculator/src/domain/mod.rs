//! Domain layer for the calculator module
//!
//! Normalization, lexical validation, tokenization and two-tier reduction.

pub mod error;
pub mod evaluator;
pub mod service;
pub mod validator;

pub use error::DomainError;
pub use service::Service;
