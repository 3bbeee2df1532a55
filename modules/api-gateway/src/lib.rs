//! HTTP host for the calculator server.
//!
//! Owns the shared middleware stack and the listener lifecycle. Modules only
//! contribute routes; they never bind sockets themselves.

mod gateway;

pub use gateway::{ApiGateway, REQUEST_ID_HEADER, request_id_header};
