//! Host-side plumbing shared by the calculator server: layered configuration,
//! logging initialization and shutdown signals.

pub mod config;
pub mod logging;
pub mod signals;

pub use config::*;
pub use logging::*;
pub use signals::*;
