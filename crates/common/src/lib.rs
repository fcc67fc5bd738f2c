//! Shared building blocks for the Courier relay: the message model,
//! configuration, error type and tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;
