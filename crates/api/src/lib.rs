//! Courier HTTP server.
//!
//! Endpoints:
//! - POST /v1/notifications — relay a message to a set of Telegram chats
//! - GET  /health — liveness probe

pub mod cli;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
