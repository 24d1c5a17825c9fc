//! Responsum Example Server
//!
//! Local web server that provides:
//! - A log viewer page polling the in-memory log
//! - Endpoints that run the example operations against the tenant API
//! - A webhook endpoint that logs what it receives

pub mod logging;
pub mod server;

pub use server::{build_router, AppState, ExampleServer, ServerConfig, ServerError};
