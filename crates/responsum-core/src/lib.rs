//! # Responsum Core
//!
//! Shared building blocks for the Responsum API example.
//!
//! ## Modules
//!
//! - `branding` - Product naming and default endpoints
//! - `config` - Environment-driven configuration
//! - `domain` - Tenant schema types used by the example operations

pub mod branding;
pub mod config;
pub mod domain;

pub use config::{ConfigError, ExampleConfig};
pub use domain::*;
