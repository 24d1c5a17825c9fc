//! # Responsum API
//!
//! HTTP client for the tenant API and the example operations built on it.
//!
//! ## Modules
//!
//! - `client` - `ResponsumClient`, one method per endpoint
//! - `error` - `ApiError`
//! - `operations` - Logged, failure-tolerant compositions of client calls

pub mod client;
pub mod error;
pub mod operations;

pub use client::{ModelFilter, ResponsumClient};
pub use error::ApiError;
