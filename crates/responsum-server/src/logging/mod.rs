//! Request diagnostics
//!
//! Trace ids for correlating the entry and exit lines of a request.

mod trace_context;

pub use trace_context::{generate_trace_id, RequestSpan, TraceContext};
