//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! trace identifiers and the request scope used by problem responses.

pub mod trace;

pub use trace::{RequestScope, TRACE_ID_HEADER, Trace, TraceId};
