//! Driving port for thing lookups.
//!
//! Inbound adapters dispatch queries through this port instead of calling the
//! service directly, so handlers stay testable with a mock and the simulated
//! delay can be swapped out.

use async_trait::async_trait;

use crate::domain::{DomainError, Fault, Thing, ThingMode};

/// Business outcome of a query: a value or a domain error.
///
/// The outer `Result` of a port method carries faults; this inner one carries
/// expected business failures.
pub type QueryOutcome<T> = Result<T, DomainError>;

/// Domain use-case port for fetching a thing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThingQuery: Send + Sync {
    /// Resolve the thing selected by `mode`.
    async fn get_thing(&self, mode: ThingMode) -> Result<QueryOutcome<Thing>, Fault>;
}
