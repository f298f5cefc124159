//! Domain ports for the hexagonal boundary.

mod thing_query;

#[cfg(test)]
pub use thing_query::MockThingQuery;
pub use thing_query::{QueryOutcome, ThingQuery};
