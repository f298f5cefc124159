//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without timing or storage.

use std::sync::Arc;

use crate::domain::ports::ThingQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub things: Arc<dyn ThingQuery>,
}

impl HttpState {
    /// Construct state from the thing-query port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use problem_service::domain::ThingQueryService;
    /// use problem_service::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(ThingQueryService::default()));
    /// let _things = state.things.clone();
    /// ```
    pub fn new(things: Arc<dyn ThingQuery>) -> Self {
        Self { things }
    }
}
