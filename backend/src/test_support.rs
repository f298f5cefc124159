//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! with the `test-support` feature.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::app::AppDependencies;
use crate::domain::ThingQueryService;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;

/// Dependencies for an in-process app whose thing query resolves immediately.
///
/// Health is marked ready and the docs are mounted.
pub fn instant_app_dependencies() -> AppDependencies {
    let health = HealthState::new();
    health.mark_ready();
    AppDependencies::new(
        HttpState::new(Arc::new(ThingQueryService::new(Duration::ZERO))),
        web::Data::new(health),
    )
    .with_docs(None)
}
