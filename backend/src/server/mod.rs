//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use problem_service::app::{AppDependencies, build_app};
use problem_service::domain::ThingQueryService;
use problem_service::inbound::http::health::HealthState;
use problem_service::inbound::http::state::HttpState;

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        work_delay,
        docs,
    } = config;

    let http_state = HttpState::new(Arc::new(ThingQueryService::new(work_delay)));
    let mut deps = AppDependencies::new(http_state, health_state.clone());
    if let Some(docs) = docs {
        deps = deps.with_docs(docs.public_url.as_deref());
    }

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, work_delay_ms = work_delay.as_millis(), "server listening");
    health_state.mark_ready();
    Ok(server)
}
