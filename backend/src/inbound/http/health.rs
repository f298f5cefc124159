//! Health endpoints: liveness and readiness probes for orchestration and load
//! balancers.
//!
//! Failing probes answer with a problem payload so every non-2xx response the
//! service produces shares one shape.
use actix_web::{HttpResponse, get, http::header, web};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::error;

use crate::inbound::http::problem::{ProblemDetails, ProblemType};
use crate::inbound::http::schemas::ProblemDetailsSchema;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool, detail: &str) -> HttpResponse {
        if probe_ok {
            return HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish();
        }

        let problem = ProblemDetails::new(
            ProblemType::ServiceUnavailable,
            "Service Unavailable",
            detail,
        )
        .finalize();
        let mut builder = HttpResponse::ServiceUnavailable();
        builder.insert_header((header::CACHE_CONTROL, "no-store"));
        problem.write(builder).unwrap_or_else(|err| {
            error!(error = %err, "failed to write probe problem");
            HttpResponse::ServiceUnavailable()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish()
        })
    }
}

/// Readiness probe. Return 200 once the server has bound its listener; 503
/// otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready", body = ProblemDetailsSchema, content_type = "application/problem+json")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready(), "The service is not ready to handle traffic.")
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once
/// draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down", body = ProblemDetailsSchema, content_type = "application/problem+json")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive(), "The service is shutting down.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    async fn probe(state: HealthState, path: &str) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request())
            .await
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] mark_ready: bool, #[case] expected: StatusCode) {
        let state = HealthState::new();
        if mark_ready {
            state.mark_ready();
        }
        let response = probe(state, "/health/ready").await;
        assert_eq!(response.status(), expected);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
    }

    #[actix_web::test]
    async fn draining_liveness_reports_a_problem() {
        let state = HealthState::new();
        state.mark_unhealthy();
        let response = probe(state, "/health/live").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let problem: ProblemDetails = actix_test::read_body_json(response).await;
        assert_eq!(problem.title(), "Service Unavailable");
        assert_eq!(problem.problem_type(), "urn:problem-type:service-unavailable");
        assert_eq!(problem.detail(), "The service is shutting down.");
    }
}
