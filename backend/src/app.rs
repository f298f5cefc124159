//! Application assembly shared by the server binary and integration tests.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::doc::api_document;
use crate::inbound::http::error::query_config;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::not_found::not_found;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{API_BASE_PATH, configure};

/// Route serving the rewritten OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/openapi/v1.json";

/// Everything one app instance needs; cloned into each worker.
#[derive(Clone)]
pub struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    docs: Option<utoipa::openapi::OpenApi>,
}

impl AppDependencies {
    /// Bundle handler state; docs are off until [`Self::with_docs`].
    ///
    /// `health_state` is shared so the caller can flip readiness once the
    /// listener is bound.
    pub fn new(http_state: HttpState, health_state: web::Data<HealthState>) -> Self {
        Self {
            health_state,
            http_state: web::Data::new(http_state),
            docs: None,
        }
    }

    /// Serve the OpenAPI document and Swagger UI, anchored at `public_url`.
    #[must_use]
    pub fn with_docs(mut self, public_url: Option<&str>) -> Self {
        self.docs = Some(api_document(public_url));
        self
    }
}

/// Build the application: tracing, API scope, probes, docs and the 404
/// fallback.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        docs,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(query_config())
        .wrap(Trace)
        .service(web::scope(API_BASE_PATH).configure(configure))
        .service(ready)
        .service(live);

    let app = match docs {
        Some(document) => {
            app.service(SwaggerUi::new("/docs/{_:.*}").url(OPENAPI_JSON_PATH, document))
        }
        None => app,
    };

    app.default_service(web::to(not_found))
}
