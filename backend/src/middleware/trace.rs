//! Tracing middleware attaching a request scope.
//!
//! Each incoming request receives a UUID trace identifier and a description of
//! the request line (`METHOD path?query`). Both live in task-local storage so
//! problem payloads can report `instance` and `traceId` without threading the
//! request through every translation step.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestScope::run`] when moving work onto other tasks.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static REQUEST_SCOPE: RequestScope;
}

/// Per-request trace identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Returns the current trace identifier if a request scope is active.
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_SCOPE.try_with(|scope| scope.trace_id).ok()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Request-scoped context visible to error translation.
///
/// # Examples
/// ```
/// use problem_service::middleware::trace::{RequestScope, TraceId};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let scope = RequestScope::new(trace_id, "GET /temp/api/things?mode=Known");
/// let observed = scope.run(async { RequestScope::current() }).await;
/// assert_eq!(observed.map(|s| s.instance().to_owned()).as_deref(),
///            Some("GET /temp/api/things?mode=Known"));
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestScope {
    trace_id: TraceId,
    instance: String,
}

impl RequestScope {
    /// Create a scope for the given trace identifier and request line.
    pub fn new(trace_id: TraceId, instance: impl Into<String>) -> Self {
        Self {
            trace_id,
            instance: instance.into(),
        }
    }

    fn from_request(req: &ServiceRequest) -> Self {
        let target = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path(), |pq| pq.as_str());
        Self::new(TraceId::generate(), format!("{} {target}", req.method()))
    }

    /// Returns the active scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_SCOPE.try_with(Clone::clone).ok()
    }

    /// Trace identifier of the request.
    #[must_use]
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Request line in `METHOD path?query` form.
    #[must_use]
    pub fn instance(&self) -> &str {
        self.instance.as_str()
    }

    /// Execute the provided future with this scope active.
    pub async fn run<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_SCOPE.scope(self, fut).await
    }
}

/// Tracing middleware opening a [`RequestScope`] and adding a `Trace-Id`
/// header to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use problem_service::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
///
/// Applications should not use this type directly.
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let scope = RequestScope::from_request(&req);
        let trace_id = scope.trace_id();
        let span = info_span!("request", trace_id = %trace_id, instance = %scope.instance());
        let fut = self.service.call(req);
        Box::pin(
            scope
                .run(async move {
                    let mut res = fut.await?;
                    match HeaderValue::from_str(&trace_id.to_string()) {
                        Ok(value) => {
                            res.response_mut()
                                .headers_mut()
                                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                        }
                        Err(error) => {
                            error!(
                                %error,
                                trace_id = %trace_id,
                                "failed to encode trace identifier header"
                            );
                        }
                    }
                    Ok(res)
                })
                .instrument(span),
        )
    }
}
