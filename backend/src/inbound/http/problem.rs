//! Problem payloads (`application/problem+json`).
//!
//! [`ProblemDetails`] is the single wire shape for every failure the service
//! reports, whether it started life as a domain error or as an intercepted
//! fault. [`ProblemType`] is the fixed table tying each category to its status
//! code and stable type URI.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::middleware::RequestScope;

/// Media type of problem responses.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Prefix shared by every problem type URI.
pub const PROBLEM_TYPE_PREFIX: &str = "urn:problem-type:";

/// Extension key carrying the request trace identifier.
pub const TRACE_ID_EXTENSION: &str = "traceId";

/// Member names owned by the payload itself; extensions may not use them.
pub const RESERVED_MEMBERS: [&str; 6] = [
    "type",
    "title",
    "status",
    "detail",
    "instance",
    TRACE_ID_EXTENSION,
];

fn is_reserved(key: &str) -> bool {
    RESERVED_MEMBERS.contains(&key)
}

/// Stable problem categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemType {
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 422
    UnprocessableEntity,
    /// 500
    InternalServerError,
    /// 503
    ServiceUnavailable,
}

impl ProblemType {
    /// HTTP status paired with the category.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable suffix of the type URI.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BadRequest => "bad-request",
            Self::NotFound => "not-found",
            Self::Conflict => "conflict",
            Self::UnprocessableEntity => "unprocessable-entity",
            Self::InternalServerError => "internal-server-error",
            Self::ServiceUnavailable => "service-unavailable",
        }
    }

    /// Full type URI.
    ///
    /// # Examples
    /// ```
    /// use problem_service::inbound::http::problem::ProblemType;
    ///
    /// assert_eq!(ProblemType::NotFound.uri(), "urn:problem-type:not-found");
    /// ```
    #[must_use]
    pub fn uri(self) -> String {
        format!("{PROBLEM_TYPE_PREFIX}{}", self.slug())
    }
}

/// Failure to render a problem response.
#[derive(Debug, Error)]
pub enum ProblemWriteError {
    /// The payload could not be serialised.
    #[error("failed to serialise problem payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Problem payload returned to clients.
///
/// Extensions are flattened into the top-level JSON object.
///
/// # Examples
/// ```
/// use problem_service::inbound::http::problem::{ProblemDetails, ProblemType};
///
/// let problem = ProblemDetails::new(ProblemType::NotFound, "Not Found", "missing")
///     .with_extension("resource", "thing");
/// let json = serde_json::to_value(&problem).expect("serialises");
/// assert_eq!(json["type"], "urn:problem-type:not-found");
/// assert_eq!(json["status"], 404);
/// assert_eq!(json["resource"], "thing");
/// assert!(json.get("instance").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    problem_type: String,
    title: String,
    status: u16,
    detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance: Option<String>,
    #[serde(flatten)]
    extensions: Map<String, Value>,
}

impl ProblemDetails {
    /// Create a payload for `kind` with no instance and no extensions.
    pub fn new(kind: ProblemType, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            problem_type: kind.uri(),
            title: title.into(),
            status: kind.status().as_u16(),
            detail: detail.into(),
            instance: None,
            extensions: Map::new(),
        }
    }

    /// Type URI.
    pub fn problem_type(&self) -> &str {
        self.problem_type.as_str()
    }

    /// Short summary.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Numeric status as serialised.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Status as an HTTP status code, falling back to 500 if out of range.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Human-readable explanation.
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    /// Originating request line, if recorded.
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    /// Free-form diagnostic values.
    pub fn extensions(&self) -> &Map<String, Value> {
        &self.extensions
    }

    /// Record the originating request line.
    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Add one extension value.
    ///
    /// Keys listed in [`RESERVED_MEMBERS`] are dropped so an extension can
    /// never shadow a standard member.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_extension(key.into(), value.into());
        self
    }

    /// Merge a map of extension values, keeping their order.
    ///
    /// Reserved keys are dropped as in [`Self::with_extension`].
    #[must_use]
    pub fn with_extensions(mut self, extensions: Map<String, Value>) -> Self {
        for (key, value) in extensions {
            self.insert_extension(key, value);
        }
        self
    }

    fn insert_extension(&mut self, key: String, value: Value) {
        if is_reserved(&key) {
            warn!(extension = %key, "dropping extension that shadows a reserved member");
            return;
        }
        self.extensions.insert(key, value);
    }

    /// Attach the active request's instance and trace identifier.
    ///
    /// An instance already recorded is kept; the trace identifier always
    /// comes from the scope. Outside a request scope the payload is returned
    /// unchanged.
    #[must_use]
    pub fn finalize(mut self) -> Self {
        let Some(scope) = RequestScope::current() else {
            return self;
        };
        if self.instance.is_none() {
            self.instance = Some(scope.instance().to_owned());
        }
        self.extensions.insert(
            TRACE_ID_EXTENSION.to_owned(),
            Value::String(scope.trace_id().to_string()),
        );
        self
    }

    /// Finish `builder` with this payload as the body.
    ///
    /// The builder's status is overwritten so it always matches `status`.
    ///
    /// # Errors
    /// Returns [`ProblemWriteError`] if the payload cannot be serialised.
    pub fn write(&self, mut builder: HttpResponseBuilder) -> Result<HttpResponse, ProblemWriteError> {
        let body = serde_json::to_vec(self)?;
        Ok(builder
            .status(self.status_code())
            .content_type(APPLICATION_PROBLEM_JSON)
            .body(body))
    }

    /// Render a standalone response for this payload.
    ///
    /// # Errors
    /// Returns [`ProblemWriteError`] if the payload cannot be serialised.
    pub fn into_response(self) -> Result<HttpResponse, ProblemWriteError> {
        let problem = self.finalize();
        problem.write(HttpResponse::build(problem.status_code()))
    }
}
