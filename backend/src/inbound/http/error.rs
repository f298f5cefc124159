//! HTTP adapter mapping for domain errors and faults.
//!
//! Purpose: keep the domain error types HTTP-agnostic while turning both
//! returned [`DomainError`]s and propagated [`Fault`]s into consistent
//! problem responses.

use actix_web::error::QueryPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{error, warn};

use crate::domain::{DomainError, DomainErrorType, Fault};
use crate::inbound::http::interceptors::{ClaimedBy, InterceptorChain};
use crate::inbound::http::problem::{ProblemDetails, ProblemType, ProblemWriteError};
use crate::middleware::TraceId;

/// Convenient result alias for HTTP handlers.
///
/// Domain errors are translated inside handlers; only faults travel through
/// the error channel.
pub type ApiResult<T> = Result<T, Fault>;

fn problem_type_for(kind: DomainErrorType) -> ProblemType {
    match kind {
        DomainErrorType::Unexpected => ProblemType::InternalServerError,
        DomainErrorType::NotFound => ProblemType::NotFound,
        DomainErrorType::Extrinsic => ProblemType::Conflict,
        DomainErrorType::Intrinsic => ProblemType::UnprocessableEntity,
    }
}

impl From<&DomainError> for ProblemDetails {
    fn from(error: &DomainError) -> Self {
        let problem = Self::new(
            problem_type_for(error.kind()),
            error.title(),
            error.description(),
        );
        match error.additional_data() {
            Some(data) => problem.with_extensions(data.clone()),
            None => problem,
        }
    }
}

/// Render a domain error as a problem response.
///
/// # Errors
/// Propagates [`ProblemWriteError`] when the payload cannot be serialised.
pub fn domain_error_response(error: &DomainError) -> Result<HttpResponse, ProblemWriteError> {
    ProblemDetails::from(error).into_response()
}

impl From<ProblemWriteError> for Fault {
    fn from(err: ProblemWriteError) -> Self {
        Fault::unclassified("ProblemWriteError", err.to_string())
    }
}

impl ResponseError for Fault {
    fn status_code(&self) -> StatusCode {
        InterceptorChain::STANDARD.resolve(self).status()
    }

    fn error_response(&self) -> HttpResponse {
        let interception = InterceptorChain::STANDARD.resolve(self);
        let trace_id = TraceId::current().map(|id| id.to_string());
        let status = interception.status();
        match interception.claimed_by() {
            ClaimedBy::Interceptor(interceptor) if status.is_client_error() => warn!(
                ?interceptor,
                fault = %self,
                trace_id = ?trace_id,
                "client fault intercepted"
            ),
            claimed_by => error!(
                ?claimed_by,
                fault_type = self.type_name(),
                fault = %self,
                trace_id = ?trace_id,
                "fault intercepted"
            ),
        }

        match interception.write() {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, trace_id = ?trace_id, "failed to write problem response");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

/// Route query extraction failures into [`Fault::BadHttpRequest`].
fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Fault::bad_request(err.to_string()).into()
}

/// Query extractor configuration used by every API handler.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

#[cfg(test)]
mod tests;
