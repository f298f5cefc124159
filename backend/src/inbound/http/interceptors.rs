//! Fault interceptor chain.
//!
//! Faults that escape request logic are resolved here into a status, optional
//! headers, and a [`ProblemDetails`] payload. Interceptors are evaluated in
//! registration order and the first one claiming the fault wins. The fallback
//! is not an entry in the list but the `None` arm of the lookup, so every
//! fault is claimed by exactly one handler.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::domain::Fault;
use crate::inbound::http::problem::{ProblemDetails, ProblemType, ProblemWriteError};

/// Seconds clients are asked to wait after a storage timeout.
pub const RETRY_AFTER_SECONDS: u32 = 120;

/// Extension key carrying the raw fault message for client faults.
pub const EXCEPTION_MESSAGE_EXTENSION: &str = "exceptionMessage";

/// Specific fault matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interceptor {
    /// Enum-valued input outside its declared range.
    InvalidEnumArgument,
    /// Transport-level request syntax failures.
    MalformedRequest,
    /// Storage update failures that mention a timeout.
    StorageTimeout,
}

/// Which handler claimed a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimedBy {
    /// One of the specific interceptors.
    Interceptor(Interceptor),
    /// The mandatory fallback.
    Fallback,
}

/// Resolved response for a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct Interception {
    claimed_by: ClaimedBy,
    retry_after: Option<u32>,
    problem: ProblemDetails,
}

fn exception_detail(type_name: &str) -> String {
    format!("An exception of type '{type_name}' was thrown while handling the request.")
}

fn mentions_timeout(message: &str) -> bool {
    message.to_ascii_lowercase().contains("timeout")
}

impl Interceptor {
    /// Claim `fault` if it belongs to this interceptor's category.
    pub fn intercept(self, fault: &Fault) -> Option<Interception> {
        let problem = match (self, fault) {
            (Self::InvalidEnumArgument, Fault::InvalidEnumArgument { .. }) => ProblemDetails::new(
                ProblemType::BadRequest,
                "Invalid Enum Argument",
                exception_detail(fault.type_name()),
            )
            .with_extension(EXCEPTION_MESSAGE_EXTENSION, fault.to_string()),
            (Self::MalformedRequest, Fault::BadHttpRequest { message }) => ProblemDetails::new(
                ProblemType::BadRequest,
                "Bad HTTP Request",
                exception_detail(fault.type_name()),
            )
            .with_extension(EXCEPTION_MESSAGE_EXTENSION, message.as_str()),
            (Self::StorageTimeout, Fault::StorageUpdate { message })
                if mentions_timeout(message) =>
            {
                return Some(Interception {
                    claimed_by: ClaimedBy::Interceptor(self),
                    retry_after: Some(RETRY_AFTER_SECONDS),
                    problem: ProblemDetails::new(
                        ProblemType::ServiceUnavailable,
                        "Database Timeout",
                        "The database connection or command timeout expired while handling the request.",
                    ),
                });
            }
            _ => return None,
        };

        Some(Interception {
            claimed_by: ClaimedBy::Interceptor(self),
            retry_after: None,
            problem,
        })
    }
}

/// Claim any fault with a generic 500.
pub fn fallback(fault: &Fault) -> Interception {
    Interception {
        claimed_by: ClaimedBy::Fallback,
        retry_after: None,
        problem: ProblemDetails::new(
            ProblemType::InternalServerError,
            "Unexpected Error",
            exception_detail(fault.type_name()),
        ),
    }
}

impl Interception {
    /// Handler that produced this interception.
    pub fn claimed_by(&self) -> ClaimedBy {
        self.claimed_by
    }

    /// Status written to the response.
    pub fn status(&self) -> StatusCode {
        self.problem.status_code()
    }

    /// `Retry-After` hint in seconds, if any.
    pub fn retry_after(&self) -> Option<u32> {
        self.retry_after
    }

    /// Payload written to the response body.
    pub fn problem(&self) -> &ProblemDetails {
        &self.problem
    }

    /// Write status, headers and body.
    ///
    /// The payload is finalised with the active request scope first.
    ///
    /// # Errors
    /// Propagates [`ProblemWriteError`] when the payload cannot be serialised.
    pub fn write(self) -> Result<HttpResponse, ProblemWriteError> {
        let mut builder = HttpResponseBuilder::new(self.status());
        if let Some(seconds) = self.retry_after {
            builder.insert_header((header::RETRY_AFTER, HeaderValue::from(seconds)));
        }
        self.problem.finalize().write(builder)
    }
}

/// Ordered interceptors plus the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptorChain {
    interceptors: &'static [Interceptor],
}

/// Registration order used by the service.
const STANDARD_ORDER: &[Interceptor] = &[
    Interceptor::InvalidEnumArgument,
    Interceptor::MalformedRequest,
    Interceptor::StorageTimeout,
];

impl InterceptorChain {
    /// The chain registered by the service.
    pub const STANDARD: Self = Self::new(STANDARD_ORDER);

    /// Build a chain evaluating `interceptors` in order before the fallback.
    #[must_use]
    pub const fn new(interceptors: &'static [Interceptor]) -> Self {
        Self { interceptors }
    }

    /// Specific interceptors in evaluation order.
    #[must_use]
    pub const fn interceptors(&self) -> &'static [Interceptor] {
        self.interceptors
    }

    /// Resolve `fault` with the first claiming interceptor, or the fallback.
    ///
    /// # Examples
    /// ```
    /// use problem_service::domain::Fault;
    /// use problem_service::inbound::http::interceptors::{ClaimedBy, InterceptorChain};
    ///
    /// let interception = InterceptorChain::STANDARD.resolve(&Fault::divide_by_zero());
    /// assert_eq!(interception.claimed_by(), ClaimedBy::Fallback);
    /// assert_eq!(interception.status().as_u16(), 500);
    /// ```
    pub fn resolve(&self, fault: &Fault) -> Interception {
        self.interceptors
            .iter()
            .find_map(|interceptor| interceptor.intercept(fault))
            .unwrap_or_else(|| fallback(fault))
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::STANDARD
    }
}
