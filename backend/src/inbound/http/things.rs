//! Things API handler.
//!
//! ```text
//! GET /temp/api/things?mode=Known
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Fault, Thing, ThingMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::domain_error_response;
use crate::inbound::http::schemas::{ProblemDetailsSchema, ThingModeSchema};
use crate::inbound::http::state::HttpState;

/// Raw query string of `GET /things`.
///
/// `mode` is kept as text so a missing or unparsable value is reported as a
/// fault rather than a generic extractor rejection.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThingQueryParams {
    /// Requested simulated outcome.
    pub mode: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GetThingResponse {
    /// Message describing the thing.
    #[schema(example = "Thing is known!")]
    pub message: String,
}

impl From<Thing> for GetThingResponse {
    fn from(value: Thing) -> Self {
        Self {
            message: value.message().to_owned(),
        }
    }
}

/// Decode the `mode` parameter.
///
/// Names are matched case-insensitively; numeric discriminants are accepted
/// but must be in range.
fn parse_mode(raw: Option<&str>) -> Result<ThingMode, Fault> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Err(Fault::bad_request(
            "Required parameter \"ThingMode mode\" was not provided from query string.",
        ));
    };
    if let Ok(discriminant) = raw.parse::<i64>() {
        return ThingMode::try_from(discriminant);
    }
    ThingMode::from_name(raw).ok_or_else(|| {
        Fault::bad_request(format!(
            "Failed to bind parameter \"ThingMode mode\" from \"{raw}\"."
        ))
    })
}

/// Get thing.
///
/// Dispatches the query through the thing-query port. Business failures come
/// back as problem payloads with the mapped status; faults propagate to the
/// interceptor chain.
#[utoipa::path(
    get,
    path = "/temp/api/things",
    params(
        ("mode" = ThingModeSchema, Query, description = "Simulated outcome to produce")
    ),
    responses(
        (status = 200, description = "Thing found", body = GetThingResponse),
        (status = 400, description = "Missing or invalid mode", body = ProblemDetailsSchema, content_type = "application/problem+json"),
        (status = 422, description = "Thing unknown", body = ProblemDetailsSchema, content_type = "application/problem+json"),
        (status = 500, description = "Unexpected error", body = ProblemDetailsSchema, content_type = "application/problem+json"),
        (
            status = 503,
            description = "Database timeout",
            body = ProblemDetailsSchema,
            content_type = "application/problem+json",
            headers(("Retry-After" = u32, description = "Seconds to wait before retrying"))
        )
    ),
    tags = ["things"],
    operation_id = "getThing"
)]
#[get("/things")]
pub async fn get_thing(
    state: web::Data<HttpState>,
    query: web::Query<ThingQueryParams>,
) -> ApiResult<HttpResponse> {
    let mode = parse_mode(query.into_inner().mode.as_deref())?;
    match state.things.get_thing(mode).await? {
        Ok(thing) => Ok(HttpResponse::Ok().json(GetThingResponse::from(thing))),
        Err(domain_error) => Ok(domain_error_response(&domain_error)?),
    }
}
