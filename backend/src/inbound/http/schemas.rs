//! OpenAPI schema definitions for domain and adapter types.
//!
//! Domain types stay free of `ToSchema`. The wrappers here mirror their
//! serialised shape and are registered under the domain names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ThingMode`].
///
/// Simulated outcome requested from `GET /things`. Names are matched
/// case-insensitively; numeric discriminants `0..=4` are also accepted.
#[derive(ToSchema)]
#[schema(as = ThingMode, example = "Known")]
pub enum ThingModeSchema {
    /// Success.
    Known,
    /// Business failure rendered as 422.
    Unknown,
    /// Storage fault mentioning a timeout, rendered as 503.
    ThrowDbTimeout,
    /// Storage fault without a timeout, rendered as 500.
    ThrowDbUpdate,
    /// Arithmetic fault, rendered as 500.
    ThrowDivideByZero,
}

/// OpenAPI schema for [`crate::inbound::http::problem::ProblemDetails`].
///
/// Extension members (the error's additional data and `traceId`) are
/// flattened beside the standard fields.
#[derive(ToSchema)]
#[schema(as = ProblemDetails)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProblemDetailsSchema {
    /// Stable URI naming the problem category.
    #[schema(rename = "type", example = "urn:problem-type:unprocessable-entity")]
    problem_type: String,
    /// Short summary of the problem.
    #[schema(example = "Thing Unknown")]
    title: String,
    /// HTTP status code, equal to the response status.
    #[schema(example = 422)]
    status: u16,
    /// Human-readable explanation.
    #[schema(example = "The specified thing is unknown.")]
    detail: String,
    /// Method, path and query of the originating request.
    #[schema(example = "GET /temp/api/things?mode=Unknown")]
    instance: Option<String>,
    /// Correlation identifier echoed in the `Trace-Id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn thing_mode_schema_lists_every_mode() {
        assert_eq!(ThingModeSchema::name(), "ThingMode");
        let schema_json = schema_to_json::<ThingModeSchema>();
        for mode in crate::domain::ThingMode::ALL {
            assert!(
                schema_json.contains(mode.as_str()),
                "schema should contain {mode}"
            );
        }
    }

    #[test]
    fn problem_details_schema_uses_wire_names() {
        assert_eq!(ProblemDetailsSchema::name(), "ProblemDetails");
        let schema_json = schema_to_json::<ProblemDetailsSchema>();
        assert!(schema_json.contains("\"type\""), "type field renamed");
        assert!(schema_json.contains("traceId"), "traceId field renamed");
        assert!(!schema_json.contains("problem_type"));
    }
}
