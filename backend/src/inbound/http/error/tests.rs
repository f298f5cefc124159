//! Tests for HTTP error mapping.

use super::*;
use crate::middleware::{RequestScope, TraceId};
use crate::inbound::http::problem::APPLICATION_PROBLEM_JSON;
use actix_web::body::to_bytes;
use actix_web::http::header;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn request_scope() -> RequestScope {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixtures provide a valid UUID");
    RequestScope::new(trace_id, "GET /temp/api/things?mode=Unknown")
}

#[fixture]
fn unknown_thing() -> DomainError {
    DomainError::intrinsic("Thing Unknown", "The specified thing is unknown.")
        .with_additional_data("thingMode", "Unknown")
        .with_additional_data("number", 12345)
}

async fn read_problem(response: HttpResponse) -> ProblemDetails {
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some(APPLICATION_PROBLEM_JSON)
    );
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("problem JSON deserialisation succeeds")
}

#[rstest]
#[case(DomainErrorType::Unexpected, 500, "urn:problem-type:internal-server-error")]
#[case(DomainErrorType::NotFound, 404, "urn:problem-type:not-found")]
#[case(DomainErrorType::Extrinsic, 409, "urn:problem-type:conflict")]
#[case(DomainErrorType::Intrinsic, 422, "urn:problem-type:unprocessable-entity")]
fn domain_error_types_map_to_status_and_type(
    #[case] kind: DomainErrorType,
    #[case] status: u16,
    #[case] type_uri: &str,
) {
    let problem = ProblemDetails::from(&DomainError::new(kind, "Title", "Description"));

    assert_eq!(problem.status(), status);
    assert_eq!(problem.problem_type(), type_uri);
    assert_eq!(problem.title(), "Title");
    assert_eq!(problem.detail(), "Description");
}

#[rstest]
fn additional_data_becomes_extensions(unknown_thing: DomainError) {
    let problem = ProblemDetails::from(&unknown_thing);
    let keys: Vec<&str> = problem.extensions().keys().map(String::as_str).collect();

    assert_eq!(keys, ["thingMode", "number"]);
    assert_eq!(problem.extensions().get("number"), Some(&json!(12345)));
}

#[rstest]
fn absent_and_empty_additional_data_render_identically() {
    let absent = DomainError::not_found("Thing Missing", "No such thing.");
    let empty = absent
        .clone()
        .with_additional_data_map(crate::domain::AdditionalData::new());

    assert_ne!(absent, empty);
    assert_eq!(ProblemDetails::from(&absent), ProblemDetails::from(&empty));
    assert!(ProblemDetails::from(&absent).extensions().is_empty());
}

#[rstest]
#[tokio::test]
async fn domain_error_response_includes_instance_and_trace_id(
    request_scope: RequestScope,
    unknown_thing: DomainError,
) {
    let response = request_scope
        .run(async move { domain_error_response(&unknown_thing) })
        .await
        .expect("problem writes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let problem = read_problem(response).await;
    assert_eq!(problem.instance(), Some("GET /temp/api/things?mode=Unknown"));
    assert_eq!(problem.extensions().get("traceId"), Some(&json!(TRACE_ID)));
    assert_eq!(problem.extensions().get("thingMode"), Some(&json!("Unknown")));
}

#[rstest]
#[tokio::test]
async fn additional_data_cannot_shadow_standard_members(request_scope: RequestScope) {
    let spoofing = DomainError::intrinsic("Thing Unknown", "desc")
        .with_additional_data("status", 200)
        .with_additional_data("title", "spoofed")
        .with_additional_data("traceId", "forged")
        .with_additional_data("number", 12345);
    let response = request_scope
        .run(async move { domain_error_response(&spoofing) })
        .await
        .expect("problem writes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let raw: serde_json::Value = serde_json::from_slice(&bytes).expect("body is JSON");
    assert_eq!(raw["status"], 422);
    assert_eq!(raw["title"], "Thing Unknown");
    assert_eq!(raw["traceId"], TRACE_ID);
    assert_eq!(raw["number"], 12345);

    let problem: ProblemDetails =
        serde_json::from_slice(&bytes).expect("no duplicate members in the body");
    assert_eq!(problem.status(), 422);
    assert_eq!(problem.title(), "Thing Unknown");
}

#[rstest]
#[case(Fault::bad_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Fault::invalid_enum_argument("mode", 9, "ThingMode"), StatusCode::BAD_REQUEST)]
#[case(Fault::storage_update("Database timeout occurred."), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Fault::storage_update("Database constraint violated."), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Fault::divide_by_zero(), StatusCode::INTERNAL_SERVER_ERROR)]
fn fault_status_code_matches_interception(#[case] fault: Fault, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&fault), status);
}

#[rstest]
#[actix_web::test]
async fn fault_response_body_status_matches_response_status() {
    let response = ResponseError::error_response(&Fault::divide_by_zero());
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let problem = read_problem(response).await;
    assert_eq!(problem.status(), 500);
    assert_eq!(problem.title(), "Unexpected Error");
    assert_eq!(
        problem.detail(),
        "An exception of type 'DivideByZero' was thrown while handling the request."
    );
    assert!(problem.instance().is_none(), "no request scope in this test");
}

#[rstest]
#[actix_web::test]
async fn storage_timeout_response_carries_retry_after() {
    let response =
        ResponseError::error_response(&Fault::storage_update("Database timeout occurred."));
    assert_eq!(
        response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok()),
        Some("120")
    );

    let problem = read_problem(response).await;
    assert_eq!(problem.title(), "Database Timeout");
    assert!(problem.extensions().is_empty());
}

#[test]
fn problem_write_errors_become_unclassified_faults() {
    let serde_err = serde_json::from_str::<ProblemDetails>("{").expect_err("truncated JSON");
    let fault = Fault::from(ProblemWriteError::from(serde_err));
    assert_eq!(fault.type_name(), "ProblemWriteError");
}

#[given("a conflicting domain error")]
fn a_conflicting_domain_error() -> DomainError {
    DomainError::extrinsic("Thing Taken", "The thing already exists.")
}

#[when("the adapter translates the error")]
fn the_adapter_translates_the_error(error: DomainError) -> ProblemDetails {
    ProblemDetails::from(&error)
}

#[then("the problem reports 409 Conflict")]
fn the_problem_reports_conflict(problem: ProblemDetails) {
    assert_eq!(problem.status_code(), StatusCode::CONFLICT);
    assert_eq!(problem.problem_type(), "urn:problem-type:conflict");
    assert_eq!(problem.title(), "Thing Taken");
}

#[rstest]
fn translating_a_conflict() {
    let error = a_conflicting_domain_error();
    let problem = the_adapter_translates_the_error(error);
    the_problem_reports_conflict(problem);
}
