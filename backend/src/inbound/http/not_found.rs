//! Default service for unmatched routes.

use actix_web::{HttpRequest, HttpResponse};

use crate::domain::Fault;
use crate::inbound::http::ApiResult;
use crate::inbound::http::problem::{ProblemDetails, ProblemType};

/// Answer any unmatched request with a 404 problem.
///
/// Registered through `App::default_service`, so the request scope set by the
/// trace middleware is still active and the payload carries `instance`.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    let detail = format!("No resource matches '{}'.", req.path());
    ProblemDetails::new(ProblemType::NotFound, "Not Found", detail)
        .into_response()
        .map_err(Fault::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};

    #[actix_web::test]
    async fn unmatched_routes_return_problem() {
        let app =
            actix_test::init_service(App::new().default_service(web::to(not_found))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/nowhere").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let problem: ProblemDetails = actix_test::read_body_json(response).await;
        assert_eq!(problem.problem_type(), "urn:problem-type:not-found");
        assert_eq!(problem.detail(), "No resource matches '/nowhere'.");
    }
}
