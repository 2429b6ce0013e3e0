//! Problem Details assertions that do not depend on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's error body, kept local so this crate stays
/// independent of the backend.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
    #[serde(default)]
    pub errors: Vec<FieldErrorLike>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct FieldErrorLike {
    pub field: String,
    pub message: String,
}

/// Validate status, content type, trace-id parity and the code/detail pair,
/// then hand the parsed body back for further assertions.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    if expected_status == StatusCode::UNAUTHORIZED {
        let www = headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .expect("401 responses must carry WWW-Authenticate");
        assert_eq!(www, "Bearer");
    }

    let body_str = std::str::from_utf8(body).expect("body should be UTF-8");
    let problem: ProblemDetailsLike = serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("body is not Problem Details: {body_str}"));

    let trace_header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(problem.trace_id, trace_header, "trace_id body/header mismatch");

    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.code, expected_code);
    if let Some(detail) = expected_detail {
        assert_eq!(problem.detail, detail);
    }

    problem
}

/// Same as [`assert_problem_details_from_parts`] for an actix test response.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_detail,
    )
}
