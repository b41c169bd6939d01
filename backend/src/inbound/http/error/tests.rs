//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::http::header::CONTENT_TYPE;
use rstest::rstest;

async fn render(error: &UpstreamError) -> (StatusCode, String, String) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = String::from_utf8(bytes.to_vec()).expect("body is UTF-8");
    (status, body, content_type)
}

#[rstest]
#[case::not_found(
    UpstreamError::not_found("Unable to find movie with id 101"),
    StatusCode::NOT_FOUND,
    "Unable to find movie with id 101"
)]
#[case::client(
    UpstreamError::client(400_u16, "movieInfo.year must be a positive value"),
    StatusCode::BAD_REQUEST,
    "movieInfo.year must be a positive value"
)]
#[case::client_conflict(
    UpstreamError::client(409_u16, "conflict"),
    StatusCode::CONFLICT,
    "conflict"
)]
#[case::server(
    UpstreamError::server("Error connecting to MoviesInfoService: server down"),
    StatusCode::INTERNAL_SERVER_ERROR,
    "Error connecting to MoviesInfoService: server down"
)]
#[case::exhausted(
    UpstreamError::retries_exhausted(
        4_u32,
        UpstreamError::server("Server exception in reviews service: reviews server down"),
    ),
    StatusCode::INTERNAL_SERVER_ERROR,
    "Server exception in reviews service: reviews server down"
)]
#[case::transport(
    UpstreamError::transport("connection refused (os error 111)"),
    StatusCode::INTERNAL_SERVER_ERROR,
    GENERIC_ERROR_MESSAGE
)]
#[case::decode(
    UpstreamError::decode("missing field `name`"),
    StatusCode::INTERNAL_SERVER_ERROR,
    GENERIC_ERROR_MESSAGE
)]
#[actix_web::test]
async fn maps_error_kinds_to_status_and_body(
    #[case] error: UpstreamError,
    #[case] expected_status: StatusCode,
    #[case] expected_body: &str,
) {
    let (status, body, content_type) = render(&error).await;
    assert_eq!(status, expected_status);
    assert_eq!(body, expected_body);
    assert!(content_type.starts_with("text/plain"));
}

#[rstest]
#[case::not_a_status(1000_u16)]
#[case::server_range(503_u16)]
#[case::success_range(200_u16)]
fn client_errors_with_unusable_status_become_internal(#[case] status: u16) {
    let error = UpstreamError::client(status, "odd");
    assert_eq!(status_for(&error), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[actix_web::test]
async fn exhaustion_never_leaks_retry_metadata() {
    let error = UpstreamError::retries_exhausted(
        4_u32,
        UpstreamError::server("Error connecting to MoviesInfoService: boom"),
    );
    let (_, body, _) = render(&error).await;
    assert!(!body.contains('4'), "attempt count must not appear: {body}");
}
