//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, web};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

use crate::middleware::Trace;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("connection refused by 10.0.0.5")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace_id(
    internal_error_case: Error,
    expected_trace_id: String,
) {
    let (status, header, payload) = response_payload(&internal_error_case).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::conflict("taken").with_details(json!({"field": "username"}));

    let (status, header, payload) = response_payload(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(header.is_none());
    assert_eq!(payload.message(), "taken");
    assert_eq!(payload.details(), Some(&json!({"field": "username"})));
}

#[given("a forbidden error code")]
fn a_forbidden_error_code() -> ErrorCode {
    ErrorCode::Forbidden
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 403 Forbidden")]
fn the_status_is_403_forbidden(status: StatusCode) {
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
fn forbidden_maps_to_403() {
    let code = a_forbidden_error_code();
    let status = the_adapter_maps_the_code_to_http_status(code);
    the_status_is_403_forbidden(status);
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(err.details(), None);
}

#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let app = actix_web::test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<serde_json::Value>| async { HttpResponse::Ok() }),
            ),
    )
    .await;

    let res = actix_web::test::call_service(
        &app,
        actix_web::test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: serde_json::Value = actix_web::test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}
