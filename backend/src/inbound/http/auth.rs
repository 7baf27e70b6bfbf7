//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"alice","password":"pw1"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{CredentialsValidationError, Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let username = state.login.authenticate(&credentials).await?;
    session.persist_username(&username)?;
    info!(%username, "user logged in");
    Ok(HttpResponse::Ok().finish())
}

/// End the current session. Succeeds with or without one.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::App;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::MockLoginService;
    use crate::domain::{ResultEnvelope, Username};
    use crate::inbound::http::error::json_error_handler;
    use crate::inbound::http::test_utils::{
        ScriptedAccounts, session_cookie, test_session_middleware,
    };

    fn state_with(login_service: MockLoginService) -> HttpState {
        HttpState::new(
            Arc::new(ScriptedAccounts::answering(Ok(ResultEnvelope::ok_message("unused")))),
            Arc::new(login_service),
        )
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(test_session_middleware())
            .service(web::scope("/api/v1").service(login).service(logout))
    }

    fn login_request(username: &str, password: &str) -> actix_web::test::TestRequest {
        actix_web::test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": password }))
    }

    #[actix_web::test]
    async fn successful_login_sets_a_session_cookie() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .withf(|credentials| credentials.username().as_ref() == "alice")
            .times(1)
            .returning(|credentials| Ok(credentials.username().clone()));
        let app = actix_web::test::init_service(test_app(state_with(login_service))).await;

        let res = actix_web::test::call_service(&app, login_request("alice", "pw1").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        assert!(!cookie.value().is_empty());
    }

    #[actix_web::test]
    async fn rejected_credentials_are_unauthorised() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = actix_web::test::init_service(test_app(state_with(login_service))).await;

        let res = actix_web::test::call_service(&app, login_request("alice", "wrong").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_web::test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[case("   ", "pw1", "username must not be empty", "empty_username")]
    #[case("alice", "", "password must not be empty", "empty_password")]
    #[actix_web::test]
    async fn blank_fields_are_invalid_requests(
        #[case] username: &str,
        #[case] password: &str,
        #[case] message: &str,
        #[case] detail_code: &str,
    ) {
        let mut login_service = MockLoginService::new();
        login_service.expect_authenticate().never();
        let app = actix_web::test::init_service(test_app(state_with(login_service))).await;

        let res = actix_web::test::call_service(&app, login_request(username, password).to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_web::test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["message"], message);
        assert_eq!(body["details"]["code"], detail_code);
    }

    #[actix_web::test]
    async fn logout_without_a_session_still_succeeds() {
        let app = actix_web::test::init_service(test_app(state_with(MockLoginService::new()))).await;

        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::post().uri("/api/v1/logout").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    fn request_converts_to_credentials() {
        let credentials = LoginCredentials::try_from(LoginRequest {
            username: " alice ".into(),
            password: "pw1".into(),
        })
        .expect("valid credentials");
        assert_eq!(
            credentials.username(),
            &Username::new("alice").expect("valid username")
        );
    }
}
