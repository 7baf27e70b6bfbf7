//! End-to-end HTTP tests for the account endpoints over in-memory adapters.

use std::sync::Arc;

use accounts::Trace;
use accounts::domain::{PasswordLoginService, UserAccessService};
use accounts::inbound::http::auth::{login, logout};
use accounts::inbound::http::envelope::StatusPolicy;
use accounts::inbound::http::error::json_error_handler;
use accounts::inbound::http::state::HttpState;
use accounts::inbound::http::users;
use accounts::outbound::memory::{InMemoryUserCache, InMemoryUserRepository};
use accounts::outbound::password::BcryptPasswordHasher;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(BcryptPasswordHasher::new(4));
    let accounts = UserAccessService::new(
        Arc::clone(&users),
        Arc::new(InMemoryUserCache::new()),
        Arc::clone(&hasher),
    );
    HttpState::new(
        Arc::new(accounts),
        Arc::new(PasswordLoginService::new(users, hasher)),
    )
}

fn app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(login)
                .service(logout)
                .configure(users::configure),
        )
}

fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn parts(res: ServiceResponse) -> (StatusCode, Option<Cookie<'static>>, Value) {
    let status = res.status();
    let cookie = session_cookie(&res);
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, cookie, body)
}

macro_rules! send {
    ($app:expr, $request:expr $(,)?) => {
        parts(test::call_service($app, $request.to_request()).await)
    };
}

fn register(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/user")
        .set_json(json!({ "username": username, "password": password }))
}

fn sign_in(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password }))
}

fn added_id(body: &Value) -> String {
    body["message"]
        .as_str()
        .and_then(|message| message.strip_prefix("User has been added with id "))
        .expect("confirmation message")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn owner_lifecycle_over_http(state: HttpState) {
    let app = test::init_service(app(state)).await;

    let (status, _, _) = send!(&app, register("bob", "pw0")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = send!(&app, register("alice", "pw1")).await;
    assert_eq!(status, StatusCode::OK);
    let id = added_id(&body);

    let (status, cookie, _) = send!(&app, sign_in("alice", "pw1")).await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie.expect("session cookie");

    let (status, _, body) = send!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/user/{id}"))
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "username": "alice" }));

    let (status, _, body) = send!(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user/507f1f77bcf86cd799439099")
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "Permission denied ! with user ID : 507f1f77bcf86cd799439099"
    );

    let (status, _, body) = send!(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/user")
            .cookie(cookie.clone())
            .set_json(json!({ "id": id, "username": "bob", "password": "pw2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (status, removal, body) = send!(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/user/{id}"))
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("User details have been deleted with user-id {id}")
    );
    assert!(removal.expect("removal cookie").value().is_empty());

    let (status, _, _) = send!(&app, sign_in("alice", "pw1")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn update_requires_a_fresh_login(state: HttpState) {
    let app = test::init_service(app(state)).await;
    let (_, _, body) = send!(&app, register("alice", "pw1")).await;
    let id = added_id(&body);
    let (_, cookie, _) = send!(&app, sign_in("alice", "pw1")).await;
    let cookie = cookie.expect("session cookie");

    let (status, _, body) = send!(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/user")
            .cookie(cookie)
            .set_json(json!({ "id": id, "username": "alicia", "password": "pw2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "username": "alicia" }));

    let (status, _, _) = send!(&app, sign_in("alice", "pw1")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = send!(&app, sign_in("alicia", "pw2")).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn list_requires_login_and_hides_hashes(state: HttpState) {
    let app = test::init_service(app(state)).await;
    send!(&app, register("alice", "pw1")).await;

    let (status, _, body) = send!(&app, test::TestRequest::get().uri("/api/v1/user")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (_, cookie, _) = send!(&app, sign_in("alice", "pw1")).await;
    let (status, _, body) = send!(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user")
            .cookie(cookie.expect("session cookie")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].get("passwordHash").is_none());
}

#[rstest]
#[case(StatusPolicy::Legacy, StatusCode::INTERNAL_SERVER_ERROR)]
#[case(StatusPolicy::Strict, StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn malformed_ids_follow_the_status_policy(
    state: HttpState,
    #[case] policy: StatusPolicy,
    #[case] expected: StatusCode,
) {
    let app = test::init_service(app(state.with_status_policy(policy))).await;
    send!(&app, register("alice", "pw1")).await;
    let (_, cookie, _) = send!(&app, sign_in("alice", "pw1")).await;

    let (status, _, body) = send!(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user/not-hex")
            .cookie(cookie.expect("session cookie")),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(body["message"], "Invalid ObjectId string provided: not-hex");
}
