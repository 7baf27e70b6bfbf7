//! User account handlers.
//!
//! ```text
//! GET    /api/v1/user
//! GET    /api/v1/user/{id}
//! POST   /api/v1/user        {"username":"alice","password":"pw1"}
//! PUT    /api/v1/user        {"id":"...","username":"alice","password":"pw2"}
//! DELETE /api/v1/user/{id}
//! ```
//!
//! Only account creation is public. Every handler answers with the
//! rendered [`ResultEnvelope`](crate::domain::ResultEnvelope) of the
//! corresponding account operation.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{NewUserRequest, UpdateUserRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{MessageBody, respond_to};
use crate::inbound::http::schemas::{ErrorSchema, UserViewSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/v1/user`. Missing fields read as blank.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddUserBody {
    #[serde(default)]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<AddUserBody> for NewUserRequest {
    fn from(value: AddUserBody) -> Self {
        Self {
            username: value.username,
            password: value.password,
        }
    }
}

/// Body for `PUT /api/v1/user`. Missing fields read as blank.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateUserBody {
    #[serde(default)]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(value: UpdateUserBody) -> Self {
        Self {
            id: value.id,
            username: value.username,
            password: value.password,
        }
    }
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "Accounts", body = [UserViewSchema]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let result = state.accounts.list_all().await;
    Ok(respond_to(result, state.status_policy))
}

/// Fetch the caller's own account.
#[utoipa::path(
    get,
    path = "/api/v1/user/{id}",
    params(("id" = String, Path, description = "24 character hexadecimal account id")),
    responses(
        (status = 200, description = "Account", body = UserViewSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the caller's account", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 500, description = "Malformed id or internal error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let result = state.accounts.get_by_id(&path.into_inner(), &caller).await;
    Ok(respond_to(result, state.status_policy))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = AddUserBody,
    responses(
        (status = 200, description = "Account created", body = MessageBody),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 500, description = "Blank field or internal error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addUser",
    security([])
)]
#[post("/user")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<AddUserBody>,
) -> HttpResponse {
    let result = state.accounts.add_user(payload.into_inner().into()).await;
    respond_to(result, state.status_policy)
}

/// Replace the caller's username and password. Ends the session on success.
#[utoipa::path(
    put,
    path = "/api/v1/user",
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Account updated", body = UserViewSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the caller's account", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 500, description = "Invalid input or internal error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let result = state
        .accounts
        .update_by_id(payload.into_inner().into(), &caller, &session)
        .await;
    Ok(respond_to(result, state.status_policy))
}

/// Delete the caller's account. Ends the session on success.
#[utoipa::path(
    delete,
    path = "/api/v1/user/{id}",
    params(("id" = String, Path, description = "24 character hexadecimal account id")),
    responses(
        (status = 200, description = "Account deleted", body = MessageBody),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the caller's account", body = ErrorSchema),
        (status = 404, description = "Caller unknown", body = ErrorSchema),
        (status = 500, description = "Invalid id or internal error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let result = state
        .accounts
        .delete_by_id(&path.into_inner(), &caller, &session)
        .await;
    Ok(respond_to(result, state.status_policy))
}

/// Register every account handler on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(add_user)
        .service(update_user)
        .service(delete_user);
}
