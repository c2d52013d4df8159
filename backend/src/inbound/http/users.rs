//! Session endpoints: login, logout, and the current session.
//!
//! ```text
//! POST /api/v1/login {"email":"julie@example.test","password":"password"}
//! POST /api/v1/logout
//! GET /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::authenticate;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"julie@example.test","password":"password"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Current session payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Authenticated email, when a session exists.
    pub email: Option<String>,
    /// Whether the session carries the admin capability.
    pub is_admin: bool,
}

/// Authenticate and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent error
/// schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie")), body = SessionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let email = request.email.trim();
    if email.is_empty() {
        return Err(Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })));
    }
    if request.password.is_empty() {
        return Err(Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })));
    }

    let canonical = authenticate(&state.admin, email, &request.password)?;
    session.persist_email(&canonical)?;
    Ok(HttpResponse::Ok().json(SessionResponse {
        is_admin: state.admin.is_admin(&canonical),
        email: Some(canonical),
    }))
}

/// Clear the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout",
    security(("SessionCookie" = []))
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Describe the current session.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getSession",
    security(("SessionCookie" = []))
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let email = session.email()?;
    let is_admin = email
        .as_deref()
        .is_some_and(|email| state.admin.is_admin(email));
    Ok(HttpResponse::Ok().json(SessionResponse { email, is_admin }))
}
