//! Authentication handlers.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::auth::{validate_registration, RegisterInput};
use crate::web::dto::{ApiResponse, LoginRequest, SessionResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/auth/register - Register a new user.
///
/// Validates the four-field registration record; on any violation the
/// response carries field-scoped messages and nothing is submitted.
/// Accepted submissions are logged (name and email only) before the
/// account is created and a session cookie is set.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(input): Json<RegisterInput>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    validate_registration(&input).map_err(ApiError::from_validation_errors)?;

    info!(name = %input.name, email = %input.email, "registration submitted");

    let session = state
        .auth
        .sign_up(&input.name, &input.email, &input.password)
        .await?;

    let jar = jar.add(state.auth.session_cookie(&session));
    Ok((jar, Json(ApiResponse::new(SessionResponse::from(&session)))))
}

/// POST /api/auth/login - Sign in with email+password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let session = state.auth.sign_in(&req.email, &req.password).await?;

    let jar = jar.add(state.auth.session_cookie(&session));
    Ok((jar, Json(ApiResponse::new(SessionResponse::from(&session)))))
}

/// POST /api/auth/logout - Sign out the current session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    if let Some(token) = state.auth.session_token(&headers) {
        // Unknown tokens are fine; sign-out is idempotent
        let _ = state.auth.sign_out(&token).await;
    }

    let jar = jar.remove(state.auth.clear_session_cookie());
    Ok((jar, Json(ApiResponse::new(()))))
}

/// GET /api/auth/session - Resolve the current session.
///
/// Returns `data: null` when the request carries no valid session.
pub async fn session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ApiResponse<Option<SessionResponse>>> {
    let session = state.auth.session_from_headers(&headers).await;
    Json(ApiResponse::new(
        session.as_ref().map(SessionResponse::from),
    ))
}
