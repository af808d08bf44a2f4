//! services/api/src/web/auth.rs
//!
//! Account endpoints for signup, login, and logout. Accounts live in the
//! device's local storage, so the device cookie is the only session there is.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::app::snapshot;
use crate::web::middleware::DeviceId;
use crate::web::state::AppState;

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create an account and sign in
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created and signed in"),
        (status = 400, description = "Missing username or password"),
        (status = 404, description = "Accounts are disabled"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.signup(&req.username, &req.password).await?;
    Ok(snapshot(&guard))
}

/// POST /auth/login - Sign in to an existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in"),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password"),
        (status = 404, description = "Accounts are disabled")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.login(&req.username, &req.password).await?;
    Ok(snapshot(&guard))
}

/// POST /auth/logout - Sign out and clear the session's view state
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Signed out"))
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.logout().await?;
    Ok(snapshot(&guard))
}
