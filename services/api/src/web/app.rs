//! services/api/src/web/app.rs
//!
//! Handlers for the main screens: navigation, overlays, language, the analysis
//! form and the analysis itself. Every handler answers with the device's
//! `ViewSnapshot` after the action.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use tongue_balance_core::controller::{AnalysisRequest, AppController, Overlay};
use tongue_balance_core::domain::{ImagePayload, Language};
use tongue_balance_core::report::ViewSnapshot;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::middleware::DeviceId;
use crate::web::state::{AppState, SharedController};

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SymptomsRequest {
    pub symptoms: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LanguageRequest {
    /// `en`, `zh` or `fr`.
    pub language: String,
}

//=========================================================================================
// Shared Helpers
//=========================================================================================

pub(crate) fn snapshot(controller: &AppController) -> Json<ViewSnapshot> {
    Json(ViewSnapshot::render(controller.state(), controller.flags()))
}

/// One part of a multipart body.
pub(crate) struct FormPart {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Reads every part of a multipart body into memory.
pub(crate) async fn read_parts(multipart: &mut Multipart) -> Result<Vec<FormPart>, ApiError> {
    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file bytes: {}", e)))?;
        parts.push(FormPart {
            name,
            content_type,
            data,
        });
    }
    Ok(parts)
}

//=========================================================================================
// Page Load and Navigation
//=========================================================================================

/// Page load. Starts the device over from what local storage holds.
#[utoipa::path(
    post,
    path = "/app/load",
    responses((status = 200, description = "Fresh view with the stored session restored"))
)]
pub async fn load_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.reload(device).await?;
    let guard = controller.lock().await;
    Ok(snapshot(&guard))
}

#[utoipa::path(
    get,
    path = "/app/state",
    responses((status = 200, description = "Current view"))
)]
pub async fn state_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.view_controller(device).await?;
    let guard = controller.lock().await;
    Ok(snapshot(&guard))
}

#[utoipa::path(post, path = "/app/home", responses((status = 200, description = "Home screen")))]
pub async fn home_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.go_home();
    Ok(snapshot(&guard))
}

#[utoipa::path(post, path = "/app/start", responses((status = 200, description = "Analysis form")))]
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.start_diagnosis();
    Ok(snapshot(&guard))
}

#[utoipa::path(
    post,
    path = "/app/analyze-another",
    responses((status = 200, description = "Empty analysis form"))
)]
pub async fn analyze_another_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.analyze_another();
    Ok(snapshot(&guard))
}

//=========================================================================================
// Language
//=========================================================================================

/// Cycles English, Chinese, French.
#[utoipa::path(
    post,
    path = "/app/language",
    responses((status = 200, description = "View in the next language"))
)]
pub async fn toggle_language_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.toggle_language();
    Ok(snapshot(&guard))
}

#[utoipa::path(
    put,
    path = "/app/language",
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "View in the chosen language"),
        (status = 404, description = "Unknown language")
    )
)]
pub async fn set_language_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Json(req): Json<LanguageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let language = Language::from_str(&req.language)?;
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.set_language(language);
    Ok(snapshot(&guard))
}

//=========================================================================================
// Overlays
//=========================================================================================

#[utoipa::path(
    post,
    path = "/app/overlays/{name}/open",
    params(("name" = String, Path, description = "history, auth, terms or privacy")),
    responses(
        (status = 200, description = "Overlay shown"),
        (status = 401, description = "History needs a signed-in user"),
        (status = 404, description = "Unknown overlay or feature disabled")
    )
)]
pub async fn open_overlay_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let overlay = Overlay::from_str(&name)?;
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.open_overlay(overlay)?;
    Ok(snapshot(&guard))
}

#[utoipa::path(
    post,
    path = "/app/overlays/{name}/close",
    params(("name" = String, Path, description = "history, auth, terms or privacy")),
    responses(
        (status = 200, description = "Overlay hidden"),
        (status = 404, description = "Unknown overlay")
    )
)]
pub async fn close_overlay_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let overlay = Overlay::from_str(&name)?;
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.close_overlay(overlay);
    Ok(snapshot(&guard))
}

/// Flips the auth form between signing in and creating an account.
#[utoipa::path(
    post,
    path = "/app/auth-mode",
    responses(
        (status = 200, description = "Auth form in the other mode"),
        (status = 404, description = "Sign-in is disabled")
    )
)]
pub async fn toggle_auth_mode_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.toggle_auth_mode()?;
    Ok(snapshot(&guard))
}

//=========================================================================================
// Analysis Form
//=========================================================================================

#[utoipa::path(
    put,
    path = "/app/symptoms",
    request_body = SymptomsRequest,
    responses((status = 200, description = "Symptoms updated"))
)]
pub async fn symptoms_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Json(req): Json<SymptomsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.set_symptoms(req.symptoms);
    Ok(snapshot(&guard))
}

/// Selects the tongue photo. Expects a multipart part named `image`.
#[utoipa::path(
    post,
    path = "/app/image",
    request_body(content_type = "multipart/form-data", description = "The tongue photo, in a part named `image`."),
    responses(
        (status = 200, description = "Image selected"),
        (status = 400, description = "Missing, empty or non-image upload")
    )
)]
pub async fn image_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let part = read_parts(&mut multipart)
        .await?
        .into_iter()
        .find(|part| part.name == "image")
        .ok_or_else(|| ApiError::BadRequest("Multipart form must include an image".to_string()))?;

    let mime_type = part
        .content_type
        .filter(|mime| mime.starts_with("image/"))
        .ok_or_else(|| ApiError::BadRequest("Uploaded file is not an image".to_string()))?;
    if part.data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded image is empty".to_string()));
    }

    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.select_image(ImagePayload::new(mime_type, part.data.to_vec()));
    Ok(snapshot(&guard))
}

/// Sends the selected image and symptoms to the model.
///
/// The device lock is released while the model works, so the device can keep
/// navigating. A page load in the meantime abandons the request.
#[utoipa::path(
    post,
    path = "/app/analyze",
    responses(
        (status = 200, description = "Analysis result shown and saved"),
        (status = 400, description = "No image selected"),
        (status = 409, description = "An analysis is already running"),
        (status = 502, description = "The model failed; the view carries the error message")
    )
)]
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<Response, ApiError> {
    let controller = state.controller_for(device).await?;
    let request = controller.lock().await.begin_analysis()?;

    // Runs to completion even if the client goes away, so `loading` is always cleared.
    tokio::spawn(complete_analysis(state, device, controller, request))
        .await
        .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))?
}

async fn complete_analysis(
    state: Arc<AppState>,
    device: Uuid,
    controller: SharedController,
    request: AnalysisRequest,
) -> Result<Response, ApiError> {
    let outcome = state
        .analysis_adapter
        .analyze_tongue(&request.image, &request.symptoms, request.language)
        .await;

    if !state.is_current(device, &controller).await {
        warn!("Device {} reloaded during analysis; discarding the result", device);
        let current = state.controller_for(device).await?;
        let guard = current.lock().await;
        return Ok(snapshot(&guard).into_response());
    }

    let failed = outcome.is_err();
    let mut guard = controller.lock().await;
    let result = guard.finish_analysis(request, outcome).await;
    match result {
        Ok(()) => {
            info!("Analysis finished for device {}", device);
            Ok(snapshot(&guard).into_response())
        }
        Err(_) if failed => Ok((StatusCode::BAD_GATEWAY, snapshot(&guard)).into_response()),
        Err(e) => Err(e.into()),
    }
}
