//! services/api/src/web/rest.rs
//!
//! Contains the liveness endpoint and the master definition for the OpenAPI
//! specification.

use axum::response::{IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::error::ErrorBody;
use crate::web::{app, auth, content, history, voice};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        app::load_handler,
        app::state_handler,
        app::home_handler,
        app::start_handler,
        app::analyze_another_handler,
        app::toggle_language_handler,
        app::set_language_handler,
        app::open_overlay_handler,
        app::close_overlay_handler,
        app::toggle_auth_mode_handler,
        app::symptoms_handler,
        app::image_handler,
        app::analyze_handler,
        voice::voice_handler,
        voice::cancel_voice_handler,
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        history::list_history_handler,
        history::select_history_handler,
        content::translations_handler,
        content::terms_handler,
        content::privacy_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            app::SymptomsRequest,
            app::LanguageRequest,
            auth::CredentialsRequest,
        )
    ),
    tags(
        (name = "TongueBalance API", description = "Tongue photo wellness analysis with accounts and history.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Health
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "The service is up", body = HealthResponse))
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
