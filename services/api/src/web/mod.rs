pub mod app;
pub mod auth;
pub mod content;
pub mod history;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod voice;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub use middleware::{identify_device, DeviceId};
pub use state::AppState;

/// Builds every API route. All but the liveness probe and the legal documents run
/// behind the device middleware.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let device_routes = Router::new()
        .route("/app/load", post(app::load_handler))
        .route("/app/state", get(app::state_handler))
        .route("/app/home", post(app::home_handler))
        .route("/app/start", post(app::start_handler))
        .route("/app/analyze-another", post(app::analyze_another_handler))
        .route(
            "/app/language",
            post(app::toggle_language_handler).put(app::set_language_handler),
        )
        .route("/app/overlays/{name}/open", post(app::open_overlay_handler))
        .route("/app/overlays/{name}/close", post(app::close_overlay_handler))
        .route("/app/symptoms", put(app::symptoms_handler))
        .route("/app/image", post(app::image_handler))
        .route("/app/analyze", post(app::analyze_handler))
        .route(
            "/app/voice",
            post(voice::voice_handler).delete(voice::cancel_voice_handler),
        )
        .route("/app/auth-mode", post(app::toggle_auth_mode_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/history", get(history::list_history_handler))
        .route("/history/{id}/select", post(history::select_history_handler))
        .route("/content/translations", get(content::translations_handler))
        .layer(axum_middleware::from_fn(identify_device));

    let public_routes = Router::new()
        .route("/health", get(rest::health_handler))
        .route("/content/terms", get(content::terms_handler))
        .route("/content/privacy", get(content::privacy_handler));

    Router::new()
        .merge(public_routes)
        .merge(device_routes)
        .with_state(app_state)
}
