//! services/api/src/web/history.rs
//!
//! The signed-in user's past analyses.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use tongue_balance_core::ports::PortError;
use tongue_balance_core::report::HistoryView;

use crate::error::ApiError;
use crate::web::app::snapshot;
use crate::web::middleware::DeviceId;
use crate::web::state::AppState;

/// Lists the history, newest first, with dates in the device's language.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "History entries"),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "History is disabled")
    )
)]
pub async fn list_history_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.view_controller(device).await?;
    let guard = controller.lock().await;

    if !guard.flags().is_enabled("auth.userHistory") {
        return Err(PortError::FeatureDisabled("auth.userHistory".to_string()).into());
    }
    let view = guard.state();
    if view.user.is_none() {
        return Err(PortError::Unauthorized.into());
    }

    Ok(Json(HistoryView::build(
        &view.history,
        view.language,
        guard.translations(),
    )))
}

/// Opens a past analysis on the result screen.
#[utoipa::path(
    post,
    path = "/history/{id}/select",
    params(("id" = String, Path, description = "The analysis id")),
    responses(
        (status = 200, description = "Analysis shown"),
        (status = 404, description = "No such analysis, or history is disabled")
    )
)]
pub async fn select_history_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    guard.select_history_item(&id)?;
    Ok(snapshot(&guard))
}
