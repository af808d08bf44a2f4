//! services/api/src/web/content.rs
//!
//! Static content: the string tables and the legal documents.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tongue_balance_core::domain::Language;
use tongue_balance_core::i18n::translations;
use tongue_balance_core::legal::{self, LegalDocument, HEALTH_DISCLAIMER};
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::web::middleware::DeviceId;
use crate::web::state::AppState;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TranslationsQuery {
    /// `en`, `zh` or `fr`. Defaults to the device's current language.
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct LegalResponse {
    pub document: &'static LegalDocument,
    pub disclaimer: &'static str,
}

#[utoipa::path(
    get,
    path = "/content/translations",
    params(TranslationsQuery),
    responses(
        (status = 200, description = "Every display string for the language"),
        (status = 404, description = "Unknown language")
    )
)]
pub async fn translations_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    Query(query): Query<TranslationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = match query.lang {
        Some(tag) => Language::from_str(&tag)?,
        None => match state.registered(device).await {
            Some(controller) => {
                let language = controller.lock().await.state().language;
                language
            }
            None => Language::default(),
        },
    };
    Ok(Json(translations(language)))
}

#[utoipa::path(
    get,
    path = "/content/terms",
    responses((status = 200, description = "Terms of Service"))
)]
pub async fn terms_handler() -> impl IntoResponse {
    Json(LegalResponse {
        document: legal::terms_of_service(),
        disclaimer: HEALTH_DISCLAIMER,
    })
}

#[utoipa::path(
    get,
    path = "/content/privacy",
    responses((status = 200, description = "Privacy Policy"))
)]
pub async fn privacy_handler() -> impl IntoResponse {
    Json(LegalResponse {
        document: legal::privacy_policy(),
        disclaimer: HEALTH_DISCLAIMER,
    })
}
