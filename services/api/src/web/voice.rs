//! services/api/src/web/voice.rs
//!
//! Voice input for the symptoms field.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Extension,
};
use bytes::Bytes;
use std::sync::Arc;
use tongue_balance_core::domain::Language;
use tongue_balance_core::ports::AudioFormat;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::app::{read_parts, snapshot};
use crate::web::middleware::DeviceId;
use crate::web::state::{AppState, SharedController};

/// Transcribes a voice clip and appends the text to the symptoms.
///
/// Expects a multipart part named `audio`. Raw 16-bit PCM is accepted when a
/// `sample_rate` part is sent along. Otherwise the part's content type names the
/// encoding (webm, ogg, mp3, m4a, mp4, wav or flac).
#[utoipa::path(
    post,
    path = "/app/voice",
    request_body(content_type = "multipart/form-data", description = "The voice clip, in a part named `audio`, plus an optional `sample_rate` for raw PCM."),
    responses(
        (status = 200, description = "Transcript appended to the symptoms"),
        (status = 400, description = "Missing audio, unsupported audio type or bad sample rate"),
        (status = 409, description = "Already listening"),
        (status = 501, description = "Voice input is not available")
    )
)]
pub async fn voice_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let parts = read_parts(&mut multipart).await?;

    let sample_rate = match parts.iter().find(|part| part.name == "sample_rate") {
        Some(part) => Some(
            std::str::from_utf8(&part.data)
                .ok()
                .and_then(|text| text.trim().parse::<u32>().ok())
                .filter(|rate| *rate > 0)
                .ok_or_else(|| ApiError::BadRequest("Invalid sample_rate".to_string()))?,
        ),
        None => None,
    };
    let audio = parts
        .into_iter()
        .find(|part| part.name == "audio")
        .ok_or_else(|| ApiError::BadRequest("Multipart form must include audio".to_string()))?;

    let format = match sample_rate {
        Some(sample_rate) => AudioFormat::Pcm16 { sample_rate },
        None => audio
            .content_type
            .as_deref()
            .and_then(AudioFormat::encoded)
            .ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "Unsupported audio type: {}",
                    audio.content_type.as_deref().unwrap_or("none")
                ))
            })?,
    };

    let controller = state.controller_for(device).await?;
    let language = controller.lock().await.begin_listening()?;

    // Runs to completion even if the client goes away, so `listening` is always cleared.
    tokio::spawn(complete_listening(
        state, device, controller, audio.data, format, language,
    ))
    .await
    .map_err(|e| ApiError::Internal(format!("Transcription task failed: {}", e)))?
}

async fn complete_listening(
    state: Arc<AppState>,
    device: Uuid,
    controller: SharedController,
    audio: Bytes,
    format: AudioFormat,
    language: Language,
) -> Result<Response, ApiError> {
    let outcome = state
        .sst_adapter
        .transcribe_audio(&audio, format, language)
        .await;

    if !state.is_current(device, &controller).await {
        warn!("Device {} reloaded while listening; dropping the transcript", device);
        let current = state.controller_for(device).await?;
        let guard = current.lock().await;
        return Ok(snapshot(&guard).into_response());
    }

    let mut guard = controller.lock().await;
    guard.finish_listening(outcome)?;
    Ok(snapshot(&guard).into_response())
}

/// Stops listening. A transcription still in flight is discarded when it returns.
#[utoipa::path(
    delete,
    path = "/app/voice",
    responses((status = 200, description = "Microphone off"))
)]
pub async fn cancel_voice_handler(
    State(state): State<Arc<AppState>>,
    Extension(DeviceId(device)): Extension<DeviceId>,
) -> Result<impl IntoResponse, ApiError> {
    let controller = state.controller_for(device).await?;
    let mut guard = controller.lock().await;
    if guard.state().listening {
        info!("Device {} cancelled voice input", device);
    }
    guard.cancel_listening();
    Ok(snapshot(&guard))
}
