//! crates/tongue_balance_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the storage backend and of the hosted AI provider.

use async_trait::async_trait;

use crate::domain::{AnalysisFindings, ImagePayload, Language};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error type shared by all port operations and the controller.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Username already exists")]
    DuplicateAccount,
    #[error("Invalid username or password")]
    InvalidCredential,
    #[error("API Key not found")]
    MissingCredential,
    #[error("Remote service error: {0}")]
    Remote(String),
    #[error("No response from AI")]
    EmptyResponse,
    #[error("{0}")]
    Unsupported(String),
    #[error("Please select an image first")]
    NoImage,
    #[error("A request is already in progress")]
    Busy,
    #[error("Feature '{0}' is disabled")]
    FeatureDisabled(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// True for the failures of the analysis round trip, which the user only
    /// ever sees as the generic "analysis failed" message.
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            PortError::MissingCredential | PortError::Remote(_) | PortError::EmptyResponse
        )
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string key-value store with the semantics of browser local storage.
///
/// `scope` separates devices: each device sees only its own keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, scope: &str, key: &str) -> PortResult<Option<String>>;

    async fn set_item(&self, scope: &str, key: &str, value: &str) -> PortResult<()>;

    async fn remove_item(&self, scope: &str, key: &str) -> PortResult<()>;
}

/// Turns a password into the form kept in the account map and checks it later.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> PortResult<String>;

    fn verify(&self, password: &str, stored: &str) -> bool;
}

#[async_trait]
pub trait TongueAnalysisService: Send + Sync {
    /// Sends one tongue image plus the reported symptoms to the model and returns
    /// its findings, written in `language`.
    async fn analyze_tongue(
        &self,
        image: &ImagePayload,
        symptoms: &str,
        language: Language,
    ) -> PortResult<AnalysisFindings>;
}

/// How a voice clip is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    /// A complete file that the provider can read as is. `mime_type` is
    /// lowercase and has no parameters.
    Encoded { mime_type: String },
    /// Raw little-endian 16-bit mono PCM.
    Pcm16 { sample_rate: u32 },
}

impl AudioFormat {
    /// An encoded clip of the given MIME type, or `None` when the type is not
    /// one speech recognition can decode. Parameters such as `;codecs=opus`
    /// are ignored.
    pub fn encoded(mime_type: &str) -> Option<Self> {
        let mime_type = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let format = AudioFormat::Encoded { mime_type };
        format.file_extension().map(|_| format)
    }

    /// The file extension the clip is uploaded under.
    pub fn file_extension(&self) -> Option<&'static str> {
        match self {
            AudioFormat::Pcm16 { .. } => Some("wav"),
            AudioFormat::Encoded { mime_type } => match mime_type.as_str() {
                "audio/webm" | "video/webm" => Some("webm"),
                "audio/ogg" | "application/ogg" => Some("ogg"),
                "audio/mpeg" | "audio/mp3" | "audio/mpga" => Some("mp3"),
                "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some("m4a"),
                "video/mp4" => Some("mp4"),
                "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Some("wav"),
                "audio/flac" | "audio/x-flac" => Some("flac"),
                _ => None,
            },
        }
    }
}

#[async_trait]
pub trait SpeechToTextService: Send + Sync {
    /// Transcribes a short voice clip spoken in `language`.
    async fn transcribe_audio(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
        language: Language,
    ) -> PortResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_audio_is_named_after_its_mime_type() {
        let webm = AudioFormat::encoded("audio/webm;codecs=opus").unwrap();
        assert_eq!(
            webm,
            AudioFormat::Encoded {
                mime_type: "audio/webm".to_string()
            }
        );
        assert_eq!(webm.file_extension(), Some("webm"));
        assert_eq!(
            AudioFormat::encoded("Audio/MPEG").unwrap().file_extension(),
            Some("mp3")
        );
        assert_eq!(
            AudioFormat::encoded("audio/x-wav").unwrap().file_extension(),
            Some("wav")
        );
        assert_eq!(
            AudioFormat::encoded("audio/x-m4a").unwrap().file_extension(),
            Some("m4a")
        );
    }

    #[test]
    fn unknown_audio_types_are_refused() {
        assert_eq!(AudioFormat::encoded("application/octet-stream"), None);
        assert_eq!(AudioFormat::encoded("text/plain"), None);
        assert_eq!(AudioFormat::encoded(""), None);
    }
}
