//! services/api/src/adapters/sst.rs
//!
//! This module contains the adapter for OpenAI's Speech-to-Text (Whisper) service.
//! It implements the `SpeechToTextService` port from the `core` crate and backs
//! the voice input button of the symptoms field.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{AudioInput, CreateTranscriptionRequestArgs},
    Client,
};
use async_trait::async_trait;
use hound::{WavSpec, WavWriter};
use tongue_balance_core::domain::Language;
use tongue_balance_core::ports::{AudioFormat, PortError, PortResult, SpeechToTextService};
use tracing::{debug, error};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SpeechToTextService` port using the OpenAI Whisper API.
#[derive(Clone)]
pub struct OpenAiSstAdapter {
    /// `None` when no API key is configured; voice input is then unsupported.
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSstAdapter {
    /// Creates a new `OpenAiSstAdapter`.
    pub fn new(client: Option<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    pub fn from_api_key(api_key: Option<&str>, model: String) -> Self {
        let client = api_key.map(|key| Client::with_config(OpenAIConfig::new().with_api_key(key)));
        Self::new(client, model)
    }

    fn pcm16_to_wav(pcm_data: &[u8], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
        let mut cursor = std::io::Cursor::new(Vec::new());

        let spec = WavSpec {
            channels: 1, // Mono
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = WavWriter::new(&mut cursor, spec)?;

        // Convert byte array to i16 samples
        for chunk in pcm_data.chunks_exact(2) {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            writer.write_sample(sample)?;
        }

        writer.finalize()?;
        Ok(cursor.into_inner())
    }

    /// The bytes to upload plus a file name whose extension tells the provider the format.
    fn prepare_upload(audio_data: &[u8], format: &AudioFormat) -> PortResult<(String, Vec<u8>)> {
        let extension = format.file_extension().ok_or_else(|| {
            PortError::Unsupported(format!("Unsupported audio format: {:?}", format))
        })?;
        let bytes = match format {
            AudioFormat::Encoded { .. } => audio_data.to_vec(),
            AudioFormat::Pcm16 { sample_rate } => Self::pcm16_to_wav(audio_data, *sample_rate)
                .map_err(|e| PortError::Unexpected(format!("Failed to encode WAV: {}", e)))?,
        };
        Ok((format!("voice_input.{}", extension), bytes))
    }
}

//=========================================================================================
// `SpeechToTextService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SpeechToTextService for OpenAiSstAdapter {
    /// Transcribes a voice clip into text using the configured Whisper model.
    async fn transcribe_audio(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
        language: Language,
    ) -> PortResult<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            PortError::Unsupported("Speech recognition is not configured".to_string())
        })?;

        if audio_data.is_empty() {
            return Ok(String::new());
        }

        let (file_name, bytes) = Self::prepare_upload(audio_data, &format)?;
        debug!("Transcribing {} ({} bytes, {})", file_name, bytes.len(), language.speech_locale());

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(file_name, bytes))
            .model(self.model.clone())
            .language(language.tag())
            .build()
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error, which respects the orphan rule.
        let response = client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e: OpenAIError| {
                error!("Transcription request failed: {}", e);
                PortError::Remote(e.to_string())
            })?;

        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcm_is_wrapped_in_a_wav_header() {
        let samples: Vec<u8> = [0i16, 1000, -1000, i16::MAX]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        let (name, wav) =
            OpenAiSstAdapter::prepare_upload(&samples, &AudioFormat::Pcm16 { sample_rate: 16_000 })
                .unwrap();

        assert_eq!(name, "voice_input.wav");
        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().sample_rate, 16_000);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn encoded_audio_keeps_its_own_extension() {
        let mp3 = AudioFormat::encoded("audio/mpeg").unwrap();
        let (name, bytes) = OpenAiSstAdapter::prepare_upload(b"ID3\x03mp3data", &mp3).unwrap();
        assert_eq!(name, "voice_input.mp3");
        assert_eq!(bytes, b"ID3\x03mp3data".to_vec());

        let wav = AudioFormat::encoded("audio/wav").unwrap();
        let (name, _) = OpenAiSstAdapter::prepare_upload(b"RIFF", &wav).unwrap();
        assert_eq!(name, "voice_input.wav");

        let webm = AudioFormat::encoded("audio/webm;codecs=opus").unwrap();
        let (name, _) = OpenAiSstAdapter::prepare_upload(b"webm", &webm).unwrap();
        assert_eq!(name, "voice_input.webm");
    }

    #[test]
    fn unknown_encoded_type_is_not_uploaded() {
        let format = AudioFormat::Encoded {
            mime_type: "audio/x-unknown".to_string(),
        };
        assert!(matches!(
            OpenAiSstAdapter::prepare_upload(b"clip", &format),
            Err(PortError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn no_key_means_unsupported() {
        let adapter = OpenAiSstAdapter::from_api_key(None, "whisper-1".to_string());

        let result = adapter
            .transcribe_audio(
                b"clip",
                AudioFormat::encoded("audio/webm").unwrap(),
                Language::En,
            )
            .await;

        assert!(matches!(result, Err(PortError::Unsupported(_))));
    }
}
