//! services/api/src/adapters/analysis_llm.rs
//!
//! This module contains the adapter for the tongue analysis model.
//! It implements the `TongueAnalysisService` port from the `core` crate by calling a
//! multimodal model through its OpenAI-compatible chat endpoint.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrlArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;
use tongue_balance_core::domain::{AnalysisFindings, ImagePayload, Language};
use tongue_balance_core::ports::{PortError, PortResult, TongueAnalysisService};
use tracing::{error, info};

const SYSTEM_INSTRUCTION_TEMPLATE: &str = r#"You are a highly experienced Traditional Chinese Medicine (TCM) practitioner and expert, following the philosophy of "Shang Yi Zhi Wei Bing" (The superior doctor prevents disease).
Your task is to analyze an image of a human tongue and provide a wellness assessment.

Input: An image of a tongue and a text description of symptoms.

Analysis Steps:
1. Observe the Tongue Body: Color (Pale, Red, Purple, etc.), Shape (Swollen, Thin, Teeth marks, Cracks), Moisture.
2. Observe the Tongue Coating: Color (White, Yellow, Grey), Thickness (Thin, Thick, Peeled), Texture (Greasy, Dry).
3. Diagnose the TCM Pattern: e.g., Damp-Heat, Qi Deficiency, Yin Deficiency, Blood Stasis, Liver Qi Stagnation.
4. Correlate with Symptoms provided by the user.
5. Formulate Recommendations: Dietary therapy (Food to eat/avoid), Lifestyle adjustments, and suitable Exercises (e.g., Ba Duan Jin, Tai Chi).

Output: Return a strictly formatted JSON object.
IMPORTANT: All text values in the JSON output (explanation, recommendations, pattern name, etc.) MUST be in {language}.
DO NOT use markdown code blocks in the response, just the raw JSON."#;

const USER_INPUT_TEMPLATE: &str = r#"The user reports the following symptoms: "{symptoms}". Analyze the tongue image and symptoms according to TCM principles. Please provide the response in {language}."#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TongueAnalysisService` using an OpenAI-compatible
/// multimodal model.
#[derive(Clone)]
pub struct GeminiAnalysisAdapter {
    /// `None` when no API key is configured; every request then fails.
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl GeminiAnalysisAdapter {
    /// Creates a new `GeminiAnalysisAdapter`.
    pub fn new(client: Option<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the client from an optional key and the provider's base URL.
    pub fn from_credentials(api_key: Option<&str>, base_url: &str, model: String) -> Self {
        let client = api_key.map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(key)
                    .with_api_base(base_url),
            )
        });
        Self::new(client, model)
    }

    fn system_instruction(language: Language) -> String {
        SYSTEM_INSTRUCTION_TEMPLATE.replace("{language}", language.prompt_name())
    }

    fn user_prompt(symptoms: &str, language: Language) -> String {
        USER_INPUT_TEMPLATE
            .replace("{symptoms}", symptoms)
            .replace("{language}", language.prompt_name())
    }

    /// The JSON schema the model's reply must follow.
    fn response_schema() -> Value {
        let string = json!({ "type": "string" });
        let string_list = json!({ "type": "array", "items": { "type": "string" } });
        json!({
            "type": "object",
            "properties": {
                "tongue_body": {
                    "type": "object",
                    "properties": { "color": string, "shape": string, "moisture": string }
                },
                "coating": {
                    "type": "object",
                    "properties": { "color": string, "thickness": string, "texture": string }
                },
                "pattern": {
                    "type": "string",
                    "description": "The primary TCM diagnosis pattern"
                },
                "explanation": {
                    "type": "string",
                    "description": "A gentle, clear explanation of what the tongue signs mean regarding the user's health."
                },
                "recommendations": {
                    "type": "object",
                    "properties": {
                        "diet": {
                            "type": "object",
                            "properties": { "eat": string_list, "avoid": string_list }
                        },
                        "lifestyle": string_list,
                        "exercise": {
                            "type": "string",
                            "description": "Specific Qigong or exercise recommendation"
                        }
                    }
                },
                "suggested_course": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Name of a specific premium course (e.g., '8-Week Ba Duan Jin Mastery', 'Yin Nourishing Kitchen', 'Morning Jin Gang Gong')"
                        },
                        "description": {
                            "type": "string",
                            "description": "Why this course fits the diagnosis"
                        },
                        "difficulty": {
                            "type": "string",
                            "enum": ["Beginner", "Intermediate", "Advanced"]
                        }
                    }
                }
            }
        })
    }

    /// Removes a markdown code fence the model sometimes wraps its JSON in.
    fn strip_code_fence(text: &str) -> &str {
        static FENCE: OnceLock<Regex> = OnceLock::new();
        let fence = FENCE.get_or_init(|| {
            Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("fence pattern is valid")
        });
        let trimmed = text.trim();
        match fence.captures(trimmed).and_then(|caps| caps.get(1)) {
            Some(body) => body.as_str(),
            None => trimmed,
        }
    }

    /// Parses the reply text into findings.
    fn parse_findings(text: &str) -> PortResult<AnalysisFindings> {
        let body = Self::strip_code_fence(text);
        if body.is_empty() {
            return Err(PortError::EmptyResponse);
        }
        serde_json::from_str(body)
            .map_err(|e| PortError::Remote(format!("Malformed analysis JSON: {}", e)))
    }

    fn build_messages(
        image: &ImagePayload,
        symptoms: &str,
        language: Language,
    ) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        let system: ChatCompletionRequestMessage = ChatCompletionRequestSystemMessageArgs::default()
            .content(Self::system_instruction(language))
            .build()?
            .into();

        let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(
                ImageUrlArgs::default()
                    .url(image.to_data_url())
                    .detail(ImageDetail::High)
                    .build()?,
            )
            .build()?;
        let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(Self::user_prompt(symptoms, language))
            .build()?;

        let user: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(vec![
                ChatCompletionRequestUserMessageContentPart::ImageUrl(image_part),
                ChatCompletionRequestUserMessageContentPart::Text(text_part),
            ]))
            .build()?
            .into();

        Ok(vec![system, user])
    }
}

//=========================================================================================
// `TongueAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TongueAnalysisService for GeminiAnalysisAdapter {
    async fn analyze_tongue(
        &self,
        image: &ImagePayload,
        symptoms: &str,
        language: Language,
    ) -> PortResult<AnalysisFindings> {
        let client = self.client.as_ref().ok_or(PortError::MissingCredential)?;

        let messages = Self::build_messages(image, symptoms, language)
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: Some("A TCM wellness assessment of a tongue image".to_string()),
                    name: "tongue_analysis".to_string(),
                    schema: Some(Self::response_schema()),
                    strict: None,
                },
            })
            .build()
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        info!(
            "Requesting tongue analysis from {} ({} bytes, {})",
            self.model,
            image.data.len(),
            language
        );

        let response = client.chat().create(request).await.map_err(|e| {
            error!("Analysis request failed: {}", e);
            PortError::Remote(e.to_string())
        })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(PortError::EmptyResponse)?;

        Self::parse_findings(&text)
    }
}
