//! crates/tongue_balance_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! The serialized field names match the records kept in local storage, so a
//! history written by one version of the app can be read back by the next.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ports::PortError;

//=========================================================================================
// Language
//=========================================================================================

/// The languages the interface and the generated reports are available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Fr,
}

impl Language {
    /// The short tag used in URLs and storage (`en`, `zh`, `fr`).
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Fr => "fr",
        }
    }

    /// The language name spelled out for the model instructions.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Simplified Chinese (zh-CN)",
            Language::Fr => "French",
        }
    }

    /// Locale used for speech recognition.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Zh => "zh-CN",
            Language::Fr => "fr-FR",
        }
    }

    /// Label shown on the language toggle.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Zh => "中文",
            Language::Fr => "FR",
        }
    }

    /// The toggle cycles en -> zh -> fr -> en.
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::Fr,
            Language::Fr => Language::En,
        }
    }

    /// Formats an epoch-millisecond timestamp as a short local date.
    pub fn format_date(self, timestamp_ms: i64) -> String {
        let Some(date) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
            return String::new();
        };
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self {
            Language::En => format!("{m}/{d}/{y}"),
            Language::Zh => format!("{y}/{m}/{d}"),
            Language::Fr => format!("{d:02}/{m:02}/{y}"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            "fr" => Ok(Language::Fr),
            other => Err(PortError::NotFound(format!("Unknown language '{}'", other))),
        }
    }
}

//=========================================================================================
// Images
//=========================================================================================

/// An uploaded image, kept as raw bytes plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// The image encoded as a `data:` URL, which is also what gets stored in history.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

//=========================================================================================
// Analysis Records
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TongueBody {
    pub color: String,
    pub shape: String,
    pub moisture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coating {
    pub color: String,
    pub thickness: String,
    pub texture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diet {
    pub eat: Vec<String>,
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<Diet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
}

/// Difficulty tier of a suggested course. Unrecognized values read as `Beginner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Beginner,
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestedCourse {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
}

/// The part of an analysis produced by the model.
///
/// Every section is optional: the model is asked for all of them but a reply
/// that leaves some out must still be displayable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tongue_body: Option<TongueBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coating: Option<Coating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_course: Option<SuggestedCourse>,
}

/// A complete analysis: the model's findings plus what the user submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TongueAnalysis {
    pub id: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(flatten)]
    pub findings: AnalysisFindings,
}

//=========================================================================================
// Accounts
//=========================================================================================

/// A user as seen by the rest of the application. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Newest first.
    #[serde(default)]
    pub history: Vec<TongueAnalysis>,
}

/// An account as it sits in the account map. Only used inside the account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub history: Vec<TongueAnalysis>,
}

impl StoredAccount {
    pub fn sanitized(&self) -> User {
        User {
            username: self.username.clone(),
            history: self.history.clone(),
        }
    }
}
