use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Scores strictly above this value are classified as `Dog`.
pub const DECISION_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Label {
    Cat,
    Dog,
}

impl Label {
    pub fn emoji(&self) -> &'static str {
        match self {
            Label::Cat => "🐱",
            Label::Dog => "🐶",
        }
    }
}

/// Outcome of one forward pass.
///
/// `confidence` is always the probability assigned to `label`, never the raw
/// model score, so it stays within `[0.5, 1.0]` for scores in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    pub confidence: f32,
    pub raw_score: f32,
}

impl PredictionResult {
    pub fn from_score(raw_score: f32) -> Self {
        if raw_score > DECISION_THRESHOLD {
            Self {
                label: Label::Dog,
                confidence: raw_score,
                raw_score,
            }
        } else {
            Self {
                label: Label::Cat,
                confidence: 1.0 - raw_score,
                raw_score,
            }
        }
    }

    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }

    pub fn display_label(&self) -> String {
        format!("{} {}", self.label.emoji(), self.label)
    }

    pub fn display_confidence(&self) -> String {
        format!("{:.1}%", self.confidence_percent())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub request_id: String,
    pub prediction: PredictionResult,
    pub image: ImageDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ErrorKind {
    ModelNotFound,
    ModelLoad,
    Decode,
    Inference,
    MissingImage,
    UnsupportedMediaType,
    PayloadTooLarge,
    BadRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModelStatus {
    NotLoaded,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ModelStatus,
    pub model_path: String,
    pub error: Option<String>,
}
