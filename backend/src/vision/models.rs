use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use shared::{AnalysisMode, FeatureType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageDetails {
    Inline { data: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFeature {
    pub feature_type: FeatureType,
}

/// Body of `POST /actions/analyzeImage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageDetails {
    pub image: ImageDetails,
    pub features: Vec<ImageFeature>,
    pub compartment_id: String,
}

impl AnalyzeImageDetails {
    /// Embeds the original upload and requests exactly the feature of `mode`.
    pub fn inline(image_bytes: &[u8], mode: AnalysisMode, compartment_id: &str) -> Self {
        Self {
            image: ImageDetails::Inline {
                data: STANDARD.encode(image_bytes),
            },
            features: vec![ImageFeature {
                feature_type: mode.feature_type(),
            }],
            compartment_id: compartment_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeImageResult {
    pub image_objects: Option<Vec<ImageObject>>,
    pub labels: Option<Vec<Label>>,
    pub detected_faces: Option<Vec<Face>>,
    pub image_text: Option<ImageText>,
    pub errors: Option<Vec<ProcessingError>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageObject {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Label {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Face {
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageText {
    pub lines: Option<Vec<Line>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Line {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessingError {
    pub code: String,
    pub message: String,
}

/// Error envelope returned by OCI on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceErrorBody {
    pub code: String,
    pub message: String,
}
