use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use strum::IntoEnumIterator;

/// File extensions the upload control and the backend accept.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// `accept` attribute for the upload control, e.g. `.jpg,.jpeg,.png`.
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

/// Returns the canonical accepted extension of `file_name`, if any.
pub fn accepted_extension(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.iter().copied().find(|accepted| *accepted == ext)
}

/// Analysis feature requested from the vision service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    ImageClassification,
    ObjectDetection,
    TextDetection,
    FaceDetection,
}

/// The four analysis modes offered in the dropdown, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisMode {
    #[default]
    ImageClassification,
    ObjectDetection,
    TextDetection,
    FaceDetection,
}

struct ModeDescriptor {
    label: &'static str,
    feature: FeatureType,
    heading: &'static str,
    empty_message: &'static str,
}

impl AnalysisMode {
    // Every per-mode attribute comes from this one table so the feature that
    // is sent and the branch that is rendered cannot drift apart.
    const fn descriptor(self) -> ModeDescriptor {
        match self {
            AnalysisMode::ImageClassification => ModeDescriptor {
                label: "Image Classification",
                feature: FeatureType::ImageClassification,
                heading: "Image classification",
                empty_message: "no labels found",
            },
            AnalysisMode::ObjectDetection => ModeDescriptor {
                label: "Object Detection",
                feature: FeatureType::ObjectDetection,
                heading: "Detected objects",
                empty_message: "no objects detected",
            },
            AnalysisMode::TextDetection => ModeDescriptor {
                label: "Text Detection",
                feature: FeatureType::TextDetection,
                heading: "Detected text",
                empty_message: "no text detected",
            },
            AnalysisMode::FaceDetection => ModeDescriptor {
                label: "Face Detection",
                feature: FeatureType::FaceDetection,
                heading: "Face detection",
                empty_message: "no faces detected",
            },
        }
    }

    pub const fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub const fn feature_type(self) -> FeatureType {
        self.descriptor().feature
    }

    pub const fn heading(self) -> &'static str {
        self.descriptor().heading
    }

    pub const fn empty_message(self) -> &'static str {
        self.descriptor().empty_message
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBody {
    Items { lines: Vec<String> },
    Empty { message: String },
}

/// Rendered result of one analysis: a heading plus either rows or the
/// mode's empty-state message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    pub heading: String,
    pub body: ReportBody,
}

impl AnalysisReport {
    pub fn from_lines(mode: AnalysisMode, lines: Vec<String>) -> Self {
        let body = if lines.is_empty() {
            ReportBody::Empty {
                message: mode.empty_message().to_string(),
            }
        } else {
            ReportBody::Items { lines }
        };

        Self {
            mode,
            heading: mode.heading().to_string(),
            body,
        }
    }
}

/// Half-scale preview of the upload, PNG encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,
    pub preview_width: u32,
    pub preview_height: u32,
    pub data_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Report(AnalysisReport),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub preview: ImagePreview,
    pub outcome: AnalysisOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn mode_to_feature_is_a_bijection() {
        let features: HashSet<FeatureType> =
            AnalysisMode::iter().map(AnalysisMode::feature_type).collect();
        let all: HashSet<FeatureType> = FeatureType::iter().collect();
        assert_eq!(AnalysisMode::iter().count(), 4);
        assert_eq!(features, all);
    }

    #[test]
    fn first_mode_is_the_default() {
        assert_eq!(AnalysisMode::iter().next(), Some(AnalysisMode::default()));
        assert_eq!(AnalysisMode::default().label(), "Image Classification");
    }

    #[test]
    fn mode_parses_from_form_value() {
        assert_eq!(
            AnalysisMode::from_str("object_detection").unwrap(),
            AnalysisMode::ObjectDetection
        );
        assert_eq!(AnalysisMode::FaceDetection.as_ref(), "face_detection");
        assert!(AnalysisMode::from_str("Object Detection").is_err());
    }

    #[test]
    fn feature_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&FeatureType::TextDetection).unwrap();
        assert_eq!(json, "\"TEXT_DETECTION\"");
        assert_eq!(FeatureType::FaceDetection.to_string(), "FACE_DETECTION");
    }

    #[test]
    fn empty_lines_produce_empty_state() {
        for mode in AnalysisMode::iter() {
            let report = AnalysisReport::from_lines(mode, Vec::new());
            assert_eq!(
                report.body,
                ReportBody::Empty {
                    message: mode.empty_message().to_string()
                }
            );
        }
    }

    #[test]
    fn accept_attribute_lists_every_accepted_extension() {
        let attribute = accept_attribute();
        assert_eq!(attribute, ".jpg,.jpeg,.png");
        for ext in ACCEPTED_EXTENSIONS {
            assert_eq!(accepted_extension(&format!("upload.{ext}")), Some(ext));
            assert!(attribute.split(',').any(|a| a == format!(".{ext}")));
        }
    }

    #[test]
    fn accepted_extensions_are_case_insensitive() {
        assert_eq!(accepted_extension("photo.JPG"), Some("jpg"));
        assert_eq!(accepted_extension("scan.final.png"), Some("png"));
        assert_eq!(accepted_extension("image.jpeg"), Some("jpeg"));
        assert_eq!(accepted_extension("anim.gif"), None);
        assert_eq!(accepted_extension("noextension"), None);
    }
}
