use shared::{AnalysisMode, AnalysisReport, FeatureType};

use super::models::AnalyzeImageResult;

/// Renders the part of `result` that belongs to `mode`.
///
/// The branch is picked by the mode's feature flag, the same value that was
/// sent in the request. Missing sub-fields mean "nothing detected".
pub fn format_report(mode: AnalysisMode, result: &AnalyzeImageResult) -> AnalysisReport {
    let lines: Vec<String> = match mode.feature_type() {
        FeatureType::TextDetection => result
            .image_text
            .as_ref()
            .and_then(|text| text.lines.as_ref())
            .map(|lines| lines.iter().map(|line| line.text.clone()).collect())
            .unwrap_or_default(),
        FeatureType::FaceDetection => result
            .detected_faces
            .iter()
            .flatten()
            .enumerate()
            .map(|(idx, face)| {
                format!(
                    "Face {}: confidence {}%",
                    idx + 1,
                    format_percent(warn_if_out_of_range(face.confidence))
                )
            })
            .collect(),
        FeatureType::ObjectDetection => result
            .image_objects
            .iter()
            .flatten()
            .map(|obj| {
                format!(
                    "{} ({}%)",
                    obj.name,
                    format_percent(warn_if_out_of_range(obj.confidence))
                )
            })
            .collect(),
        FeatureType::ImageClassification => result
            .labels
            .iter()
            .flatten()
            .map(|label| {
                format!(
                    "{} ({}%)",
                    label.name,
                    format_percent(warn_if_out_of_range(label.confidence))
                )
            })
            .collect(),
    };

    AnalysisReport::from_lines(mode, lines)
}

/// `confidence * 100` rounded to two decimals, always with at least one
/// decimal digit: 0.5 -> "50.0", 0.8734 -> "87.34".
///
/// Rounding is done on the exact binary value of the product, half to even.
pub fn format_percent(confidence: f64) -> String {
    let mut pct = format!("{:.2}", confidence * 100.0);
    if pct.ends_with('0') {
        pct.pop();
    }
    pct
}

fn warn_if_out_of_range(confidence: f64) -> f64 {
    if !(0.0..=1.0).contains(&confidence) {
        log::warn!("Confidence {} outside [0, 1]; displaying as-is", confidence);
    }
    confidence
}
