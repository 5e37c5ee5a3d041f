use shared::{AnalysisMode, AnalysisOutcome, AnalyzeResponse};

use crate::intake::image_service::{IntakeError, UploadedImage};
use crate::vision::formatter::format_report;
use crate::vision::models::AnalyzeImageDetails;
use crate::vision::vision_client::VisionClient;

/// One full pass over an interaction: decode, preview, build the request,
/// invoke the service once and format the result for `mode`.
///
/// Intake failures abort the pass. A failed service call still returns the
/// preview, with the error in place of the report.
pub async fn run(
    file_name: &str,
    bytes: Vec<u8>,
    mode: AnalysisMode,
    client: &VisionClient,
    compartment_id: &str,
) -> Result<AnalyzeResponse, IntakeError> {
    let upload = UploadedImage::decode(file_name, bytes)?;
    let preview = upload.preview_payload()?;

    let details = AnalyzeImageDetails::inline(upload.bytes(), mode, compartment_id);
    let outcome = match client.analyze_image(&details).await {
        Ok(result) => AnalysisOutcome::Report(format_report(mode, &result)),
        Err(e) => {
            log::error!("Vision analysis failed for {}: {}", file_name, e);
            AnalysisOutcome::Failed {
                message: format!("Error: {}", e),
            }
        }
    };

    Ok(AnalyzeResponse { preview, outcome })
}
