use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{AnalysisMode, AnalyzeResponse, ErrorResponse};

/// Posts the original file and the selected mode to `/api/analyze`.
pub async fn analyze(file: &GlooFile, mode: AnalysisMode) -> Result<AnalyzeResponse, String> {
    let form_data =
        web_sys::FormData::new().map_err(|_| "Failed to build upload form".to_string())?;
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .map_err(|_| "Failed to attach image".to_string())?;
    form_data
        .append_with_str("mode", mode.as_ref())
        .map_err(|_| "Failed to attach mode".to_string())?;

    let request = Request::post("/api/analyze")
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        response
            .json::<AnalyzeResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(format!("Server error: {}", status)),
        }
    }
}
