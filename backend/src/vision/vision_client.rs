use reqwest::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use url::Url;
use uuid::Uuid;

use super::models::{AnalyzeImageDetails, AnalyzeImageResult, ServiceErrorBody};
use crate::oci::signer::{RequestSigner, http_date};

pub const ANALYZE_IMAGE_PATH: &str = "/20220125/actions/analyzeImage";

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("Request to vision service failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid vision service payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid vision endpoint: {0}")]
    Endpoint(String),
    #[error("{code} ({status}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },
}

/// Client for the OCI Vision `analyzeImage` action.
#[derive(Clone)]
pub struct VisionClient {
    http_client: HttpClient,
    endpoint: Url,
    signer: RequestSigner,
}

impl VisionClient {
    pub fn new(endpoint: Url, signer: RequestSigner) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
            signer,
        }
    }

    pub fn endpoint_for_region(region: &str) -> Result<Url, VisionError> {
        let raw = format!("https://vision.aiservice.{}.oci.oraclecloud.com", region);
        Url::parse(&raw).map_err(|e| VisionError::Endpoint(format!("{}: {}", raw, e)))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one signed `analyzeImage` request. No retries.
    pub async fn analyze_image(
        &self,
        details: &AnalyzeImageDetails,
    ) -> Result<AnalyzeImageResult, VisionError> {
        let url = self
            .endpoint
            .join(ANALYZE_IMAGE_PATH)
            .map_err(|e| VisionError::Endpoint(e.to_string()))?;
        let host = host_header(&url)?;

        let body = serde_json::to_vec(details)?;
        let signed = self
            .signer
            .sign_post(&host, url.path(), &body, &http_date());
        let request_id = Uuid::new_v4().simple().to_string().to_uppercase();
        log::debug!("Signed {} byte analyzeImage body", signed.content_length);

        log::info!(
            "Calling vision analyzeImage ({:?}), opc-request-id {}",
            details.features.first().map(|f| f.feature_type),
            request_id
        );

        let response = self
            .http_client
            .post(url)
            .header(DATE, &signed.date)
            .header(CONTENT_TYPE, "application/json")
            .header("x-content-sha256", &signed.content_sha256)
            .header(AUTHORIZATION, &signed.authorization)
            .header("opc-request-id", &request_id)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let envelope: ServiceErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = if envelope.message.is_empty() {
                text
            } else {
                envelope.message
            };
            log::error!(
                "Vision service returned {} for opc-request-id {}: {}",
                status,
                request_id,
                message
            );
            return Err(VisionError::Service {
                status: status.as_u16(),
                code: if envelope.code.is_empty() {
                    status.canonical_reason().unwrap_or("Error").to_string()
                } else {
                    envelope.code
                },
                message,
            });
        }

        let result: AnalyzeImageResult = serde_json::from_str(&text)?;
        for err in result.errors.iter().flatten() {
            log::warn!("Vision feature error {}: {}", err.code, err.message);
        }
        Ok(result)
    }
}

fn host_header(url: &Url) -> Result<String, VisionError> {
    let host = url
        .host_str()
        .ok_or_else(|| VisionError::Endpoint(format!("{} has no host", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
