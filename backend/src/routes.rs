use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{info, warn};
use serde_json::json;
use shared::{AnalysisMode, ErrorResponse};
use std::io::Write;
use std::str::FromStr;

use crate::intake::image_service::IntakeError;
use crate::pipeline;
use crate::vision::vision_client::VisionClient;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub vision_client: VisionClient,
    pub compartment_id: String,
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/analyze").route(web::post().to(handle_analyze)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

fn error_response(mut builder: actix_web::HttpResponseBuilder, error: String) -> HttpResponse {
    builder.json(ErrorResponse { error })
}

async fn handle_analyze(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut mode_value: Option<String> = None;

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            data.write_all(&chunk)?;
        }

        match name.as_str() {
            "image" => upload = Some((file_name.unwrap_or_default(), data)),
            "mode" => mode_value = Some(String::from_utf8_lossy(&data).trim().to_string()),
            other => warn!("Ignoring unexpected form field `{}`", other),
        }
    }

    let Some((file_name, bytes)) = upload else {
        return Ok(error_response(
            HttpResponse::BadRequest(),
            "No image uploaded".into(),
        ));
    };

    let mode = match mode_value.as_deref() {
        None | Some("") => AnalysisMode::default(),
        Some(value) => match AnalysisMode::from_str(value) {
            Ok(mode) => mode,
            Err(_) => {
                return Ok(error_response(
                    HttpResponse::BadRequest(),
                    format!("Unknown analysis mode `{}`", value),
                ));
            }
        },
    };

    info!("Analyzing {} with {}", file_name, mode.label());

    match pipeline::run(&file_name, bytes, mode, &state.vision_client, &state.compartment_id).await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e @ (IntakeError::UnsupportedFormat(_) | IntakeError::Empty | IntakeError::Decode(_))) => {
            warn!("Rejected upload {}: {}", file_name, e);
            Ok(error_response(
                HttpResponse::UnprocessableEntity(),
                e.to_string(),
            ))
        }
        Err(e) => {
            log::error!("Failed to process {}: {}", file_name, e);
            Ok(error_response(
                HttpResponse::InternalServerError(),
                e.to_string(),
            ))
        }
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
