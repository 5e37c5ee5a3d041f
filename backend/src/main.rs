mod config;
mod intake;
mod oci;
mod pipeline;
mod routes;
mod vision;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use oci::config::{OciProfile, expand_home};
use oci::signer::RequestSigner;
use routes::{AppState, configure_routes};
use std::env;
use url::Url;
use vision::vision_client::VisionClient;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    log::error!("{}: {}", context, err);
    std::io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    }

    let app_config =
        AppConfig::load().map_err(|e| startup_error("Invalid application config", e))?;

    let oci_config_path = expand_home(&app_config.oci_config_file);
    let profile = OciProfile::from_file(&oci_config_path, &app_config.oci_profile)
        .map_err(|e| startup_error("Failed to load OCI credentials", e))?;
    let signer = RequestSigner::from_profile(&profile)
        .map_err(|e| startup_error("Failed to load OCI API key", e))?;
    log::info!("Signing vision requests with key {}", signer.key_id());

    let endpoint = match &app_config.vision_endpoint {
        Some(raw) => Url::parse(raw).map_err(|e| startup_error("Invalid vision_endpoint", e))?,
        None => VisionClient::endpoint_for_region(&profile.region)
            .map_err(|e| startup_error("Invalid region", e))?,
    };
    let vision_client = VisionClient::new(endpoint, signer);
    log::info!("Vision endpoint: {}", vision_client.endpoint());

    let state = web::Data::new(AppState {
        vision_client,
        compartment_id: app_config.compartment_id.clone(),
    });

    let frontend_dir = app_config.frontend_dir();
    let bind_address = format!("0.0.0.0:{}", app_config.port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(state.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
