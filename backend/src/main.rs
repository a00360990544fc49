mod config;
mod flows;
mod history;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use flows::GeminiClient;
use routes::configure_routes;
use std::env;

// A 4 MiB image grows past 5 MiB once base64-encoded into a data URI.
const JSON_PAYLOAD_LIMIT: usize = 8 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    let app_config = match AppConfig::from_env() {
        Ok(app_config) => app_config,
        Err(e) => {
            log::error!("Failed to load configuration at startup: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Configuration loading failed: {}", e),
            ));
        }
    };

    // One model client for the whole process; every flow invocation reuses it.
    let client = web::Data::new(GeminiClient::new(&app_config));
    log::info!("Model client initialized: {}", app_config.model);

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
            .app_data(web::JsonConfig::default().limit(JSON_PAYLOAD_LIMIT))
            .app_data(client.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
