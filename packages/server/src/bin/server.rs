//! SmileSync hub server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin smilesync-server
//! cargo run --bin smilesync-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use smilesync_server::{
    app::{AppSettings, Application},
    config::ServerConfig,
    domain::{ImageGenerator, RecordStore},
    infrastructure::{
        image_generator::{DalleImageGenerator, DisabledImageGenerator},
        record_store::{InMemoryRecordStore, JsonLinesRecordStore},
    },
    ui::Server,
};
use smilesync_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::parse();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Initialize dependencies in order:
    // 1. RecordStore
    // 2. ImageGenerator
    // 3. Application (session, use cases, dispatcher)
    // 4. Server

    // 1. RecordStore
    let record_store: Arc<dyn RecordStore> = match &config.record_log {
        Some(path) => {
            tracing::info!("Records are appended to {}", path.display());
            Arc::new(JsonLinesRecordStore::new(path.clone()))
        }
        None => Arc::new(InMemoryRecordStore::new()),
    };

    // 2. ImageGenerator
    let image_generator: Arc<dyn ImageGenerator> = match config.image_generation() {
        Some(image) => Arc::new(DalleImageGenerator::new(image.endpoint, image.api_key)),
        None => {
            tracing::warn!("Image generation is not configured, reward images are disabled");
            Arc::new(DisabledImageGenerator)
        }
    };

    // 3. Application
    let settings = match config.default_animal_type() {
        Ok(default_animal_type) => AppSettings {
            default_animal_type,
            ticker_settings: config.ticker_settings(),
            image_timeout: config.image_timeout(),
            login: config.login_usecase(),
        },
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let app = Application::build(settings, record_store, image_generator);

    // 4. Create and run the server
    let allowed_origin = match config.allowed_origin() {
        Ok(origin) => origin,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let server = Server::new(app.state(), allowed_origin);
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
