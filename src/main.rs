use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;

use crate::config::app_config::StoreBackend;
use crate::db::{CatalogStore, MemoryCatalog, PgCatalog};
use crate::services::catalog::Catalog;
use crate::services::identity::Sessions;
use crate::services::youtube::{DisabledMetadata, MetadataSource, YouTubeClient};

mod api;
mod config;
mod db;
mod errors;
mod services;
mod view;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    // Load configuration
    let config = config::AppConfig::new().expect("Failed to load configuration");

    log::info!(
        "Starting server on {}:{}",
        config.server.host,
        config.server.port
    );

    let store: Arc<dyn CatalogStore> = match config.database.backend {
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database.url, config.database.max_connections)
                .expect("Failed to create database pool");
            Arc::new(PgCatalog::new(pool))
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory catalog; nothing will be persisted");
            Arc::new(MemoryCatalog::new())
        }
    };

    let metadata: Arc<dyn MetadataSource> = match config.youtube.api_key {
        Some(api_key) => Arc::new(YouTubeClient::new(
            reqwest::Client::new(),
            config.youtube.api_url.clone(),
            api_key,
        )),
        None => {
            log::warn!("APP__YOUTUBE__API_KEY is not set; metadata lookups are disabled");
            Arc::new(DisabledMetadata)
        }
    };

    let catalog = web::Data::new(Catalog::new(store));
    let sessions = web::Data::new(Sessions::new(Duration::from_secs(
        config.session.idle_ttl_secs,
    )));
    let metadata: web::Data<dyn MetadataSource> = web::Data::from(metadata);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .app_data(sessions.clone())
            .app_data(metadata.clone())
            .wrap(actix_cors::Cors::permissive()) // Configure properly in production
            .configure(api::configure)
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await
}
