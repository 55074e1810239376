use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use sanimap::config::Settings;
use sanimap::routes::{self, facilities::{AppState, SearchLimits}};
use sanimap::services::DatasetLoader;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Sanimap service...");

    let delimiter = settings.dataset_delimiter().map_err(|e| {
        error!("Invalid dataset configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // The dataset is loaded once and shared read-only by every worker
    let dataset = DatasetLoader::with_delimiter(delimiter)
        .load_from_path(&settings.dataset.path)
        .map_err(|e| {
            error!("Failed to load dataset from {}: {}", settings.dataset.path, e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

    let dataset = Arc::new(dataset);

    let limits = SearchLimits {
        default_max_distance_m: settings.search.default_max_distance_m,
        max_distance_limit_m: settings.search.max_distance_limit_m,
        max_results: settings.search.max_results,
    };

    info!("Search limits: {:?}", limits);

    let app_state = AppState::new(dataset, limits);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
