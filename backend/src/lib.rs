//! # Flock Tracker Backend
//!
//! Record keeping for poultry flocks: breeders submit daily observations
//! (mortality, feed, average weight, water intake, notes) per flock and day,
//! and an admin view reads, edits or deletes them.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers)
//!     ↓
//! Domain Layer (RecordService, Flock model)
//!     ↓
//! Storage Layer (single JSON document)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::RecordService;
use crate::storage::{FlockRepository, JsonConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up flock storage at {}", config.data_file.display());
    let connection = JsonConnection::new(&config.data_file)?;
    let repository = FlockRepository::new(connection);

    info!("Setting up domain model");
    let record_service = RecordService::new(Arc::new(repository));

    Ok(AppState { record_service })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let api_routes = Router::new()
        .route("/records/save", post(io::save_record))
        .route("/records/update", put(io::update_record))
        .route("/records/delete", delete(io::delete_record))
        .route("/flock/all-data", get(io::list_all_flocks))
        .route("/flock/data/:flock_id", get(io::get_flock));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .layer(cors_layer(&config.allowed_origins))
        .with_state(app_state);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
