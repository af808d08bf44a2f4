//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{Argon2Hasher, GeminiAnalysisAdapter, OpenAiSstAdapter, SqliteStorageAdapter},
    config::{Config, PasswordStorage},
    error::ApiError,
    web::{build_router, rest::ApiDoc, state::AppState},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use std::sync::Arc;
use tongue_balance_core::{
    ports::{CredentialHasher, KeyValueStore},
    FeatureFlags, PlainTextCredentials,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = SqliteStorageAdapter::connect(&config.database_url, 5).await?;
    let storage_adapter = Arc::new(SqliteStorageAdapter::new(db_pool));
    info!("Running database migrations...");
    storage_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Service Adapters ---
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; every analysis will fail");
    }
    let analysis_adapter = Arc::new(GeminiAnalysisAdapter::from_credentials(
        config.gemini_api_key.as_deref(),
        &config.gemini_base_url,
        config.analysis_model.clone(),
    ));

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; voice input is disabled");
    }
    let sst_adapter = Arc::new(OpenAiSstAdapter::from_api_key(
        config.openai_api_key.as_deref(),
        config.sst_model.clone(),
    ));

    let hasher: Arc<dyn CredentialHasher> = match config.password_storage {
        PasswordStorage::Argon2 => Arc::new(Argon2Hasher::new()),
        PasswordStorage::Plain => {
            warn!("Passwords are stored in plain text");
            Arc::new(PlainTextCredentials)
        }
    };

    let flags = FeatureFlags::for_environment(&config.feature_env);
    info!("Feature flags for '{}': {:?}", config.feature_env, flags);

    // --- 4. Build the Shared AppState ---
    let storage: Arc<dyn KeyValueStore> = storage_adapter;
    let app_state = Arc::new(AppState::new(
        storage,
        hasher,
        analysis_adapter,
        sst_adapter,
        flags,
    ));

    // --- 5. Create the Web Router ---
    let cors_origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let api_router = build_router(app_state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
