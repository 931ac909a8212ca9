//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{db::DbAdapter, hf_llm::HuggingFaceAdapter},
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState},
};
use flashcard_core::{ports::DatabaseService, QuestionGenerator};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Prepare the Database ---
    let db_adapter = Arc::new(DbAdapter::connect_lazy(&config.database, 5)?);
    info!("Ensuring database tables exist...");
    match db_adapter.initialize().await {
        Ok(()) => info!("Database initialized."),
        Err(e) => error!("Failed to initialize database: {}", e),
    }

    // --- 3. Initialize the Question Generator ---
    let question_generator = match &config.huggingface_api_key {
        Some(api_key) => {
            let adapter = HuggingFaceAdapter::new(
                config.inference_url.clone(),
                api_key.clone(),
                config.inference_timeout,
            )?;
            QuestionGenerator::new(Arc::new(adapter))
        }
        None => {
            warn!("HUGGING_API_KEY is not set; flashcards will use local question generation");
            QuestionGenerator::offline()
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        db: db_adapter,
        config: config.clone(),
        question_generator,
    });

    // --- 5. Create the Web Router ---
    let app = build_router(app_state)?;

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
