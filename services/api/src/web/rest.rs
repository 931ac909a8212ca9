//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use flashcard_core::domain::{Flashcard, NewFlashcard, DEFAULT_TOPIC};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_flashcards_handler,
        get_flashcards_handler,
    ),
    components(
        schemas(
            GenerateFlashcardsRequest,
            GenerateFlashcardsResponse,
            SavedFlashcard,
            FlashcardsResponse,
            FlashcardOut,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Flashcards API", description = "Generate flashcards from study notes and read them back.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Study notes to turn into flashcards.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateFlashcardsRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Defaults to "General" when absent or blank.
    #[serde(default)]
    pub topic: Option<String>,
}

/// A flashcard as returned right after it was stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct SavedFlashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub topic: String,
    pub difficulty: String,
}

/// The response payload sent after a generation request.
///
/// `flashcards` holds only the cards that were stored successfully;
/// `session_id` is null when the study session could not be recorded.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateFlashcardsResponse {
    pub success: bool,
    pub flashcards: Vec<SavedFlashcard>,
    pub session_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlashcardOut {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub topic: String,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

impl From<Flashcard> for FlashcardOut {
    fn from(card: Flashcard) -> Self {
        Self {
            id: card.id,
            question: card.question,
            answer: card.answer,
            topic: card.topic,
            difficulty: card.difficulty.to_string(),
            created_at: card.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<FlashcardOut>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlashcardQuery {
    /// Exact topic to filter by; empty means no filter.
    pub topic: Option<String>,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (status, Json(ErrorResponse { error: message.into() }))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate flashcards from study notes.
///
/// Runs the question generator, stores each resulting card under the request's
/// topic, and records one study session for the request.
#[utoipa::path(
    post,
    path = "/generate_flashcards",
    request_body = GenerateFlashcardsRequest,
    responses(
        (status = 200, description = "Flashcards generated", body = GenerateFlashcardsResponse),
        (status = 400, description = "Missing text or malformed body", body = ErrorResponse),
    )
)]
pub async fn generate_flashcards_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateFlashcardsRequest>, JsonRejection>,
) -> Result<Json<GenerateFlashcardsResponse>, HandlerError> {
    let Json(request) =
        payload.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.body_text()))?;

    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "No text provided"));
    }
    let topic = request
        .topic
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TOPIC)
        .to_string();

    info!("Generating flashcards for topic '{}' ({} chars)", topic, text.len());
    let questions = app_state.question_generator.generate(&text).await;

    let mut saved = Vec::with_capacity(questions.len());
    for q in questions {
        let card = NewFlashcard::new(q.question, q.answer, Some(&topic), q.difficulty);
        match app_state.db.save_flashcard(card.clone()).await {
            Ok(id) => saved.push(SavedFlashcard {
                id,
                question: card.question,
                answer: card.answer,
                topic: card.topic,
                difficulty: card.difficulty.to_string(),
            }),
            Err(e) => error!("Failed to save flashcard: {:?}", e),
        }
    }

    let session_id = match app_state
        .db
        .save_study_session(&format!("Session - {}", topic), &text)
        .await
    {
        Ok(id) => Some(id),
        Err(e) => {
            error!("Failed to save study session: {:?}", e);
            None
        }
    };

    Ok(Json(GenerateFlashcardsResponse {
        success: true,
        flashcards: saved,
        session_id,
    }))
}

/// List stored flashcards, newest first.
#[utoipa::path(
    get,
    path = "/get_flashcards",
    params(FlashcardQuery),
    responses(
        (status = 200, description = "Stored flashcards", body = FlashcardsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_flashcards_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<FlashcardQuery>,
) -> Result<Json<FlashcardsResponse>, HandlerError> {
    let topic = query.topic.as_deref().filter(|t| !t.is_empty());

    let cards = app_state.db.get_all_flashcards(topic).await.map_err(|e| {
        error!("Failed to retrieve flashcards: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(FlashcardsResponse {
        flashcards: cards.into_iter().map(FlashcardOut::from).collect(),
    }))
}
