//! crates/flashcard_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use crate::domain::{Flashcard, NewFlashcard, QuestionDraft};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    /// The remote service could not be reached or answered with something unusable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    /// Creates the `flashcards` and `study_sessions` tables if they are missing.
    async fn initialize(&self) -> PortResult<()>;

    // --- Flashcards ---
    /// Stores one card and returns the identifier assigned by the store.
    async fn save_flashcard(&self, card: NewFlashcard) -> PortResult<i64>;

    /// Returns every card, newest first, optionally restricted to an exact topic.
    async fn get_all_flashcards(&self, topic: Option<&str>) -> PortResult<Vec<Flashcard>>;

    // --- Study Sessions ---
    async fn save_study_session(&self, session_name: &str, original_text: &str)
        -> PortResult<i64>;
}

#[async_trait]
pub trait QuestionGenerationService: Send + Sync {
    /// Derives question/answer pairs from study text using an external model.
    async fn generate_questions(&self, text: &str) -> PortResult<Vec<QuestionDraft>>;
}
