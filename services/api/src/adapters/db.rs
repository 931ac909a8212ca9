//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use crate::config::DatabaseSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashcard_core::domain::{Flashcard, NewFlashcard};
use flashcard_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::time::Duration;

const CREATE_FLASHCARDS: &str = r#"
CREATE TABLE IF NOT EXISTS flashcards (
    id          BIGSERIAL PRIMARY KEY,
    question    TEXT NOT NULL,
    answer      TEXT NOT NULL,
    topic       VARCHAR(255) NOT NULL DEFAULT 'General',
    difficulty  VARCHAR(10) NOT NULL DEFAULT 'medium'
                CHECK (difficulty IN ('easy', 'medium', 'hard')),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

const CREATE_STUDY_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS study_sessions (
    id             BIGSERIAL PRIMARY KEY,
    session_name   VARCHAR(255) NOT NULL,
    original_text  TEXT,
    created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool that opens connections on first use, so the server can start
    /// while the database is still unreachable.
    pub fn connect_lazy(settings: &DatabaseSettings, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(connect_options(settings)?);
        Ok(Self::new(pool))
    }
}

/// Translates configured settings into `sqlx` connection options.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, sqlx::Error> {
    match settings {
        DatabaseSettings::Url(url) => url.parse::<PgConnectOptions>(),
        DatabaseSettings::Parts {
            host,
            port,
            user,
            password,
            database,
        } => {
            let mut options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(database);
            if let Some(password) = password {
                options = options.password(password);
            }
            Ok(options)
        }
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct FlashcardRecord {
    id: i64,
    question: String,
    answer: String,
    topic: String,
    difficulty: String,
    created_at: DateTime<Utc>,
}
impl FlashcardRecord {
    fn to_domain(self) -> PortResult<Flashcard> {
        let difficulty = self
            .difficulty
            .parse()
            .map_err(|e| PortError::Unexpected(format!("flashcard {}: {}", self.id, e)))?;
        Ok(Flashcard {
            id: self.id,
            question: self.question,
            answer: self.answer,
            topic: self.topic,
            difficulty,
            created_at: self.created_at,
        })
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn initialize(&self) -> PortResult<()> {
        for statement in [CREATE_FLASHCARDS, CREATE_STUDY_SESSIONS] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        Ok(())
    }

    async fn save_flashcard(&self, card: NewFlashcard) -> PortResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO flashcards (question, answer, topic, difficulty) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&card.question)
        .bind(&card.answer)
        .bind(&card.topic)
        .bind(card.difficulty.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn get_all_flashcards(&self, topic: Option<&str>) -> PortResult<Vec<Flashcard>> {
        let records = match topic {
            Some(topic) => {
                sqlx::query_as::<_, FlashcardRecord>(
                    "SELECT id, question, answer, topic, difficulty, created_at FROM flashcards WHERE topic = $1 ORDER BY created_at DESC, id DESC",
                )
                .bind(topic)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, FlashcardRecord>(
                    "SELECT id, question, answer, topic, difficulty, created_at FROM flashcards ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn save_study_session(&self, session_name: &str, original_text: &str) -> PortResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO study_sessions (session_name, original_text) VALUES ($1, $2) RETURNING id",
        )
        .bind(session_name)
        .bind(original_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}
