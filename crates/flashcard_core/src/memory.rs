//! crates/flashcard_core/src/memory.rs
//!
//! An in-process `DatabaseService` with the same ordering and filtering rules as
//! the PostgreSQL adapter.

use crate::domain::{Flashcard, NewFlashcard, StudySession};
use crate::ports::{DatabaseService, PortResult};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    flashcards: RwLock<Vec<Flashcard>>,
    sessions: RwLock<Vec<StudySession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sessions recorded so far, oldest first.
    pub fn study_sessions(&self) -> Vec<StudySession> {
        self.sessions.read().clone()
    }
}

#[async_trait]
impl DatabaseService for MemoryStore {
    async fn initialize(&self) -> PortResult<()> {
        Ok(())
    }

    async fn save_flashcard(&self, card: NewFlashcard) -> PortResult<i64> {
        let mut cards = self.flashcards.write();
        let id = cards.last().map_or(1, |c| c.id + 1);
        cards.push(Flashcard {
            id,
            question: card.question,
            answer: card.answer,
            topic: card.topic,
            difficulty: card.difficulty,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_all_flashcards(&self, topic: Option<&str>) -> PortResult<Vec<Flashcard>> {
        let mut v: Vec<Flashcard> = self
            .flashcards
            .read()
            .iter()
            .filter(|c| topic.map_or(true, |t| c.topic == t))
            .cloned()
            .collect();
        v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(v)
    }

    async fn save_study_session(&self, session_name: &str, original_text: &str) -> PortResult<i64> {
        let mut sessions = self.sessions.write();
        let id = sessions.last().map_or(1, |s| s.id + 1);
        sessions.push(StudySession {
            id,
            session_name: session_name.to_string(),
            original_text: original_text.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}
