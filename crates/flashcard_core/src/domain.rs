//! crates/flashcard_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Topic assigned to flashcards when the caller does not name one.
pub const DEFAULT_TOPIC: &str = "General";

/// How hard a flashcard is expected to be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or submitted difficulty is not one of easy/medium/hard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}'")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// A persisted question/answer card. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

/// The fields a caller supplies when saving a flashcard; the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl NewFlashcard {
    /// Builds a card under `topic` as given, falling back to [`DEFAULT_TOPIC`]
    /// when the topic is blank.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        topic: Option<&str>,
        difficulty: Difficulty,
    ) -> Self {
        let topic = topic
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TOPIC);
        Self {
            question: question.into(),
            answer: answer.into(),
            topic: topic.to_string(),
            difficulty,
        }
    }
}

/// Record of one generation request and the text it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    pub id: i64,
    pub session_name: String,
    pub original_text: String,
    pub created_at: DateTime<Utc>,
}

/// A generated question/answer pair that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

impl QuestionDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            difficulty: Difficulty::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn blank_topic_falls_back_to_general() {
        let card = NewFlashcard::new("q", "a", Some("   "), Difficulty::Medium);
        assert_eq!(card.topic, DEFAULT_TOPIC);
        let card = NewFlashcard::new("q", "a", None, Difficulty::Medium);
        assert_eq!(card.topic, DEFAULT_TOPIC);
        let card = NewFlashcard::new("q", "a", Some("Biology"), Difficulty::Hard);
        assert_eq!(card.topic, "Biology");
        let card = NewFlashcard::new("q", "a", Some(" Biology "), Difficulty::Hard);
        assert_eq!(card.topic, " Biology ");
    }
}
