pub mod domain;
pub mod generation;
pub mod memory;
pub mod ports;

pub use domain::{Difficulty, Flashcard, NewFlashcard, QuestionDraft, StudySession, DEFAULT_TOPIC};
pub use generation::{fallback_questions, parse_questions_and_answers, QuestionGenerator, MAX_QUESTIONS};
pub use memory::MemoryStore;
pub use ports::{DatabaseService, PortError, PortResult, QuestionGenerationService};
