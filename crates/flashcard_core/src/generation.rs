//! crates/flashcard_core/src/generation.rs
//!
//! Turns study text into question/answer pairs. The remote model is tried first;
//! any failure drops to a deterministic sentence-splitting heuristic.

use crate::domain::QuestionDraft;
use crate::ports::QuestionGenerationService;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on pairs returned from a single generation request.
pub const MAX_QUESTIONS: usize = 5;

/// Only this many characters of the input are embedded in the prompt.
pub const PROMPT_CHAR_LIMIT: usize = 1000;

/// Fragments must be longer than this (after trimming) to become a question.
pub const MIN_FRAGMENT_CHARS: usize = 20;

const PROMPT_TEMPLATE: &str = "Generate 5 study questions and answers from this text. \
Format as Q: question A: answer\nText: {text}";

/// Builds the inference prompt from the first [`PROMPT_CHAR_LIMIT`] characters of `text`.
pub fn build_prompt(text: &str) -> String {
    let excerpt: String = text.chars().take(PROMPT_CHAR_LIMIT).collect();
    PROMPT_TEMPLATE.replace("{text}", &excerpt)
}

//=========================================================================================
// Remote Response Parsing
//=========================================================================================

/// Extracts `Q:`/`A:` pairs from model output.
///
/// A `Q:` line closes the pending pair and opens a new question. An `A:` line sets
/// the pending answer. Other non-empty lines continue the answer if one is open,
/// otherwise the question. Pairs missing either half are dropped.
pub fn parse_questions_and_answers(generated_text: &str) -> Vec<QuestionDraft> {
    let mut pairs = Vec::new();
    let mut question = String::new();
    let mut answer = String::new();

    for line in generated_text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Q:") {
            close_pair(&mut pairs, &question, &answer);
            if pairs.len() >= MAX_QUESTIONS {
                return pairs;
            }
            question = rest.trim().to_string();
            answer.clear();
        } else if let Some(rest) = line.strip_prefix("A:") {
            answer = rest.trim().to_string();
        } else if line.is_empty() {
            continue;
        } else if !answer.is_empty() {
            answer.push(' ');
            answer.push_str(line);
        } else if !question.is_empty() {
            question.push(' ');
            question.push_str(line);
        }
    }

    close_pair(&mut pairs, &question, &answer);
    pairs.truncate(MAX_QUESTIONS);
    pairs
}

fn close_pair(pairs: &mut Vec<QuestionDraft>, question: &str, answer: &str) {
    if !question.is_empty() && !answer.is_empty() {
        pairs.push(QuestionDraft::new(question, answer));
    }
}

//=========================================================================================
// Local Fallback
//=========================================================================================

/// The question stems used by the fallback, cycled by fragment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    What,
    How,
    Why,
    When,
    Where,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 5] = [
        QuestionKind::What,
        QuestionKind::How,
        QuestionKind::Why,
        QuestionKind::When,
        QuestionKind::Where,
    ];

    /// Template for the `index`-th qualifying fragment.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Wraps a fragment into this kind's question sentence.
    pub fn phrase(&self, fragment: &str) -> String {
        match self {
            QuestionKind::What => format!("What is the main concept discussed in: '{fragment}'?"),
            QuestionKind::How => format!("How does this relate to the topic: '{fragment}'?"),
            QuestionKind::Why => format!("Why is this important: '{fragment}'?"),
            QuestionKind::When => format!("When might this apply: '{fragment}'?"),
            QuestionKind::Where => format!("Where would you use this information: '{fragment}'?"),
        }
    }
}

/// Derives pairs from period-separated fragments without any network access.
///
/// Pure function of `text`: the same input always yields the same ordered output.
pub fn fallback_questions(text: &str) -> Vec<QuestionDraft> {
    text.split('.')
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > MIN_FRAGMENT_CHARS)
        .take(MAX_QUESTIONS)
        .enumerate()
        .map(|(i, fragment)| QuestionDraft::new(QuestionKind::for_index(i).phrase(fragment), fragment))
        .collect()
}

//=========================================================================================
// Orchestration
//=========================================================================================

/// Runs the remote generator when one is configured and falls back locally on failure.
#[derive(Clone, Default)]
pub struct QuestionGenerator {
    remote: Option<Arc<dyn QuestionGenerationService>>,
}

impl QuestionGenerator {
    /// Creates a generator that consults `remote` before falling back.
    pub fn new(remote: Arc<dyn QuestionGenerationService>) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    /// Creates a generator that only uses the local heuristic.
    pub fn offline() -> Self {
        Self::default()
    }

    pub async fn generate(&self, text: &str) -> Vec<QuestionDraft> {
        if let Some(remote) = &self.remote {
            match remote.generate_questions(text).await {
                Ok(mut questions) => {
                    questions.retain(|q| !q.question.is_empty() && !q.answer.is_empty());
                    questions.truncate(MAX_QUESTIONS);
                    debug!("Remote generator produced {} questions", questions.len());
                    return questions;
                }
                Err(e) => warn!("Remote question generation failed, using fallback: {}", e),
            }
        }
        fallback_questions(text)
    }
}
