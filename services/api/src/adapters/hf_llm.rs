//! services/api/src/adapters/hf_llm.rs
//!
//! This module contains the adapter for the hosted text-generation model.
//! It implements the `QuestionGenerationService` port from the `core` crate.

use async_trait::async_trait;
use flashcard_core::{
    domain::QuestionDraft,
    generation::{build_prompt, parse_questions_and_answers},
    ports::{PortError, PortResult, QuestionGenerationService},
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_length: u32,
    temperature: f32,
    do_sample: bool,
}

impl Default for InferenceParameters {
    fn default() -> Self {
        Self {
            max_length: 500,
            temperature: 0.7,
            do_sample: true,
        }
    }
}

#[derive(Deserialize)]
struct InferenceOutput {
    generated_text: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuestionGenerationService` against a Hugging Face
/// inference endpoint.
#[derive(Clone)]
pub struct HuggingFaceAdapter {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HuggingFaceAdapter {
    /// Creates a new `HuggingFaceAdapter` whose requests give up after `timeout`.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    async fn fetch_generated_text(&self, prompt: &str) -> PortResult<String> {
        let payload = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters::default(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(PortError::Unavailable(format!(
                "inference endpoint returned {}",
                response.status()
            )));
        }

        let outputs: Vec<InferenceOutput> = response
            .json()
            .await
            .map_err(|e| PortError::Unavailable(format!("malformed inference response: {e}")))?;

        outputs
            .into_iter()
            .next()
            .and_then(|o| o.generated_text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| PortError::Unavailable("inference response contained no generated text".to_string()))
    }
}

//=========================================================================================
// `QuestionGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuestionGenerationService for HuggingFaceAdapter {
    async fn generate_questions(&self, text: &str) -> PortResult<Vec<QuestionDraft>> {
        let prompt = build_prompt(text);
        let generated_text = self.fetch_generated_text(&prompt).await?;
        debug!("Inference endpoint returned {} bytes", generated_text.len());
        Ok(parse_questions_and_answers(&generated_text))
    }
}
