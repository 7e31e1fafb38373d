use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod gemini;
mod params;

pub use gemini::{GeminiClient, API_KEY_PLACEHOLDER};
pub use params::{Category, OutputLength, Platform, Tone};

/// Quality ratings the model assigns to its rewrite, 1-10 each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub clarity: f64,
    pub detail: f64,
    pub creativity: f64,
}

/// Input to a single improvement call.
#[derive(Debug, Clone)]
pub struct ImproveRequest {
    pub original_prompt: String,
    pub category: Category,
    pub tone: Tone,
    pub platform: Platform,
    pub length: OutputLength,
}

/// Structured result decoded from the provider's JSON reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedPrompt {
    pub improved_prompt: String,
    pub scores: Scores,
    pub explanation: String,
}

/// Failure modes of one improvement call. `Configuration` is raised before
/// any network activity; the other variants come out of the single request.
/// Nothing is retried.
#[derive(Debug, Error)]
pub enum ImproveError {
    #[error("API Configuration Error: {0}")]
    Configuration(String),
    #[error("AI engine request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Empty response from AI engine.")]
    EmptyResponse,
    #[error("AI engine returned an unexpected reply: {0}")]
    Reply(#[from] serde_json::Error),
}

/// Seam between the app and the external text-generation service. The
/// production implementation is [`GeminiClient`]; tests substitute doubles.
#[async_trait]
pub trait PromptImprover: Send + Sync {
    async fn improve(&self, request: &ImproveRequest) -> Result<ImprovedPrompt, ImproveError>;
}
