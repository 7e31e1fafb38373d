use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::GeminiConfig;

use super::{ImproveError, ImprovedPrompt, ImproveRequest, PromptImprover};

/// Value shipped in `.env.example`; an unedited key counts as missing.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY";

/// Client for the Gemini `generateContent` REST endpoint.
///
/// Each improvement is exactly one request, with no retry and no timeout.
/// A hung call blocks its caller.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Checked before anything touches the network.
    fn api_key(&self) -> Result<&str, ImproveError> {
        let key = self.config.api_key.trim();
        if key.is_empty() || key == API_KEY_PLACEHOLDER {
            return Err(ImproveError::Configuration(
                "the GEMINI_API_KEY environment variable is not set".into(),
            ));
        }
        Ok(key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn system_instruction(request: &ImproveRequest) -> String {
    format!(
        "You are an elite AI Prompt Engineer. Your task is to transform the user's basic input into a high-performance, structured prompt.\n\
         \n\
         Optimization Parameters:\n\
         - Domain: {category}\n\
         - Tone: {tone}\n\
         - Target Platform: {platform}\n\
         - Desired Depth: {length}\n\
         \n\
         The output must be a valid JSON object containing:\n\
         1. 'improvedPrompt': The full, rewritten prompt with clear instructions, context, and formatting.\n\
         2. 'scores': Clarity, Detail, and Creativity ratings (1-10).\n\
         3. 'explanation': A brief summary of why these changes improve the AI's response quality.",
        category = request.category,
        tone = request.tone,
        platform = request.platform,
        length = request.length,
    )
}

/// Schema the provider is told to follow. Field presence is enforced on the
/// provider side; score ranges and non-emptiness are not re-validated here.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "improvedPrompt": { "type": "STRING" },
            "scores": {
                "type": "OBJECT",
                "properties": {
                    "clarity": { "type": "NUMBER" },
                    "detail": { "type": "NUMBER" },
                    "creativity": { "type": "NUMBER" }
                },
                "required": ["clarity", "detail", "creativity"]
            },
            "explanation": { "type": "STRING" }
        },
        "required": ["improvedPrompt", "scores", "explanation"]
    })
}

// Minimal slice of the generateContent response envelope.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the first candidate's text out of the envelope and decode it as the
/// agreed JSON shape. No text at all, or only whitespace, is the
/// empty-response case.
fn decode_reply(reply: GenerateContentResponse) -> Result<ImprovedPrompt, ImproveError> {
    let text: String = match reply.candidates.into_iter().next().and_then(|c| c.content) {
        Some(content) => content.parts.into_iter().filter_map(|p| p.text).collect(),
        None => return Err(ImproveError::EmptyResponse),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ImproveError::EmptyResponse);
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[async_trait]
impl PromptImprover for GeminiClient {
    async fn improve(&self, request: &ImproveRequest) -> Result<ImprovedPrompt, ImproveError> {
        let api_key = self.api_key()?;

        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_instruction(request) }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("Improve this prompt: \"{}\"", request.original_prompt) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: GenerateContentResponse = response.json().await?;
        decode_reply(reply)
    }
}
