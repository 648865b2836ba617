//! Gemini client and structured generation
//!
//! `generate_json` asks for a bare JSON object, strips any markdown fence the
//! model wraps around it, and deserializes into the caller's type. Failure at
//! any step is a `GenerationError`; callers substitute templated content.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use super::Generator;
use crate::form::UploadedFile;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no generative API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("generative API returned HTTP {0}")]
    Status(u16),

    #[error("response contained no text")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response JSON does not match the expected shape: {0}")]
    SchemaMismatch(String),

    #[error("generation disabled in offline mode")]
    Offline,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.without_url())
    }
}

/// Header carrying the Gemini key, kept out of the URL
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    vision_model: String,
}

impl GeminiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
            vision_model: vision_model.into(),
        }
    }

    async fn generate_content(&self, model: &str, parts: Value) -> Result<String, GenerationError> {
        let key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let body = json!({ "contents": [{ "parts": parts }] });
        debug!(model, "generateContent request");

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(GenerationError::Status(resp.status().as_u16()));
        }
        let json: Value = resp
            .json()
            .await
            .map_err(|e| GenerationError::InvalidJson(e.without_url().to_string()))?;
        candidate_text(&json)
    }
}

/// `candidates[0].content.parts[0].text`
fn candidate_text(response: &Value) -> Result<String, GenerationError> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .filter(|t| !t.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.generate_content(&self.model, json!([{ "text": prompt }])).await
    }

    async fn describe_image(
        &self,
        image: &UploadedFile,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let parts = json!([
            { "text": prompt },
            { "inline_data": { "mime_type": image.content_type, "data": image.base64 } },
        ]);
        self.generate_content(&self.vision_model, parts).await
    }
}

/// Remove a leading ```` ```json ```` or ```` ``` ```` fence and a trailing ```` ``` ````
pub fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Prompt suffix demanding bare JSON
pub fn json_prompt(prompt: &str, schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!(
            "{}\n\nRespond ONLY with valid JSON matching this schema:\n{}\n\nNo markdown, no explanation, just the JSON object.",
            prompt, schema
        ),
        None => format!(
            "{}\n\nRespond ONLY with valid JSON. No markdown, no explanation, just the JSON object.",
            prompt
        ),
    }
}

/// Parse model output into `T`
pub fn parse_generated<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let value: Value = serde_json::from_str(strip_markdown_fences(raw))
        .map_err(|e| GenerationError::InvalidJson(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| GenerationError::SchemaMismatch(e.to_string()))
}

/// Generate and deserialize structured output
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn Generator,
    prompt: &str,
    schema: Option<&str>,
) -> Result<T, GenerationError> {
    let raw = generator.generate_text(&json_prompt(prompt, schema)).await?;
    parse_generated(&raw)
}
