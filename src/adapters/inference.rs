//! Hugging Face inference client
//!
//! Hosted pipelines for sentiment, emotion, zero-shot classification,
//! translation, NER and sentence similarity. The API key is optional.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{AdapterError, Entity, LabelScore, TextInference, ZeroShotResult};

pub const SENTIMENT_MODEL: &str = "nlptown/bert-base-multilingual-uncased-sentiment";
pub const EMOTION_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";
pub const ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
pub const NER_MODEL: &str = "dslim/bert-base-NER";
pub const SIMILARITY_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Target language code → opus-mt model. Unknown codes use Spanish.
pub fn translation_model(target_lang: &str) -> &'static str {
    match target_lang {
        "fr" => "Helsinki-NLP/opus-mt-en-fr",
        "de" => "Helsinki-NLP/opus-mt-en-de",
        "ja" => "Helsinki-NLP/opus-mt-en-jap",
        "zh" => "Helsinki-NLP/opus-mt-en-zh",
        "ar" => "Helsinki-NLP/opus-mt-en-ar",
        "hi" => "Helsinki-NLP/opus-mt-en-hi",
        "pt" => "Helsinki-NLP/opus-mt-en-pt",
        "ru" => "Helsinki-NLP/opus-mt-en-ru",
        "ko" => "Helsinki-NLP/opus-mt-en-ko",
        _ => "Helsinki-NLP/opus-mt-en-es",
    }
}

// ============================================================================
// Fallback values
// ============================================================================

pub fn neutral_sentiment() -> Vec<LabelScore> {
    vec![LabelScore::new("neutral", 0.5)]
}

pub fn default_emotions() -> Vec<LabelScore> {
    vec![
        LabelScore::new("neutral", 0.4),
        LabelScore::new("joy", 0.3),
        LabelScore::new("sadness", 0.3),
    ]
}

pub fn default_similarity(sentences: usize) -> Vec<f64> {
    vec![0.5; sentences]
}

// ============================================================================
// Client
// ============================================================================

pub struct HuggingFaceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

impl HuggingFaceClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn post_json<T: DeserializeOwned>(&self, model: &str, body: &Value) -> Result<T, AdapterError> {
        let url = format!("{}/{}", self.base_url, model);
        debug!(model, "inference request");

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(AdapterError::Status(resp.status().as_u16()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| AdapterError::Malformed(e.without_url().to_string()))
    }

    /// Classification pipelines answer `[[{label, score}, ...]]`
    async fn classify(&self, model: &str, text: &str) -> Result<Vec<LabelScore>, AdapterError> {
        let nested: Vec<Vec<LabelScore>> = self.post_json(model, &json!({ "inputs": text })).await?;
        let mut scores = nested
            .into_iter()
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AdapterError::Malformed("no labels".into()))?;
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scores)
    }
}

fn absorb<T>(call: &str, result: Result<T, AdapterError>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(call, error = %e, "inference call failed, using fallback");
            fallback()
        }
    }
}

#[async_trait]
impl TextInference for HuggingFaceClient {
    async fn sentiment(&self, text: &str) -> Vec<LabelScore> {
        absorb("sentiment", self.classify(SENTIMENT_MODEL, text).await, neutral_sentiment)
    }

    async fn emotion(&self, text: &str) -> Vec<LabelScore> {
        absorb("emotion", self.classify(EMOTION_MODEL, text).await, default_emotions)
    }

    async fn zero_shot(&self, text: &str, labels: &[&str]) -> ZeroShotResult {
        let body = json!({
            "inputs": text,
            "parameters": { "candidate_labels": labels },
        });
        let result = self
            .post_json::<ZeroShotResult>(ZERO_SHOT_MODEL, &body)
            .await
            .and_then(|r| {
                if r.labels.is_empty() || r.labels.len() != r.scores.len() {
                    Err(AdapterError::Malformed("label/score mismatch".into()))
                } else {
                    Ok(r)
                }
            });
        absorb("zero_shot", result, || ZeroShotResult::uniform(labels))
    }

    async fn translate(&self, text: &str, target_lang: &str) -> String {
        let result = self
            .post_json::<Vec<TranslationOutput>>(translation_model(target_lang), &json!({ "inputs": text }))
            .await
            .and_then(|out| {
                out.into_iter()
                    .next()
                    .map(|t| t.translation_text)
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| AdapterError::Malformed("no translation".into()))
            });
        absorb("translate", result, || text.to_string())
    }

    async fn entities(&self, text: &str) -> Vec<Entity> {
        absorb(
            "entities",
            self.post_json(NER_MODEL, &json!({ "inputs": text })).await,
            Vec::new,
        )
    }

    async fn similarity(&self, source: &str, sentences: &[&str]) -> Vec<f64> {
        let body = json!({
            "inputs": { "source_sentence": source, "sentences": sentences },
        });
        let result = self
            .post_json::<Vec<f64>>(SIMILARITY_MODEL, &body)
            .await
            .and_then(|scores| {
                if scores.len() == sentences.len() {
                    Ok(scores)
                } else {
                    Err(AdapterError::Malformed("score count mismatch".into()))
                }
            });
        absorb("similarity", result, || default_similarity(sentences.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_model_map() {
        assert_eq!(translation_model("ja"), "Helsinki-NLP/opus-mt-en-jap");
        assert_eq!(translation_model("ko"), "Helsinki-NLP/opus-mt-en-ko");
        assert_eq!(translation_model("xx"), "Helsinki-NLP/opus-mt-en-es");
    }

    #[test]
    fn test_entity_accepts_grouped_output() {
        let grouped: Vec<Entity> = serde_json::from_str(
            r#"[{"entity_group": "LOC", "score": 0.99, "word": "Kyoto", "start": 0, "end": 5}]"#,
        )
        .unwrap();
        assert_eq!(grouped[0].entity, "LOC");

        let tagged: Vec<Entity> =
            serde_json::from_str(r#"[{"entity": "B-PER", "score": 0.9, "word": "Ada", "index": 1}]"#).unwrap();
        assert_eq!(tagged[0].entity, "B-PER");
    }

    #[test]
    fn test_fallback_values() {
        assert_eq!(neutral_sentiment()[0].label, "neutral");
        let emotions = default_emotions();
        assert_eq!(emotions.len(), 3);
        let total: f64 = emotions.iter().map(|e| e.score).sum();
        approx::assert_relative_eq!(total, 1.0);
        assert_eq!(default_similarity(4), vec![0.5; 4]);
    }

    #[tokio::test]
    async fn test_unreachable_host_uses_fallbacks() {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        let client = HuggingFaceClient::new(http, "http://127.0.0.1:1", None);
        assert_eq!(client.translate("Hello", "es").await, "Hello");
        let zs = client.zero_shot("text", &["a", "b"]).await;
        assert_eq!(zs.labels, vec!["a", "b"]);
        assert_eq!(zs.scores, vec![0.5, 0.5]);
        assert!(client.entities("text").await.is_empty());
        assert_eq!(client.similarity("x", &["a", "b", "c"]).await, vec![0.5; 3]);
    }
}
