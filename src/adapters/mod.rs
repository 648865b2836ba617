//! External Data Adapters
//!
//! Thin wrappers around the weather, text-inference and generative REST
//! APIs. Weather and inference calls never fail from the caller's point of
//! view: any transport error, non-2xx status or malformed body is logged and
//! replaced with a fallback value. Generation is the one capability that
//! reports failure, and every caller guards it.
//!
//! One attempt per call, no retries.

pub mod generative;
pub mod inference;
pub mod latency;
pub mod offline;
pub mod scorer;
pub mod weather;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::UploadedFile;

pub use generative::{generate_json, strip_markdown_fences, GeminiClient, GenerationError};
pub use inference::HuggingFaceClient;
pub use latency::LatencySimulator;
pub use offline::{OfflineGenerator, OfflineInference, OfflineWeather};
pub use scorer::{FixedScorer, RandomScorer, Scorer};
pub use weather::{DisasterRisk, OpenWeatherClient};

/// Why an upstream call was discarded
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Query strings can carry API keys, so the URL never reaches an error message
impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        AdapterError::Transport(e.without_url())
    }
}

// ============================================================================
// Weather / air quality
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    /// m/s
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    pub city: String,
    pub country: String,
    pub feels_like: f64,
    /// km
    pub visibility: f64,
    /// %
    pub clouds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Pollutant concentrations (μg/m³). Fallback snapshots only carry a subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutantComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub so2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm2_5: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nh3: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualitySnapshot {
    /// 1 - 5
    pub aqi: u32,
    pub components: PollutantComponents,
    pub quality_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// YYYY-MM-DD
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
    pub description: String,
    /// Probability of precipitation, %
    pub precipitation: f64,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// City name or `lat,lon`
    async fn current_weather(&self, location: &str) -> Option<WeatherSnapshot>;

    async fn geocode(&self, location: &str) -> Option<Coordinates>;

    async fn air_quality(&self, coords: Coordinates) -> Option<AirQualitySnapshot>;

    /// One entry per day, empty on failure
    async fn forecast(&self, location: &str) -> Vec<ForecastDay>;
}

// ============================================================================
// Text inference
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Candidate labels ordered by descending score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroShotResult {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl ZeroShotResult {
    /// Uniform `1/n` over the candidates, in the given order
    pub fn uniform(labels: &[&str]) -> Self {
        let n = labels.len().max(1) as f64;
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            scores: labels.iter().map(|_| 1.0 / n).collect(),
        }
    }

    pub fn top_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub word: String,
    /// Tag such as `B-LOC` or `PER`
    #[serde(alias = "entity_group")]
    pub entity: String,
    pub score: f64,
}

#[async_trait]
pub trait TextInference: Send + Sync {
    /// Sentiment labels, best first. Fallback: `[neutral 0.5]`
    async fn sentiment(&self, text: &str) -> Vec<LabelScore>;

    /// Emotion labels, best first. Fallback: `[neutral 0.4, joy 0.3, sadness 0.3]`
    async fn emotion(&self, text: &str) -> Vec<LabelScore>;

    /// Fallback: uniform scores over `labels`
    async fn zero_shot(&self, text: &str, labels: &[&str]) -> ZeroShotResult;

    /// Fallback: the input, unchanged
    async fn translate(&self, text: &str, target_lang: &str) -> String;

    /// Fallback: empty
    async fn entities(&self, text: &str) -> Vec<Entity>;

    /// One score per sentence. Fallback: 0.5 each
    async fn similarity(&self, source: &str, sentences: &[&str]) -> Vec<f64>;
}

// ============================================================================
// Generation
// ============================================================================

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Describe an uploaded image with the vision model
    async fn describe_image(
        &self,
        image: &UploadedFile,
        prompt: &str,
    ) -> Result<String, GenerationError>;
}
