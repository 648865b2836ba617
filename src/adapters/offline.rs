//! Adapters that always take the fallback path. Used for `OFFLINE_MODE`
//! and by tests.

use async_trait::async_trait;

use super::inference::{default_emotions, default_similarity, neutral_sentiment};
use super::{
    AirQualitySnapshot, Coordinates, Entity, ForecastDay, GenerationError, Generator, LabelScore,
    TextInference, WeatherProvider, WeatherSnapshot, ZeroShotResult,
};
use crate::form::UploadedFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineWeather;

#[async_trait]
impl WeatherProvider for OfflineWeather {
    async fn current_weather(&self, _location: &str) -> Option<WeatherSnapshot> {
        None
    }

    async fn geocode(&self, _location: &str) -> Option<Coordinates> {
        None
    }

    async fn air_quality(&self, _coords: Coordinates) -> Option<AirQualitySnapshot> {
        None
    }

    async fn forecast(&self, _location: &str) -> Vec<ForecastDay> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineInference;

#[async_trait]
impl TextInference for OfflineInference {
    async fn sentiment(&self, _text: &str) -> Vec<LabelScore> {
        neutral_sentiment()
    }

    async fn emotion(&self, _text: &str) -> Vec<LabelScore> {
        default_emotions()
    }

    async fn zero_shot(&self, _text: &str, labels: &[&str]) -> ZeroShotResult {
        ZeroShotResult::uniform(labels)
    }

    async fn translate(&self, text: &str, _target_lang: &str) -> String {
        text.to_string()
    }

    async fn entities(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }

    async fn similarity(&self, _source: &str, sentences: &[&str]) -> Vec<f64> {
        default_similarity(sentences.len())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl Generator for OfflineGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Offline)
    }

    async fn describe_image(
        &self,
        _image: &UploadedFile,
        _prompt: &str,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Offline)
    }
}
