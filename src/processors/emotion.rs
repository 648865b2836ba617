//! Feature 3: Emotion & Environment Resonance Scanner

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::charts::{ChartData, Dataset, Palette};
use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::{generate_json, AirQualitySnapshot, LabelScore, WeatherSnapshot};
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::RegionalRecord;

const WELLBEING_SCHEMA: &str = r#"{"recommendations": ["suggestion1", "suggestion2", "suggestion3"]}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub factor: &'static str,
    pub correlation: f64,
    pub impact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerEvent {
    pub time: &'static str,
    pub event: String,
    pub impact: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionReport {
    pub emotion_trajectory: ChartData,
    pub resilience_score: u32,
    pub sentiment_index: u32,
    pub calming_audio_url: &'static str,
    pub recommendations: Vec<String>,
    pub trigger_events: Vec<TriggerEvent>,
    pub dominant_emotions: Vec<String>,
    pub emotion_breakdown: BTreeMap<String, f64>,
    pub weather_impact: Option<WeatherSnapshot>,
    pub air_quality_impact: Option<AirQualitySnapshot>,
    pub correlations: Vec<Correlation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionBaseline {
    pub resilience_score: u32,
    pub sentiment_index: u32,
    pub recommendations: Vec<&'static str>,
    pub dominant_emotions: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GeneratedWellbeing {
    #[serde(default)]
    recommendations: Vec<String>,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::EmotionScanner, form).await;
    let outcome = analyze(ctx, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<EmotionReport>) -> FeatureResult {
    prep.finish(outcome, baseline)
}

async fn analyze(ctx: &FeatureContext, prep: &Prepared) -> anyhow::Result<EmotionReport> {
    let region = prep.region;
    let location = prep.location.as_str();

    let emotions = ctx.inference.emotion(prep.text_or("feeling neutral today")).await;
    let sentiment = ctx.inference.sentiment(prep.text_or("neutral day")).await;

    let weather = ctx.weather.current_weather(location).await;
    let air_quality = match ctx.weather.geocode(location).await {
        Some(coords) => ctx.weather.air_quality(coords).await,
        None => None,
    };

    let emotion_breakdown: BTreeMap<String, f64> = emotions
        .iter()
        .map(|e| (e.label.clone(), e.score))
        .collect();

    let sentiment_score = sentiment
        .first()
        .map(|s| s.score)
        .filter(|s| *s > 0.0)
        .unwrap_or(0.5);
    let sentiment_index = (sentiment_score * 100.0).round() as u32;

    let dominant = emotions.first().map(|e| e.label.as_str()).unwrap_or("neutral");
    let r = ctx.scorer.as_ref();
    let stress = [
        r.uniform(3.0, 7.0),
        r.uniform(4.0, 8.0),
        r.uniform(3.0, 6.0),
        r.uniform(2.0, 5.0),
    ];

    let prompt = format!(
        "Suggest wellbeing actions for someone in {}, {} whose dominant emotion is {}.\nSentiment index: {}/100\nWeather: {}\nAir quality index: {}\nGreen space: {}%",
        region.region,
        region.country,
        dominant,
        sentiment_index,
        weather
            .as_ref()
            .map(|w| w.description.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or(region.climate),
        air_quality
            .as_ref()
            .map(|a| a.aqi)
            .unwrap_or(region.air_quality_index),
        region.urban.green_space_percent
    );
    let recommendations =
        match generate_json::<GeneratedWellbeing>(ctx.generator.as_ref(), &prompt, Some(WELLBEING_SCHEMA))
            .await
        {
            Ok(generated) if !generated.recommendations.is_empty() => generated.recommendations,
            Ok(_) => recommendations(region, dominant, weather.as_ref(), air_quality.as_ref()),
            Err(e) => {
                debug!(error = %e, "wellbeing generation unavailable, using template");
                recommendations(region, dominant, weather.as_ref(), air_quality.as_ref())
            }
        };

    Ok(EmotionReport {
        emotion_trajectory: ChartData::single(
            &["Morning", "Afternoon", "Evening", "Night"],
            Dataset::filled(
                "Stress Level",
                stress.iter().map(|v| v.round()).collect(),
                Palette::Red,
            ),
        ),
        resilience_score: resilience(&emotion_breakdown),
        sentiment_index,
        calming_audio_url: "/placeholders/calming-audio.wav",
        recommendations,
        trigger_events: vec![TriggerEvent {
            time: "14:30",
            event: format!(
                "{} may affect mood",
                weather
                    .as_ref()
                    .map(|w| w.description.as_str())
                    .filter(|d| !d.is_empty())
                    .unwrap_or("Weather pattern")
            ),
            impact: "awareness",
        }],
        dominant_emotions: dominant_emotions(&emotions),
        correlations: correlations(region, weather.as_ref(), air_quality.as_ref()),
        emotion_breakdown,
        weather_impact: weather,
        air_quality_impact: air_quality,
    })
}

/// Weighted 40 joy, 30 neutral (0.5 when absent or zero), 15 each for low anger and low sadness
pub fn resilience(breakdown: &BTreeMap<String, f64>) -> u32 {
    let score = |label: &str| breakdown.get(label).copied();
    let value = score("joy").unwrap_or(0.0) * 40.0
        + score("neutral").filter(|v| *v != 0.0).unwrap_or(0.5) * 30.0
        + (1.0 - score("anger").unwrap_or(0.0)) * 15.0
        + (1.0 - score("sadness").unwrap_or(0.0)) * 15.0;
    value.round() as u32
}

fn dominant_emotions(emotions: &[LabelScore]) -> Vec<String> {
    emotions.iter().take(3).map(|e| e.label.clone()).collect()
}

pub fn correlations(
    region: &RegionalRecord,
    weather: Option<&WeatherSnapshot>,
    air_quality: Option<&AirQualitySnapshot>,
) -> Vec<Correlation> {
    let warm = weather.is_some_and(|w| w.temperature > 25.0);
    let clear = weather.is_some_and(|w| w.description.contains("clear"));
    let clean_air = air_quality.is_some_and(|a| a.aqi <= 2);
    let noisy = region.urban.noise_level > 70;

    vec![
        Correlation {
            factor: "Weather",
            correlation: if warm { 0.7 } else { 0.5 },
            impact: if clear { "Positive" } else { "Moderate" },
        },
        Correlation {
            factor: "Air Quality",
            correlation: if clean_air { 0.8 } else { 0.4 },
            impact: if clean_air { "Positive" } else { "Negative" },
        },
        Correlation {
            factor: "Natural Light",
            correlation: 0.75,
            impact: "High",
        },
        Correlation {
            factor: "Noise Level",
            correlation: if noisy { -0.6 } else { 0.3 },
            impact: if noisy { "Negative" } else { "Neutral" },
        },
    ]
}

fn recommendations(
    region: &RegionalRecord,
    dominant: &str,
    weather: Option<&WeatherSnapshot>,
    air_quality: Option<&AirQualitySnapshot>,
) -> Vec<String> {
    let green = region.urban.green_space_percent;
    vec![
        format!(
            "Based on your {} mood, consider {}",
            dominant,
            if dominant == "joy" {
                "sharing positivity"
            } else {
                "outdoor activities"
            }
        ),
        if green > 20 {
            format!(
                "Visit nearby green spaces ({}% coverage in {})",
                green, region.region
            )
        } else {
            "Find indoor plants for air purification".to_string()
        },
        if weather.is_some_and(|w| w.temperature > 20.0) {
            "Take advantage of good weather for outdoor walks"
        } else {
            "Consider light therapy during indoor time"
        }
        .to_string(),
        if air_quality.is_some_and(|a| a.aqi > 2) {
            "Use air purifier indoors due to current air quality"
        } else {
            "Open windows for fresh air circulation"
        }
        .to_string(),
    ]
}

fn baseline() -> EmotionBaseline {
    EmotionBaseline {
        resilience_score: 65,
        sentiment_index: 50,
        recommendations: vec!["Practice mindfulness", "Connect with nature"],
        dominant_emotions: vec!["neutral"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::regions::RegionResolver;

    #[test]
    fn test_resilience_all_joy() {
        let breakdown = BTreeMap::from([("joy".to_string(), 1.0), ("neutral".to_string(), 0.0)]);
        // A zero neutral score counts as missing: 40 + 15 + 15 + 15
        assert_eq!(resilience(&breakdown), 85);
    }

    #[test]
    fn test_resilience_missing_neutral_counts_half() {
        let breakdown = BTreeMap::from([("anger".to_string(), 1.0)]);
        // 0 + 15 + 0 + 15
        assert_eq!(resilience(&breakdown), 30);
    }

    #[test]
    fn test_correlations_without_live_data() {
        let mumbai = RegionResolver::builtin().resolve("Mumbai");
        let rows = correlations(mumbai, None, None);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].correlation, 0.5);
        assert_eq!(rows[1].impact, "Negative");
        assert_eq!(rows[3].correlation, -0.6);
    }

    #[test]
    fn test_green_space_recommendation() {
        let singapore = RegionResolver::builtin().resolve("Singapore");
        let recs = recommendations(singapore, "joy", None, None);
        assert_eq!(recs[0], "Based on your joy mood, consider sharing positivity");
        assert_eq!(recs[1], "Visit nearby green spaces (47% coverage in Singapore)");
        assert_eq!(recs[3], "Open windows for fresh air circulation");
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Anxious about the heat");
        let prep = prepared(&ctx, FeatureId::EmotionScanner, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(result.get("resilienceScore"), Some(&json!(65)));
        assert_eq!(result.get("dominantEmotions"), Some(&json!(["neutral"])));
        assert!(result.get("emotionBreakdown").is_none());
    }
}
