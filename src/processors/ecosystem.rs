//! Feature 2: Ecosystem Health Analyzer

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{image_insights, FeatureContext, FeatureResult, Prepared};
use crate::adapters::{generate_json, AirQualitySnapshot, PollutantComponents, WeatherSnapshot};
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::{species_data, RegionalRecord, SpeciesObservation};

const ECOSYSTEM_STATES: &[&str] = &["healthy", "recovering", "stressed", "degraded", "critical"];

const ACTIONS_SCHEMA: &str = r#"{"priorityActions": ["action1", "action2", "action3", "action4"]}"#;

const IMAGE_PROMPT: &str = "Describe the ecological condition visible in this image: vegetation cover, water bodies, signs of erosion, pollution or habitat loss. Keep it to two or three sentences.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    /// YYYY-MM-DD
    pub date: String,
    pub event: String,
    pub impact: &'static str,
    pub severity: u32,
}

/// Partial weather block used when live weather is unavailable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalClimate {
    pub temperature: f64,
    pub humidity: u32,
    pub description: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EcosystemWeather {
    Live(WeatherSnapshot),
    Regional(RegionalClimate),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemReport {
    pub resilience_score: u32,
    pub species_list: Vec<SpeciesObservation>,
    pub degradation_timeline: Vec<TimelineEvent>,
    pub priority_actions: Vec<String>,
    pub biodiversity_index: f64,
    pub vegetation_health: u32,
    pub water_quality: u32,
    pub weather_data: EcosystemWeather,
    pub air_quality_data: AirQualitySnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_insights: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemBaseline {
    pub resilience_score: u32,
    pub species_list: Vec<SpeciesObservation>,
    pub priority_actions: Vec<String>,
    pub biodiversity_index: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedActions {
    #[serde(default)]
    priority_actions: Vec<String>,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::EcosystemAnalyzer, form).await;
    let outcome = analyze(ctx, form, &prep).await;
    conclude(ctx, &prep, outcome)
}

fn conclude(
    ctx: &FeatureContext,
    prep: &Prepared,
    outcome: anyhow::Result<EcosystemReport>,
) -> FeatureResult {
    prep.finish(outcome, || baseline(ctx, prep.region))
}

async fn analyze(
    ctx: &FeatureContext,
    form: &FormSubmission,
    prep: &Prepared,
) -> anyhow::Result<EcosystemReport> {
    let region = prep.region;
    let eco = &region.ecosystem;
    let location = prep.location.as_str();

    let weather = ctx.weather.current_weather(location).await;
    let air_quality = match ctx.weather.geocode(location).await {
        Some(coords) => ctx.weather.air_quality(coords).await,
        None => None,
    };

    let scorer = ctx.scorer.as_ref();
    let species_list = species_data(region, scorer);
    let biodiversity_index = eco.biodiversity_index;
    let vegetation_health =
        (biodiversity_index * 100.0 * scorer.uniform(0.9, 1.1)).round() as u32;
    let water_quality = scorer.uniform(75.0, 95.0).round() as u32;

    let classification = ctx
        .inference
        .zero_shot(prep.text_or(eco.vegetation_type), ECOSYSTEM_STATES)
        .await;
    let health_status = classification.top_label().unwrap_or("moderate");

    let resilience_score = resilience(region, vegetation_health);
    let degradation_timeline =
        timeline(region, health_status, resilience_score, Utc::now().date_naive());

    let prompt = format!(
        "Recommend conservation priorities for the {} ecosystem around {}, {}.\nHealth status: {}\nResilience score: {}/100\nThreatened species: {}\nWater bodies: {}",
        eco.vegetation_type,
        region.region,
        region.country,
        health_status,
        resilience_score,
        eco.threatened_species.join(", "),
        eco.water_bodies.join(", ")
    );
    let priority_actions =
        match generate_json::<GeneratedActions>(ctx.generator.as_ref(), &prompt, Some(ACTIONS_SCHEMA))
            .await
        {
            Ok(generated) if !generated.priority_actions.is_empty() => generated.priority_actions,
            Ok(_) => priority_actions(region),
            Err(e) => {
                debug!(error = %e, "ecosystem action generation unavailable, using template");
                priority_actions(region)
            }
        };

    let image_insights = image_insights(ctx, form, prep.spec, IMAGE_PROMPT).await;

    Ok(EcosystemReport {
        resilience_score,
        species_list,
        degradation_timeline,
        priority_actions,
        biodiversity_index,
        vegetation_health,
        water_quality,
        weather_data: match weather {
            Some(live) => EcosystemWeather::Live(live),
            None => EcosystemWeather::Regional(RegionalClimate {
                temperature: region.avg_temperature.summer,
                humidity: region.avg_humidity,
                description: region.climate,
                city: region.region,
                country: region.country,
            }),
        },
        air_quality_data: air_quality.unwrap_or_else(|| regional_air_quality(region)),
        image_insights,
    })
}

/// Biodiversity, air quality and vegetation health, weighted 40 / 30 / 0.3
pub fn resilience(region: &RegionalRecord, vegetation_health: u32) -> u32 {
    let air = match region.air_quality_index {
        0..=2 => 30.0,
        3 => 20.0,
        _ => 10.0,
    };
    (region.ecosystem.biodiversity_index * 40.0 + air + vegetation_health as f64 * 0.3).round()
        as u32
}

pub fn timeline(
    region: &RegionalRecord,
    health_status: &str,
    resilience_score: u32,
    today: NaiveDate,
) -> Vec<TimelineEvent> {
    let day = |offset: i64| (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
    let drought = region.risk_factors.drought > 50;

    vec![
        TimelineEvent {
            date: day(365),
            event: format!("Baseline assessment for {}", region.ecosystem.vegetation_type),
            impact: "Neutral",
            severity: 5,
        },
        TimelineEvent {
            date: day(180),
            event: if drought {
                "Drought stress observed"
            } else {
                "Seasonal growth recorded"
            }
            .to_string(),
            impact: if drought { "Negative" } else { "Positive" },
            severity: if drought { 4 } else { 7 },
        },
        TimelineEvent {
            date: day(0),
            event: format!(
                "Current status: {} - {} dominant species active",
                health_status,
                region.ecosystem.dominant_species.len()
            ),
            impact: match resilience_score {
                r if r > 60 => "Positive",
                r if r > 40 => "Neutral",
                _ => "Negative",
            },
            severity: (resilience_score as f64 / 10.0).round() as u32,
        },
    ]
}

fn priority_actions(region: &RegionalRecord) -> Vec<String> {
    let eco = &region.ecosystem;
    vec![
        format!(
            "Monitor {} populations",
            eco.threatened_species.first().unwrap_or(&"endangered species")
        ),
        format!(
            "Protect {} from contamination",
            eco.water_bodies.first().unwrap_or(&"water sources")
        ),
        format!("Maintain wildlife corridors in {}", eco.vegetation_type),
        if region.risk_factors.wildfire > 50 {
            "Implement fire prevention measures"
        } else {
            "Continue habitat restoration efforts"
        }
        .to_string(),
    ]
}

/// Lighter pollutant scaling than the crisis stand-in
fn regional_air_quality(region: &RegionalRecord) -> AirQualitySnapshot {
    let aqi = region.air_quality_index;
    AirQualitySnapshot {
        aqi,
        components: PollutantComponents {
            pm2_5: Some(aqi as f64 * 8.0),
            pm10: Some(aqi as f64 * 12.0),
            o3: Some(35.0),
            no2: Some(15.0),
            ..Default::default()
        },
        quality_level: if aqi <= 2 { "Good" } else { "Moderate" }.to_string(),
    }
}

fn baseline(ctx: &FeatureContext, region: &RegionalRecord) -> EcosystemBaseline {
    EcosystemBaseline {
        resilience_score: (region.ecosystem.biodiversity_index * 100.0).round() as u32,
        species_list: species_data(region, ctx.scorer.as_ref()),
        priority_actions: vec![format!("Monitor ecosystem health in {}", region.region)],
        biodiversity_index: region.ecosystem.biodiversity_index,
    }
}
