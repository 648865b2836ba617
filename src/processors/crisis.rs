//! Feature 1: Crisis Predictor
//!
//! Live weather (or the regional stand-in) drives a hazard estimate; the
//! zero-shot classifier picks the crisis theme from the submitted text; the
//! generative model writes the alert, with a templated alert when it can't.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{image_insights, FeatureContext, FeatureResult, Prepared};
use crate::adapters::{
    generate_json, AirQualitySnapshot, DisasterRisk, ForecastDay, WeatherSnapshot,
};
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::risk::capitalize;
use crate::regions::{regional_risk, RegionalRecord, RegionalRisk};

const CRISIS_TYPES: &[&str] = &[
    "flood",
    "earthquake",
    "hurricane",
    "wildfire",
    "drought",
    "heatwave",
    "normal conditions",
];

const ALERT_SCHEMA: &str =
    r#"{"alertMessage": "status message", "recommendedActions": ["action1", "action2", "action3"], "affectedPopulation": number}"#;

const IMAGE_PROMPT: &str = "Analyze this satellite or drone image for signs of environmental hazards such as flooding, fire, storm damage or drought. Summarize the visible risks in two or three sentences.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRow {
    pub resource: &'static str,
    pub priority: &'static str,
    pub quantity: u64,
    pub location: String,
    pub eta: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisReport {
    pub risk_heatmap_url: &'static str,
    pub alert_message: String,
    pub resource_table: Vec<ResourceRow>,
    pub confidence_score: u32,
    pub affected_population: u64,
    pub recommended_actions: Vec<String>,
    pub weather_data: WeatherSnapshot,
    pub air_quality_data: AirQualitySnapshot,
    pub forecast_data: Vec<ForecastDay>,
    pub risk_analysis: DisasterRisk,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_insights: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisBaseline {
    pub alert_message: String,
    pub resource_table: Vec<ResourceRow>,
    pub confidence_score: u32,
    pub affected_population: u64,
    pub recommended_actions: Vec<String>,
    pub risk_analysis: DisasterRisk,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedAlert {
    alert_message: String,
    recommended_actions: Vec<String>,
    #[serde(default)]
    affected_population: Option<f64>,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::CrisisPredictor, form).await;
    let outcome = analyze(ctx, form, &prep).await;
    conclude(&prep, outcome)
}

/// Report on success, the fallback payload otherwise
fn conclude(prep: &Prepared, outcome: anyhow::Result<CrisisReport>) -> FeatureResult {
    prep.finish(outcome, || baseline(prep.region))
}

async fn analyze(
    ctx: &FeatureContext,
    form: &FormSubmission,
    prep: &Prepared,
) -> anyhow::Result<CrisisReport> {
    let region = prep.region;
    let location = prep.location.as_str();

    let weather = ctx
        .weather
        .current_weather(location)
        .await
        .unwrap_or_else(|| WeatherSnapshot::from_region(region));
    let air_quality = match ctx.weather.geocode(location).await {
        Some(coords) => ctx.weather.air_quality(coords).await,
        None => None,
    }
    .unwrap_or_else(|| AirQualitySnapshot::from_region(region));
    let forecast = ctx.weather.forecast(location).await;

    let regional = regional_risk(region);
    let risk = DisasterRisk::from_weather(&weather);

    let classification = ctx
        .inference
        .zero_shot(prep.text_or(location), CRISIS_TYPES)
        .await;
    let primary_crisis = classification.top_label().unwrap_or("monitoring");

    let prompt = format!(
        "Analyze crisis risk for {} ({}):\nWeather: {}\nRisk Factors: {}\nPrimary Concern: {}",
        location,
        region.country,
        serde_json::to_string(&weather)?,
        serde_json::to_string(&region.risk_factors)?,
        primary_crisis
    );

    let population = region.urban.population;
    let (alert_message, recommended_actions, affected_population) =
        match generate_json::<GeneratedAlert>(ctx.generator.as_ref(), &prompt, Some(ALERT_SCHEMA))
            .await
        {
            Ok(generated) => (
                generated.alert_message,
                generated.recommended_actions,
                generated
                    .affected_population
                    .filter(|p| *p > 0.0)
                    .map(|p| p.round() as u64)
                    .unwrap_or(population),
            ),
            Err(e) => {
                debug!(error = %e, "crisis alert generation unavailable, using template");
                (
                    fallback_alert(region, &regional, &weather, primary_crisis),
                    fallback_actions(region, &regional, population),
                    population,
                )
            }
        };

    let image_insights = image_insights(ctx, form, prep.spec, IMAGE_PROMPT).await;

    Ok(CrisisReport {
        risk_heatmap_url: "/placeholders/heatmap.png",
        alert_message,
        resource_table: resource_table(region, affected_population),
        confidence_score: risk.overall_risk,
        affected_population,
        recommended_actions,
        weather_data: weather,
        air_quality_data: air_quality,
        forecast_data: forecast,
        risk_analysis: risk,
        image_insights,
    })
}

fn fallback_alert(
    region: &RegionalRecord,
    regional: &RegionalRisk,
    weather: &WeatherSnapshot,
    primary_crisis: &str,
) -> String {
    if primary_crisis == "normal conditions" {
        let conditions = if weather.description.is_empty() {
            region.climate
        } else {
            weather.description.as_str()
        };
        format!(
            "Environmental monitoring active for {}, {}. Current conditions: {}. No immediate threats detected.",
            region.region, region.country, conditions
        )
    } else {
        format!(
            "{} risk detected for {}. Risk level: {}. Monitor conditions closely.",
            capitalize(primary_crisis),
            region.region,
            regional.risk_level
        )
    }
}

fn fallback_actions(region: &RegionalRecord, regional: &RegionalRisk, population: u64) -> Vec<String> {
    let top_risk = regional.primary_risks.first().map(String::as_str).unwrap_or("Environmental");
    vec![
        format!("Monitor {} conditions in {}", top_risk, region.region),
        format!(
            "Prepare emergency supplies for {} potential evacuees",
            (population as f64 * 0.1).round() as u64
        ),
        "Review evacuation routes and shelter locations".to_string(),
        "Stay informed via local emergency broadcasts".to_string(),
    ]
}

/// Quantities scale with the affected population
pub fn resource_table(region: &RegionalRecord, population: u64) -> Vec<ResourceRow> {
    let share = |factor: f64| (population as f64 * factor).floor() as u64;
    vec![
        ResourceRow {
            resource: "Water supplies",
            priority: "High",
            quantity: share(0.05),
            location: format!("{} Emergency Center", region.region),
            eta: "1 hour",
        },
        ResourceRow {
            resource: "Medical kits",
            priority: "High",
            quantity: share(0.002),
            location: format!("{} Hospital", region.region),
            eta: "30 min",
        },
        ResourceRow {
            resource: "Emergency blankets",
            priority: "Medium",
            quantity: share(0.01),
            location: format!("{} Relief Center", region.region),
            eta: "2 hours",
        },
        ResourceRow {
            resource: "Food rations",
            priority: "Medium",
            quantity: share(0.03),
            location: "Central Warehouse".to_string(),
            eta: "3 hours",
        },
        ResourceRow {
            resource: "Communication radios",
            priority: "Medium",
            quantity: 500,
            location: "Emergency HQ".to_string(),
            eta: "1 hour",
        },
    ]
}

/// Hazard estimate straight from the regional risk factors
pub fn regional_disaster_risk(region: &RegionalRecord) -> DisasterRisk {
    let regional = regional_risk(region);
    DisasterRisk {
        flood_risk: region.risk_factors.flood,
        storm_risk: region.risk_factors.hurricane,
        heatwave_risk: region.risk_factors.heatwave,
        overall_risk: regional.overall_risk,
        risk_level: regional.risk_level,
    }
}

pub fn baseline(region: &RegionalRecord) -> CrisisBaseline {
    let regional = regional_risk(region);
    CrisisBaseline {
        alert_message: format!(
            "Environmental monitoring active for {}. Using regional baseline data.",
            region.region
        ),
        resource_table: vec![ResourceRow {
            resource: "Emergency supplies",
            priority: "Medium",
            quantity: 1000,
            location: "Central".to_string(),
            eta: "2 hours",
        }],
        confidence_score: regional.overall_risk,
        affected_population: region.urban.population,
        recommended_actions: vec![format!(
            "Monitor {} conditions",
            regional.primary_risks.join(", ")
        )],
        risk_analysis: regional_disaster_risk(region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::regions::RegionResolver;

    #[test]
    fn test_resource_table_scales_with_population() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let table = resource_table(tokyo, 1_000_000);
        assert_eq!(table.len(), 5);
        assert_eq!(table[0].quantity, 50_000);
        assert_eq!(table[1].quantity, 2_000);
        assert_eq!(table[1].location, "Tokyo Hospital");
        assert_eq!(table[4].quantity, 500);
    }

    #[test]
    fn test_fallback_alert_wording() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let regional = regional_risk(tokyo);
        let weather = WeatherSnapshot::from_region(tokyo);

        let alert = fallback_alert(tokyo, &regional, &weather, "earthquake");
        assert_eq!(
            alert,
            "Earthquake risk detected for Tokyo. Risk level: Moderate. Monitor conditions closely."
        );

        let calm = fallback_alert(tokyo, &regional, &weather, "normal conditions");
        assert!(calm.starts_with("Environmental monitoring active for Tokyo, Japan."));
        assert!(calm.ends_with("No immediate threats detected."));
    }

    #[test]
    fn test_baseline_uses_regional_factors() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let base = baseline(tokyo);
        assert_eq!(base.confidence_score, 45);
        assert_eq!(base.risk_analysis.storm_risk, tokyo.risk_factors.hurricane);
        assert_eq!(
            base.recommended_actions,
            vec!["Monitor Earthquake, Hurricane, Flood conditions"]
        );
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Cairo, Egypt");
        let prep = prepared(&ctx, FeatureId::CrisisPredictor, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(prep.region.region, "Cairo");
        assert_eq!(
            result.get("alertMessage"),
            Some(&json!("Environmental monitoring active for Cairo. Using regional baseline data."))
        );
        assert_eq!(result.get("affectedPopulation"), Some(&json!(prep.region.urban.population)));
        assert_eq!(result.get("resourceTable").and_then(|v| v.as_array()).map(Vec::len), Some(1));
        assert!(result.get("weatherData").is_none());
    }
}
