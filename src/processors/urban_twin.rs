//! Feature 7: Urban Dynamics Digital Twin

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::charts::{ChartData, Dataset, Palette};
use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::{generate_json, AirQualitySnapshot, PollutantComponents, WeatherSnapshot};
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::{RegionalRecord, UrbanProfile};

const TRAFFIC_HOURS: [&str; 6] = ["6AM", "9AM", "12PM", "3PM", "6PM", "9PM"];
/// Share of peak congestion at each of `TRAFFIC_HOURS`
const TRAFFIC_SHAPE: [f64; 6] = [0.3, 1.0, 0.6, 0.7, 0.95, 0.4];

const SUMMARY_SCHEMA: &str = r#"{"policySummary": "short recommendation naming the best policy and why"}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyImpact {
    pub traffic: i32,
    pub air_quality: i32,
    pub noise: i32,
    pub satisfaction: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyScenario {
    pub name: &'static str,
    pub impact: PolicyImpact,
    pub cost: String,
    pub feasibility: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub traffic_flow: i64,
    pub public_transit_usage: u32,
    pub green_space_coverage: u32,
    pub population: u64,
    pub noise_level: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrbanReport {
    #[serde(rename = "city3DModel")]
    pub city_3d_model: &'static str,
    pub traffic_prediction: ChartData,
    pub air_quality_map: &'static str,
    pub noise_heatmap: &'static str,
    pub urban_stress_index: f64,
    pub citizen_satisfaction: u32,
    pub policy_scenarios: Vec<PolicyScenario>,
    pub policy_summary: String,
    pub weather_data: Option<WeatherSnapshot>,
    pub air_quality_data: AirQualitySnapshot,
    pub key_metrics: KeyMetrics,
    pub city_name: &'static str,
    pub country: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrbanBaseline {
    pub urban_stress_index: f64,
    pub citizen_satisfaction: u32,
    pub city_name: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedSummary {
    #[serde(default)]
    policy_summary: String,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::UrbanTwin, form).await;
    let outcome = analyze(ctx, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<UrbanReport>) -> FeatureResult {
    prep.finish(outcome, || baseline(prep.region))
}

async fn analyze(ctx: &FeatureContext, prep: &Prepared) -> anyhow::Result<UrbanReport> {
    let region = prep.region;
    let urban = &region.urban;
    let location = prep.location.as_str();

    let weather = ctx.weather.current_weather(location).await;
    let air_quality = match ctx.weather.geocode(location).await {
        Some(coords) => ctx.weather.air_quality(coords).await,
        None => None,
    };

    let traffic = TRAFFIC_SHAPE
        .iter()
        .map(|share| (urban.traffic_congestion as f64 * share).round())
        .collect();

    let scenarios = policy_scenarios(urban);
    let urban_stress_index = stress_index(urban);
    let prompt = format!(
        "Advise city planners in {}, {} (population {}).\nUrban stress index: {}/10\nTraffic congestion: {}/10\nPublic transit usage: {}%\nGreen space: {}%\nNoise: {} dB\nCandidate policies: {}",
        region.region,
        region.country,
        urban.population,
        urban_stress_index,
        urban.traffic_congestion,
        urban.public_transit,
        urban.green_space_percent,
        urban.noise_level,
        serde_json::to_string(&scenarios)?
    );
    let policy_summary =
        match generate_json::<GeneratedSummary>(ctx.generator.as_ref(), &prompt, Some(SUMMARY_SCHEMA))
            .await
        {
            Ok(generated) if !generated.policy_summary.trim().is_empty() => generated.policy_summary,
            Ok(_) => policy_summary(region, &scenarios),
            Err(e) => {
                debug!(error = %e, "policy summary generation unavailable, using template");
                policy_summary(region, &scenarios)
            }
        };

    Ok(UrbanReport {
        city_3d_model: "/placeholders/city-model.obj",
        traffic_prediction: ChartData::single(
            &TRAFFIC_HOURS,
            Dataset::filled("Traffic Congestion Level", traffic, Palette::Red),
        ),
        air_quality_map: "/placeholders/air-quality-heatmap.png",
        noise_heatmap: "/placeholders/noise-heatmap.png",
        urban_stress_index,
        citizen_satisfaction: urban.citizen_satisfaction,
        policy_scenarios: scenarios,
        policy_summary,
        weather_data: weather,
        air_quality_data: air_quality.unwrap_or_else(|| regional_air_quality(region)),
        key_metrics: KeyMetrics {
            traffic_flow: 100 - urban.traffic_congestion as i64 * 10,
            public_transit_usage: urban.public_transit,
            green_space_coverage: urban.green_space_percent,
            population: urban.population,
            noise_level: urban.noise_level,
        },
        city_name: region.region,
        country: region.country,
    })
}

/// Traffic, noise and dissatisfaction weighted 0.3 / 0.3 / 0.4, one decimal
pub fn stress_index(urban: &UrbanProfile) -> f64 {
    let raw = urban.traffic_congestion as f64 * 0.3
        + urban.noise_level as f64 / 10.0 * 0.3
        + (100.0 - urban.citizen_satisfaction as f64) / 10.0 * 0.4;
    raw.round() / 10.0
}

/// `$<n>M annually` for a per-capita yearly cost
fn annual_cost(population: u64, per_capita: f64) -> String {
    format!(
        "${}M annually",
        (population as f64 * per_capita / 1_000_000.0).round()
    )
}

/// First high-feasibility scenario, or the first one listed
pub fn policy_summary(region: &RegionalRecord, scenarios: &[PolicyScenario]) -> String {
    let best = scenarios
        .iter()
        .find(|s| s.feasibility == "high")
        .or_else(|| scenarios.first());
    match best {
        Some(s) => format!(
            "Recommended first step for {}: {} ({} feasibility, {}).",
            region.region, s.name, s.feasibility, s.cost
        ),
        None => format!("No policy scenarios available for {}.", region.region),
    }
}

pub fn policy_scenarios(urban: &UrbanProfile) -> Vec<PolicyScenario> {
    let green = urban.green_space_percent as f64;
    let transit = urban.public_transit as f64;
    vec![
        PolicyScenario {
            name: "Expand Green Spaces",
            impact: PolicyImpact {
                traffic: -5,
                air_quality: (12.0 * (1.0 - green / 100.0)).round() as i32,
                noise: -10,
                satisfaction: 15,
            },
            cost: annual_cost(urban.population, 0.5),
            feasibility: if urban.green_space_percent < 30 { "high" } else { "medium" },
        },
        PolicyScenario {
            name: "Enhanced Public Transit",
            impact: PolicyImpact {
                traffic: -((15.0 * (100.0 - transit) / 100.0).round() as i32),
                air_quality: 8,
                noise: -5,
                satisfaction: 12,
            },
            cost: annual_cost(urban.population, 1.2),
            feasibility: if urban.public_transit < 50 { "high" } else { "medium" },
        },
        PolicyScenario {
            name: "Noise Reduction Program",
            impact: PolicyImpact {
                traffic: 0,
                air_quality: 2,
                noise: -((urban.noise_level as f64 * 0.2).round() as i32),
                satisfaction: 18,
            },
            cost: annual_cost(urban.population, 0.3),
            feasibility: if urban.noise_level > 65 { "high" } else { "low" },
        },
    ]
}

fn regional_air_quality(region: &RegionalRecord) -> AirQualitySnapshot {
    let aqi = region.air_quality_index;
    AirQualitySnapshot {
        aqi,
        components: PollutantComponents {
            pm2_5: Some(aqi as f64 * 10.0),
            pm10: Some(aqi as f64 * 15.0),
            ..Default::default()
        },
        quality_level: if aqi <= 2 { "Good" } else { "Moderate" }.to_string(),
    }
}

fn baseline(region: &RegionalRecord) -> UrbanBaseline {
    UrbanBaseline {
        urban_stress_index: 5.0,
        citizen_satisfaction: region.urban.citizen_satisfaction,
        city_name: region.region,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::regions::RegionResolver;
    use approx::assert_relative_eq;

    #[test]
    fn test_stress_index_new_york() {
        let ny = RegionResolver::builtin().resolve("New York");
        // 9 * 0.3 + 7.0 * 0.3 + 3.5 * 0.4 = 6.2 → round(6.2) / 10
        assert_relative_eq!(stress_index(&ny.urban), 0.6);
    }

    #[test]
    fn test_policy_scenarios_tokyo() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let policies = policy_scenarios(&tokyo.urban);
        assert_eq!(policies.len(), 3);
        // green 8% → round(12 * 0.92) = 11
        assert_eq!(policies[0].impact.air_quality, 11);
        assert_eq!(policies[0].feasibility, "high");
        assert_eq!(policies[0].cost, "$7M annually");
        // transit 78% → -round(3.3) = -3
        assert_eq!(policies[1].impact.traffic, -3);
        assert_eq!(policies[1].feasibility, "medium");
        assert_eq!(policies[1].cost, "$17M annually");
        // noise 62 → -round(12.4)
        assert_eq!(policies[2].impact.noise, -12);
        assert_eq!(policies[2].feasibility, "low");
    }

    #[test]
    fn test_policy_summary_prefers_high_feasibility() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let policies = policy_scenarios(&tokyo.urban);
        assert_eq!(
            policy_summary(tokyo, &policies),
            "Recommended first step for Tokyo: Expand Green Spaces (high feasibility, $7M annually)."
        );
        assert_eq!(
            policy_summary(tokyo, &[]),
            "No policy scenarios available for Tokyo."
        );
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Tokyo, Japan");
        let prep = prepared(&ctx, FeatureId::UrbanTwin, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(result.get("cityName"), Some(&json!("Tokyo")));
        assert_eq!(result.get("citizenSatisfaction"), Some(&json!(72)));
        assert_eq!(result.get("urbanStressIndex"), Some(&json!(5.0)));
        assert!(result.get("policyScenarios").is_none());
    }
}
