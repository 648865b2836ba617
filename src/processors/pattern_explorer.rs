//! Feature 10: Pattern Explorer

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::charts::{ChartData, Dataset, Palette};
use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::{generate_json, Scorer};
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::risk::capitalize;
use crate::regions::RegionalRecord;

const PATTERN_TYPES: &[&str] = &["cyclic", "linear", "exponential", "chaotic", "periodic", "random"];

/// Reference statements the submitted text is compared against
pub const REFERENCE_SENTENCES: &[&str] = &[
    "Temperature follows seasonal patterns",
    "Data shows random fluctuations",
    "Strong correlation between variables",
    "Anomaly detected in recent data",
];

/// `(min, spread)` per embedding component
const EMBEDDING_RANGES: [[(f64, f64); 4]; 3] = [
    [(0.5, 0.3), (0.3, 0.2), (0.8, 0.1), (0.2, 0.3)],
    [(0.7, 0.2), (0.4, 0.3), (0.6, 0.2), (0.3, 0.2)],
    [(0.2, 0.4), (0.9, 0.1), (0.4, 0.3), (0.7, 0.2)],
];

const INTERPRETATION_SCHEMA: &str =
    r#"{"dimensionalityReduction": "one or two sentences interpreting the detected patterns"}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub variable: &'static str,
    pub trend: &'static str,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkScore {
    pub method: &'static str,
    pub score: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub embeddings: Vec<[f64; 4]>,
    pub latent_space_map: &'static str,
    pub patterns_found: u32,
    pub dominant_pattern: String,
    pub anomaly_timeline: ChartData,
    pub feature_importance_map: &'static str,
    pub predictive_trends: Vec<Trend>,
    pub reconstruction_accuracy: f64,
    pub benchmark_scores: Vec<BenchmarkScore>,
    pub cluster_count: u32,
    pub dimensionality_reduction: String,
    pub similarity_results: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBaseline {
    pub patterns_found: u32,
    pub reconstruction_accuracy: f64,
    pub predictive_trends: Vec<Trend>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedInterpretation {
    #[serde(default)]
    dimensionality_reduction: String,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::PatternExplorer, form).await;
    let outcome = analyze(ctx, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<PatternReport>) -> FeatureResult {
    prep.finish(outcome, baseline)
}

async fn analyze(ctx: &FeatureContext, prep: &Prepared) -> anyhow::Result<PatternReport> {
    let region = prep.region;
    let scorer = ctx.scorer.as_ref();

    let classification = ctx
        .inference
        .zero_shot(prep.text_or("time series data"), PATTERN_TYPES)
        .await;
    let dominant_pattern = classification.top_label().unwrap_or("periodic").to_string();

    let similarity_results = ctx
        .inference
        .similarity(prep.text_or("environmental data patterns"), REFERENCE_SENTENCES)
        .await;

    let embeddings = EMBEDDING_RANGES
        .into_iter()
        .map(|row| row.map(|(min, spread)| scorer.uniform(min, min + spread)))
        .collect();

    let predictive_trends = predictive_trends(region, scorer);
    let prompt = format!(
        "Interpret environmental data patterns for {}, {}.\nDominant pattern: {}\nTrends: {}\nSimilarity to reference statements: {}",
        region.region,
        region.country,
        dominant_pattern,
        serde_json::to_string(&predictive_trends)?,
        serde_json::to_string(&similarity_results)?
    );
    let dimensionality_reduction = match generate_json::<GeneratedInterpretation>(
        ctx.generator.as_ref(),
        &prompt,
        Some(INTERPRETATION_SCHEMA),
    )
    .await
    {
        Ok(generated) if !generated.dimensionality_reduction.trim().is_empty() => {
            generated.dimensionality_reduction
        }
        Ok(_) => interpretation(region, &dominant_pattern),
        Err(e) => {
            debug!(error = %e, "pattern interpretation unavailable, using template");
            interpretation(region, &dominant_pattern)
        }
    };

    Ok(PatternReport {
        embeddings,
        latent_space_map: "/placeholders/latent-space.png",
        patterns_found: scorer.uniform(3.0, 8.0).floor() as u32,
        anomaly_timeline: anomaly_timeline(region, scorer),
        feature_importance_map: "/placeholders/feature-importance.png",
        predictive_trends,
        reconstruction_accuracy: scorer.uniform(0.90, 0.98),
        benchmark_scores: vec![
            BenchmarkScore { method: "PCA", score: scorer.uniform(0.70, 0.80) },
            BenchmarkScore { method: "t-SNE", score: scorer.uniform(0.80, 0.90) },
            BenchmarkScore { method: "UMAP", score: scorer.uniform(0.85, 0.95) },
            BenchmarkScore { method: "Quantum-Inspired", score: scorer.uniform(0.92, 0.99) },
        ],
        cluster_count: scorer.uniform(3.0, 7.0).floor() as u32,
        dimensionality_reduction,
        dominant_pattern,
        similarity_results,
    })
}

fn interpretation(region: &RegionalRecord, dominant_pattern: &str) -> String {
    format!(
        "Applied tensor network factorization. {} patterns detected in {} environmental data.",
        capitalize(dominant_pattern),
        region.region
    )
}

/// Monthly anomaly scores; March spikes under drought, June under heatwave risk
pub fn anomaly_timeline(region: &RegionalRecord, scorer: &dyn Scorer) -> ChartData {
    let risk = &region.risk_factors;
    let draw = |min: f64, spread: f64| scorer.uniform(min, min + spread);
    let data = vec![
        draw(0.1, 0.2),
        draw(0.15, 0.15),
        if risk.drought > 50 { draw(0.7, 0.25) } else { draw(0.2, 0.2) },
        draw(0.15, 0.2),
        draw(0.1, 0.15),
        if risk.heatwave > 50 { draw(0.5, 0.3) } else { draw(0.2, 0.2) },
    ];
    ChartData::single(
        &["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
        Dataset::filled("Anomaly Score", data, Palette::Amber),
    )
}

pub fn predictive_trends(region: &RegionalRecord, scorer: &dyn Scorer) -> Vec<Trend> {
    let risk = &region.risk_factors;
    vec![
        Trend {
            variable: "Temperature",
            trend: if risk.heatwave > 50 { "increasing" } else { "stable" },
            confidence: scorer.uniform(0.75, 0.95),
        },
        Trend {
            variable: "Precipitation",
            trend: if risk.drought > 50 { "decreasing" } else { "stable" },
            confidence: scorer.uniform(0.70, 0.90),
        },
        Trend {
            variable: "Biodiversity Index",
            trend: if region.ecosystem.biodiversity_index > 0.7 {
                "stable"
            } else {
                "decreasing"
            },
            confidence: scorer.uniform(0.65, 0.90),
        },
    ]
}

fn baseline() -> PatternBaseline {
    PatternBaseline {
        patterns_found: 3,
        reconstruction_accuracy: 0.85,
        predictive_trends: vec![Trend {
            variable: "General",
            trend: "stable",
            confidence: 0.75,
        }],
    }
}
