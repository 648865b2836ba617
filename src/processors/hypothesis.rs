//! Feature 5: Scientific Hypothesis Generator

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::generate_json;
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::RegionalRecord;

const DOMAINS: &[&str] = &[
    "environmental science",
    "biology",
    "climate science",
    "ecology",
    "chemistry",
    "physics",
    "medicine",
];

const MAX_VARIABLES: usize = 5;

const SCIENCE_SCHEMA: &str = r#"{
  "hypotheses": [{"text": "...", "rank": 1, "confidence": 85, "domain": "...", "testability": "high"}],
  "experimentBlueprints": [{"title": "...", "parameters": "...", "methodology": "..."}],
  "codeSnippets": [{"language": "python", "code": "..."}]
}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub text: String,
    pub rank: u32,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentBlueprint {
    pub title: String,
    pub parameters: String,
    pub methodology: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GeneratedScience {
    hypotheses: Vec<Hypothesis>,
    experiment_blueprints: Vec<ExperimentBlueprint>,
    code_snippets: Vec<CodeSnippet>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisReport {
    pub hypotheses: Vec<Hypothesis>,
    pub experiment_blueprints: Vec<ExperimentBlueprint>,
    pub statistical_power: f64,
    pub key_variables: Vec<String>,
    pub primary_domain: String,
    pub code_snippets: Vec<CodeSnippet>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisBaseline {
    pub hypotheses: Vec<Hypothesis>,
    pub statistical_power: f64,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::HypothesisGenerator, form).await;
    let outcome = analyze(ctx, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<HypothesisReport>) -> FeatureResult {
    prep.finish(outcome, baseline)
}

async fn analyze(ctx: &FeatureContext, prep: &Prepared) -> anyhow::Result<HypothesisReport> {
    let region = prep.region;

    let classification = ctx
        .inference
        .zero_shot(prep.text_or("environmental research"), DOMAINS)
        .await;
    let primary_domain = classification
        .top_label()
        .unwrap_or("environmental science")
        .to_string();

    let entities = ctx
        .inference
        .entities(prep.text_or("temperature affects biodiversity"))
        .await;
    let mut key_variables: Vec<String> = Vec::new();
    for entity in entities {
        if key_variables.len() == MAX_VARIABLES {
            break;
        }
        if !key_variables.contains(&entity.word) {
            key_variables.push(entity.word);
        }
    }
    if key_variables.is_empty() {
        key_variables = vec!["Temperature".into(), "Humidity".into(), "Biodiversity".into()];
    }

    let prompt = format!(
        "Generate scientific hypotheses for {} research about: \"{}\"\nContext: {} ecosystem with {}",
        primary_domain,
        prep.text_or("environmental factors"),
        region.region,
        region.ecosystem.vegetation_type
    );

    let science = match generate_json::<GeneratedScience>(
        ctx.generator.as_ref(),
        &prompt,
        Some(SCIENCE_SCHEMA),
    )
    .await
    {
        Ok(science) => science,
        Err(e) => {
            debug!(error = %e, "hypothesis generation unavailable, using regional template");
            GeneratedScience {
                hypotheses: regional_hypotheses(region, &primary_domain),
                experiment_blueprints: vec![regional_blueprint(region)],
                code_snippets: vec![analysis_snippet(region, &primary_domain)],
            }
        }
    };

    let hypotheses = if science.hypotheses.is_empty() {
        vec![Hypothesis {
            text: "Environmental factors correlate with species diversity".to_string(),
            rank: 1,
            confidence: 80.0,
            domain: None,
            testability: None,
        }]
    } else {
        science.hypotheses
    };
    let experiment_blueprints = if science.experiment_blueprints.is_empty() {
        vec![ExperimentBlueprint {
            title: "Field Study".to_string(),
            parameters: "50 samples, 6 months".to_string(),
            methodology: "Observational".to_string(),
        }]
    } else {
        science.experiment_blueprints
    };
    let code_snippets = if science.code_snippets.is_empty() {
        vec![CodeSnippet {
            language: "python".to_string(),
            code: "# Analysis code\nimport pandas as pd\n# Process data".to_string(),
        }]
    } else {
        science.code_snippets
    };

    Ok(HypothesisReport {
        hypotheses,
        experiment_blueprints,
        statistical_power: 0.85,
        key_variables,
        primary_domain,
        code_snippets,
    })
}

pub fn regional_hypotheses(region: &RegionalRecord, primary_domain: &str) -> Vec<Hypothesis> {
    let eco = &region.ecosystem;
    let biodiversity = (eco.biodiversity_index * 100.0).round();
    vec![
        Hypothesis {
            text: format!(
                "{} biodiversity correlates with {} conditions (confidence: {}%)",
                eco.vegetation_type, region.climate, biodiversity
            ),
            rank: 1,
            confidence: biodiversity,
            domain: Some(primary_domain.to_string()),
            testability: Some("high".to_string()),
        },
        Hypothesis {
            text: format!(
                "Air quality (AQI: {}) significantly impacts {} populations",
                region.air_quality_index,
                eco.threatened_species.first().unwrap_or(&"endangered species")
            ),
            rank: 2,
            confidence: 78.0,
            domain: Some("ecology".to_string()),
            testability: Some("medium".to_string()),
        },
        Hypothesis {
            text: format!(
                "Urban green space ({}%) reduces heat island effects in {}",
                region.urban.green_space_percent, region.region
            ),
            rank: 3,
            confidence: 72.0,
            domain: Some("climate science".to_string()),
            testability: Some("high".to_string()),
        },
    ]
}

fn regional_blueprint(region: &RegionalRecord) -> ExperimentBlueprint {
    ExperimentBlueprint {
        title: format!("{} Impact Study", region.ecosystem.vegetation_type),
        parameters: format!(
            "Sample size: 50 sites, Duration: 12 months, Location: {}",
            region.region
        ),
        methodology: "Randomized stratified sampling with environmental sensors".to_string(),
    }
}

/// Data file is named after the region, lowercase, first space as `_`
pub fn analysis_snippet(region: &RegionalRecord, primary_domain: &str) -> CodeSnippet {
    let file_stem = region.region.to_lowercase().replacen(' ', "_", 1);
    let code = format!(
        r#"import pandas as pd
import numpy as np
from scipy import stats

# Load {region} environmental data
df = pd.read_csv('{file_stem}_data.csv')

# Analyze {primary_domain} variables
correlation = df['temperature'].corr(df['biodiversity_index'])
print(f'Temperature-Biodiversity Correlation: {{correlation:.3f}}')

# Statistical significance
t_stat, p_value = stats.ttest_ind(df['control'], df['treatment'])
print(f'P-value: {{p_value:.4f}}')"#,
        region = region.region,
        file_stem = file_stem,
        primary_domain = primary_domain,
    );
    CodeSnippet {
        language: "python".to_string(),
        code,
    }
}

fn baseline() -> HypothesisBaseline {
    HypothesisBaseline {
        hypotheses: vec![Hypothesis {
            text: "Environmental analysis pending".to_string(),
            rank: 1,
            confidence: 70.0,
            domain: None,
            testability: None,
        }],
        statistical_power: 0.8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::regions::RegionResolver;

    #[test]
    fn test_regional_hypotheses() {
        let nairobi = RegionResolver::builtin().resolve("Nairobi");
        let hypotheses = regional_hypotheses(nairobi, "ecology");
        assert_eq!(hypotheses.len(), 3);
        assert_eq!(hypotheses[0].confidence, 85.0);
        assert!(hypotheses[0].text.ends_with("(confidence: 85%)"));
        assert_eq!(hypotheses[2].rank, 3);
    }

    #[test]
    fn test_snippet_file_name() {
        let ny = RegionResolver::builtin().resolve("New York");
        let snippet = analysis_snippet(ny, "biology");
        assert!(snippet.code.contains("pd.read_csv('new_york_data.csv')"));
        assert!(snippet.code.contains("{correlation:.3f}"));

        let amazon = RegionResolver::builtin().resolve("Amazon Rainforest");
        assert!(analysis_snippet(amazon, "ecology")
            .code
            .contains("'amazon_rainforest_data.csv'"));
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Soil carbon and rainfall");
        let prep = prepared(&ctx, FeatureId::HypothesisGenerator, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(result.get("statisticalPower"), Some(&json!(0.8)));
        assert_eq!(result.get("hypotheses").unwrap()[0]["text"], "Environmental analysis pending");
    }
}
