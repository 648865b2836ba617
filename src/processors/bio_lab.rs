//! Feature 8: Bio-Synthetic Creativity Lab

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::{generate_json, Scorer};
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::risk::capitalize;
use crate::regions::RegionalRecord;

const MOLECULE_TYPES: &[&str] = &["enzyme", "protein", "antibody", "peptide", "biopolymer", "catalyst"];

const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";
const SEQUENCE_LENGTH: usize = 150;
/// FASTA line width
const LINE_WIDTH: usize = 60;

const DESIGN_SCHEMA: &str =
    r#"{"applications": ["application1", "application2", "application3"], "ethicalReport": "biosafety and ethics assessment"}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPredictions {
    pub stability: f64,
    pub binding_affinity: f64,
    pub toxicity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solubility: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BioLabReport {
    pub protein_sequence: String,
    pub molecular_structure: &'static str,
    pub molecular_weight: u32,
    pub molecule_type: String,
    pub property_predictions: PropertyPredictions,
    pub bio_inspired_art: &'static str,
    pub protein_music_url: &'static str,
    pub synthesis_pathway: Vec<String>,
    pub applications: Vec<String>,
    pub ethical_report: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BioLabBaseline {
    pub protein_sequence: &'static str,
    pub molecular_weight: u32,
    pub property_predictions: PropertyPredictions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedDesign {
    #[serde(default)]
    applications: Vec<String>,
    #[serde(default)]
    ethical_report: String,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::BioLab, form).await;
    let outcome = analyze(ctx, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<BioLabReport>) -> FeatureResult {
    prep.finish(outcome, baseline)
}

async fn analyze(ctx: &FeatureContext, prep: &Prepared) -> anyhow::Result<BioLabReport> {
    let region = prep.region;
    let scorer = ctx.scorer.as_ref();

    let classification = ctx
        .inference
        .zero_shot(prep.text_or("protein design"), MOLECULE_TYPES)
        .await;
    let molecule_type = classification.top_label().unwrap_or("protein").to_string();
    let title = capitalize(&molecule_type);

    let properties = PropertyPredictions {
        stability: scorer.uniform(0.75, 0.95),
        binding_affinity: scorer.uniform(0.80, 0.98),
        toxicity: scorer.uniform(0.05, 0.20),
        solubility: Some(scorer.uniform(0.70, 0.95)),
    };

    let prompt = format!(
        "Assess a designed {} for use around {}, {}.\nRequest: {}\nStability: {:.2}\nBinding affinity: {:.2}\nToxicity: {:.2}\nLocal ecosystem: {}",
        molecule_type,
        region.region,
        region.country,
        prep.text_or("protein design"),
        properties.stability,
        properties.binding_affinity,
        properties.toxicity,
        region.ecosystem.vegetation_type
    );
    let generated =
        match generate_json::<GeneratedDesign>(ctx.generator.as_ref(), &prompt, Some(DESIGN_SCHEMA))
            .await
        {
            Ok(generated) => generated,
            Err(e) => {
                debug!(error = %e, "design assessment generation unavailable, using template");
                GeneratedDesign::default()
            }
        };

    let applications = if generated.applications.is_empty() {
        applications(region, &title)
    } else {
        generated.applications
    };
    let ethical_report = if !generated.ethical_report.trim().is_empty() {
        generated.ethical_report
    } else {
        ethical_report(region, &title, properties.toxicity)
    };

    Ok(BioLabReport {
        protein_sequence: fasta_sequence(&title, scorer),
        molecular_structure: "/placeholders/molecule-3d.pdb",
        molecular_weight: scorer.uniform(15_000.0, 65_000.0).round() as u32,
        property_predictions: properties,
        bio_inspired_art: "/placeholders/bio-art.png",
        protein_music_url: "/placeholders/protein-music.wav",
        synthesis_pathway: synthesis_pathway(region, &molecule_type),
        applications,
        ethical_report,
        molecule_type,
    })
}

/// FASTA record: header line, then residues wrapped at 60 per line
pub fn fasta_sequence(title: &str, scorer: &dyn Scorer) -> String {
    let mut sequence = format!(">Generated_{}_001\n", title);
    for i in 0..SEQUENCE_LENGTH {
        sequence.push(AMINO_ACIDS[scorer.index(AMINO_ACIDS.len())] as char);
        if (i + 1) % LINE_WIDTH == 0 {
            sequence.push('\n');
        }
    }
    sequence
}

fn synthesis_pathway(region: &RegionalRecord, molecule_type: &str) -> Vec<String> {
    let vegetation = region.ecosystem.vegetation_type;
    vec![
        format!("Step 1: Gene synthesis for {} sequence (2-3 days)", molecule_type),
        format!(
            "Step 2: {} (24 hours)",
            if molecule_type == "enzyme" {
                "Expression in E. coli"
            } else {
                "Protein expression"
            }
        ),
        "Step 3: Purification via affinity chromatography".to_string(),
        "Step 4: Activity testing and structural validation".to_string(),
        if vegetation.contains("forest") {
            format!("Step 5: Environmental compatibility testing for {}", vegetation)
        } else {
            "Step 5: Stability testing under various conditions".to_string()
        },
    ]
}

fn ethical_report(region: &RegionalRecord, title: &str, toxicity: f64) -> String {
    format!(
        "Design follows biosafety guidelines. {} is non-toxic (toxicity score: {:.1}%). Suitable for contained laboratory use. Environmental release requires additional assessment for {}.",
        title,
        toxicity * 100.0,
        region.ecosystem.vegetation_type
    )
}

fn applications(region: &RegionalRecord, title: &str) -> Vec<String> {
    vec![
        format!("{} for environmental remediation", title),
        if region.risk_factors.drought > 50 {
            "Drought-resistant crop enhancement"
        } else {
            "Soil microbiome improvement"
        }
        .to_string(),
        format!(
            "Biodegradation of pollutants in {}",
            region.ecosystem.water_bodies.first().unwrap_or(&"water systems")
        ),
        "Industrial biocatalysis applications".to_string(),
    ]
}

fn baseline() -> BioLabBaseline {
    BioLabBaseline {
        protein_sequence: ">Generated_Protein\nMKWVTFISLLFLFSSAYS",
        molecular_weight: 25_000,
        property_predictions: PropertyPredictions {
            stability: 0.85,
            binding_affinity: 0.90,
            toxicity: 0.10,
            solubility: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::adapters::{FixedScorer, RandomScorer};
    use crate::regions::RegionResolver;

    #[test]
    fn test_fasta_layout() {
        let fasta = fasta_sequence("Enzyme", &RandomScorer);
        let lines: Vec<&str> = fasta.lines().collect();
        assert_eq!(lines[0], ">Generated_Enzyme_001");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 60);
        assert_eq!(lines[3].len(), 30);
        assert!(lines[1..]
            .iter()
            .all(|l| l.bytes().all(|b| AMINO_ACIDS.contains(&b))));
    }

    #[test]
    fn test_fixed_scorer_sequence_is_stable() {
        let a = fasta_sequence("Protein", &FixedScorer::midpoint());
        let b = fasta_sequence("Protein", &FixedScorer::midpoint());
        assert_eq!(a, b);
    }

    #[test]
    fn test_forest_pathway_step() {
        let ny = RegionResolver::builtin().resolve("New York");
        let steps = synthesis_pathway(ny, "enzyme");
        assert_eq!(steps[1], "Step 2: Expression in E. coli (24 hours)");
        assert_eq!(
            steps[4],
            "Step 5: Environmental compatibility testing for Temperate deciduous forest"
        );

        let dubai = RegionResolver::builtin().resolve("Dubai");
        assert_eq!(
            synthesis_pathway(dubai, "peptide")[4],
            "Step 5: Stability testing under various conditions"
        );
        assert_eq!(applications(dubai, "Peptide")[1], "Drought-resistant crop enhancement");
    }

    #[test]
    fn test_ethical_report_template() {
        let london = RegionResolver::builtin().resolve("London");
        let report = ethical_report(london, "Enzyme", 0.125);
        assert!(report.contains("Enzyme is non-toxic (toxicity score: 12.5%)"));
        assert!(report.ends_with(&format!("assessment for {}.", london.ecosystem.vegetation_type)));
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Plastic eating enzyme");
        let prep = prepared(&ctx, FeatureId::BioLab, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(result.get("molecularWeight"), Some(&json!(25_000)));
        assert!(result.get("propertyPredictions").unwrap().get("solubility").is_none());
    }
}
