//! Feature 4: Creative World Builder

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::generate_json;
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::risk::capitalize;
use crate::regions::RegionalRecord;

const WORLD_STYLES: &[&str] = &[
    "fantasy",
    "sci-fi",
    "post-apocalyptic",
    "steampunk",
    "cyberpunk",
    "natural",
    "mystical",
];

const WORLD_SCHEMA: &str = r#"{
  "worldName": "creative name",
  "worldDescription": "2-3 sentences",
  "npcCharacters": [{"name": "...", "role": "...", "behavior": "...", "personality": "..."}],
  "storyBranches": [{"choice": "...", "outcome": "..."}]
}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub role: String,
    pub behavior: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
}

impl Npc {
    fn new(name: impl Into<String>, role: &str, behavior: impl Into<String>, personality: Option<&str>) -> Self {
        Self {
            name: name.into(),
            role: role.to_string(),
            behavior: behavior.into(),
            personality: personality.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryBranch {
    pub choice: String,
    pub outcome: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedWorld {
    #[serde(default)]
    world_name: Option<String>,
    #[serde(default)]
    world_description: String,
    #[serde(default)]
    npc_characters: Vec<Npc>,
    #[serde(default)]
    story_branches: Vec<StoryBranch>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldReport {
    #[serde(rename = "world3DModel")]
    pub world_3d_model: &'static str,
    pub terrain_map: &'static str,
    pub world_name: String,
    pub world_description: String,
    pub world_style: String,
    pub npc_characters: Vec<Npc>,
    pub soundtrack_url: &'static str,
    pub concept_art_urls: [&'static str; 2],
    pub story_branches: Vec<StoryBranch>,
    pub landmarks: Vec<String>,
    pub creatures: Vec<String>,
    pub magic_system: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBaseline {
    pub world_name: &'static str,
    pub world_description: &'static str,
    pub npc_characters: Vec<Npc>,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::WorldBuilder, form).await;
    let outcome = analyze(ctx, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<WorldReport>) -> FeatureResult {
    prep.finish(outcome, baseline)
}

async fn analyze(ctx: &FeatureContext, prep: &Prepared) -> anyhow::Result<WorldReport> {
    let region = prep.region;
    let eco = &region.ecosystem;

    let classification = ctx
        .inference
        .zero_shot(prep.text_or("magical forest kingdom"), WORLD_STYLES)
        .await;
    let style = classification.top_label().unwrap_or("fantasy").to_string();

    let entities = ctx
        .inference
        .entities(prep.text_or("magical forest with ancient ruins"))
        .await;
    let landmarks: Vec<String> = entities
        .into_iter()
        .filter(|e| e.entity.contains("LOC"))
        .map(|e| e.word)
        .collect();

    let prompt = format!(
        "Create a {} world based on: \"{}\"\nInclude influences from {} ecosystem ({}).",
        style,
        prep.text_or("enchanted forest kingdom"),
        region.region,
        eco.vegetation_type
    );

    let (world_name, world_description, npcs, branches) =
        match generate_json::<GeneratedWorld>(ctx.generator.as_ref(), &prompt, Some(WORLD_SCHEMA)).await {
            Ok(world) => (
                world
                    .world_name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| "Ethereal Realm".to_string()),
                world.world_description,
                world.npc_characters,
                world.story_branches,
            ),
            Err(e) => {
                debug!(error = %e, "world generation unavailable, using regional template");
                let template = regional_world(region, &style);
                (
                    template.name,
                    template.description,
                    template.npcs,
                    template.branches,
                )
            }
        };

    Ok(WorldReport {
        world_3d_model: "/placeholders/3d-world.obj",
        terrain_map: "/placeholders/terrain.png",
        world_name,
        world_description,
        npc_characters: non_empty(npcs, || {
            vec![Npc::new("Forest Guardian", "Protector", "Watches over travelers", Some("Wise"))]
        }),
        soundtrack_url: "/placeholders/soundtrack.mp3",
        concept_art_urls: ["/placeholders/concept1.png", "/placeholders/concept2.png"],
        story_branches: non_empty(branches, || {
            vec![StoryBranch {
                choice: "Explore the ruins".to_string(),
                outcome: "Discover ancient artifacts".to_string(),
            }]
        }),
        landmarks: non_empty(landmarks, || {
            vec!["Crystal Waterfall".to_string(), "Ancient Stone Circle".to_string()]
        }),
        creatures: eco
            .dominant_species
            .iter()
            .take(3)
            .map(|s| format!("Mystical {}", s))
            .collect(),
        magic_system: format!("{}-based elemental powers", style),
        world_style: style,
    })
}

fn non_empty<T>(items: Vec<T>, default: impl FnOnce() -> Vec<T>) -> Vec<T> {
    if items.is_empty() {
        default()
    } else {
        items
    }
}

pub struct WorldTemplate {
    pub name: String,
    pub description: String,
    pub npcs: Vec<Npc>,
    pub branches: Vec<StoryBranch>,
}

/// World content drawn from the region's ecosystem
pub fn regional_world(region: &RegionalRecord, style: &str) -> WorldTemplate {
    let eco = &region.ecosystem;
    let water = eco.water_bodies.first().copied();
    let species = eco.dominant_species.first().copied();

    WorldTemplate {
        name: format!("The {} Realm of {}", capitalize(style), region.region),
        description: format!(
            "A {} world inspired by the {} landscapes of {}. Ancient {} flow through mystical territories where {} roam freely.",
            style,
            eco.vegetation_type,
            region.region,
            water.unwrap_or("rivers"),
            species.unwrap_or("magical creatures")
        ),
        npcs: vec![
            Npc::new(
                "Guardian of the Grove",
                "Protector",
                format!("Watches over the {}", eco.vegetation_type),
                Some("Wise and ancient"),
            ),
            Npc::new(
                format!("Spirit of {}", water.unwrap_or("the Waters")),
                "Guide",
                "Leads travelers to safety",
                Some("Mysterious and flowing"),
            ),
        ],
        branches: vec![
            StoryBranch {
                choice: format!("Explore the ancient {}", eco.vegetation_type),
                outcome: format!("Discover secrets of the {}", species.unwrap_or("forest")),
            },
            StoryBranch {
                choice: format!("Follow the {}", water.unwrap_or("river")),
                outcome: "Meet the water spirits".to_string(),
            },
        ],
    }
}

fn baseline() -> WorldBaseline {
    WorldBaseline {
        world_name: "Ethereal Realm",
        world_description: "A magical world of wonder.",
        npc_characters: vec![Npc::new("Guardian", "Protector", "Guides travelers", None)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::regions::RegionResolver;

    #[test]
    fn test_regional_world_names() {
        let sydney = RegionResolver::builtin().resolve("Sydney");
        let world = regional_world(sydney, "post-apocalyptic");
        assert_eq!(world.name, "The Post-apocalyptic Realm of Sydney");
        assert!(world
            .description
            .starts_with("A post-apocalyptic world inspired by the Temperate eucalyptus woodland"));
        assert_eq!(world.npcs.len(), 2);
        assert_eq!(world.branches[1].outcome, "Meet the water spirits");
    }

    #[test]
    fn test_baseline_npc_has_no_personality() {
        let value = serde_json::to_value(baseline()).unwrap();
        assert_eq!(value["worldName"], "Ethereal Realm");
        assert!(value["npcCharacters"][0].get("personality").is_none());
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Floating islands");
        let prep = prepared(&ctx, FeatureId::WorldBuilder, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(result.get("worldName"), Some(&json!("Ethereal Realm")));
        assert_eq!(result.get("npcCharacters").and_then(|v| v.as_array()).map(Vec::len), Some(1));
    }
}
