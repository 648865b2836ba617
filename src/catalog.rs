//! Feature Catalog
//!
//! Static description of the ten showcase features: title, latency window,
//! how the region is resolved, and the ordered input schema (`input_0`,
//! `input_1`, ...). Input kind is a lookup here; the label keyword heuristic
//! is only used for field names the schema does not know.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid feature id {0}")]
pub struct InvalidFeatureId(pub u32);

/// One of the ten showcase features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureId {
    CrisisPredictor = 1,
    EcosystemAnalyzer = 2,
    EmotionScanner = 3,
    WorldBuilder = 4,
    HypothesisGenerator = 5,
    Translator = 6,
    UrbanTwin = 7,
    BioLab = 8,
    Education = 9,
    PatternExplorer = 10,
}

impl FeatureId {
    pub const ALL: [FeatureId; 10] = [
        FeatureId::CrisisPredictor,
        FeatureId::EcosystemAnalyzer,
        FeatureId::EmotionScanner,
        FeatureId::WorldBuilder,
        FeatureId::HypothesisGenerator,
        FeatureId::Translator,
        FeatureId::UrbanTwin,
        FeatureId::BioLab,
        FeatureId::Education,
        FeatureId::PatternExplorer,
    ];

    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn spec(self) -> &'static FeatureSpec {
        &FEATURES[self as usize - 1]
    }
}

impl TryFrom<u32> for FeatureId {
    type Error = InvalidFeatureId;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1..=10 => Ok(Self::ALL[id as usize - 1]),
            _ => Err(InvalidFeatureId(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    File,
}

/// Where a feature looks for its region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionScope {
    /// Location-like fields (schema-flagged, then heuristics)
    Geographic,
    /// All submitted text
    Textual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    /// Field carries a place name or coordinates
    pub location: bool,
    pub default_value: &'static str,
    pub example: &'static str,
    pub placeholder: &'static str,
    /// Accepted MIME family for file inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<&'static str>,
}

impl InputDescriptor {
    const fn as_required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    const fn as_location(self) -> Self {
        Self {
            location: true,
            ..self
        }
    }
}

const fn text(
    label: &'static str,
    default_value: &'static str,
    example: &'static str,
    placeholder: &'static str,
) -> InputDescriptor {
    InputDescriptor {
        label,
        kind: InputKind::Text,
        required: false,
        location: false,
        default_value,
        example,
        placeholder,
        accept: None,
    }
}

const fn file(label: &'static str, example: &'static str, accept: &'static str) -> InputDescriptor {
    InputDescriptor {
        label,
        kind: InputKind::File,
        required: false,
        location: false,
        default_value: "",
        example,
        placeholder: "",
        accept: Some(accept),
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSpec {
    pub id: u32,
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub scope: RegionScope,
    /// Simulated inference latency window (ms)
    #[serde(skip)]
    pub latency_ms: (u64, u64),
    pub inputs: &'static [InputDescriptor],
}

impl FeatureSpec {
    pub fn total_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Descriptor for a form field name like `input_3`
    pub fn input(&self, name: &str) -> Option<&'static InputDescriptor> {
        input_index(name).and_then(|i| self.inputs.get(i))
    }

    /// Declared kind, or the label heuristic applied to the field name
    pub fn kind_of(&self, name: &str) -> InputKind {
        self.input(name)
            .map(|d| d.kind)
            .unwrap_or_else(|| guess_kind_from_label(name))
    }

    /// Names of the schema fields flagged as locations, in order
    pub fn location_fields(&self) -> Vec<String> {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, d)| d.location)
            .map(|(i, _)| input_name(i))
            .collect()
    }

    /// Names and descriptors, in order
    pub fn named_inputs(&self) -> Vec<NamedInput> {
        self.inputs
            .iter()
            .enumerate()
            .map(|(i, descriptor)| NamedInput {
                name: input_name(i),
                descriptor,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedInput {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: &'static InputDescriptor,
}

pub fn input_name(index: usize) -> String {
    format!("input_{}", index)
}

pub fn input_index(name: &str) -> Option<usize> {
    name.strip_prefix("input_")?.parse().ok()
}

/// Keyword heuristic for labels without a schema entry
pub fn guess_kind_from_label(label: &str) -> InputKind {
    const FILE_KEYWORDS: &[&str] = &["file", "upload", "image", "audio", "video", "csv", "dataset"];
    let lower = label.to_lowercase();
    if FILE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        InputKind::File
    } else {
        InputKind::Text
    }
}

pub fn feature(id: u32) -> Result<&'static FeatureSpec, InvalidFeatureId> {
    FeatureId::try_from(id).map(FeatureId::spec)
}

// ============================================================================
// FEATURE TABLE
// ============================================================================

pub static FEATURES: &[FeatureSpec] = &[
    FeatureSpec {
        id: 1,
        title: "Multimodal Crisis Predictor & Planner",
        emoji: "🌪️",
        description: "AI-powered disaster prediction and response planning using satellite imagery, weather data, and social media analysis.",
        scope: RegionScope::Geographic,
        latency_ms: (2000, 4000),
        inputs: &[
            text("Satellite imagery (RGB + IR)", "New York, USA", "e.g. Tokyo, Japan or 40.7128, -74.0060", "Enter city name or coordinates")
                .as_location()
                .as_required(),
            text("Weather & climate tables", "cloudy, heavy rain expected", "e.g. sunny, 25°C, high humidity", "Describe current weather conditions"),
            file("Historical disaster data (CSV)", "Optional: Upload satellite image", "image/*"),
            text("Social media posts", "Reports of flooding in downtown area", "e.g. Traffic jam on highway, people evacuating", "Enter social media reports or news"),
            file("Voice emergency reports", "Optional: Upload voice emergency report", "audio/*"),
            text("IoT sensor data", "Air quality: 150 AQI, Water level: 2m above normal", "e.g. Temperature: 35°C, PM2.5: 80", "Enter sensor readings"),
            text("GPS mobility traces", "High traffic towards city center", "e.g. People moving to shelters", "Describe mobility patterns"),
            file("Road network graphs", "Optional: Upload road network data", "*"),
            text("Traffic sensor feeds", "Rush hour traffic, main roads congested", "e.g. Highway closed, alternate routes busy", "Describe traffic conditions"),
        ],
    },
    FeatureSpec {
        id: 2,
        title: "Multisensory Ecosystem Health Analyzer",
        emoji: "🌿",
        description: "Comprehensive ecosystem monitoring using bioacoustics, vegetation analysis, and environmental sensors.",
        scope: RegionScope::Geographic,
        latency_ms: (2500, 4500),
        inputs: &[
            text("NDVI & satellite vegetation imagery", "Amazon Rainforest, Brazil", "e.g. Yellowstone Park, USA", "Enter ecosystem location")
                .as_location()
                .as_required(),
            file("Drone photos", "Optional: Upload drone/satellite vegetation image", "image/*"),
            file("Bioacoustic recordings", "Optional: Upload bioacoustic recording (bird sounds, etc.)", "audio/*"),
            text("Soil chemical measurements", "pH: 6.5, Nitrogen: moderate, Organic matter: high", "e.g. Clay soil, low phosphorus", "Describe soil conditions"),
            text("Water quality readings", "Clear water, slight algae presence, pH 7.2", "e.g. Turbidity: low, Dissolved oxygen: 8mg/L", "Describe water quality"),
            text("Species occurrence datasets", "Deer, eagles, various songbirds observed", "e.g. 15 bird species, 3 mammal species", "List observed species"),
            text("Climate history", "Temperature rising 0.5°C per decade", "e.g. Rainfall decreased 10% over 5 years", "Describe climate trends"),
            file("Time-lapse ecosystem videos", "Optional: Upload time-lapse ecosystem video", "video/*"),
        ],
    },
    FeatureSpec {
        id: 3,
        title: "Human Emotion & Environment Resonance Scanner",
        emoji: "💚",
        description: "AI analysis of emotional responses to environmental factors using biometrics and contextual data.",
        scope: RegionScope::Geographic,
        latency_ms: (2000, 3500),
        inputs: &[
            file("Face video stream", "Optional: Upload face video for expression analysis", "video/*"),
            file("Voice recordings", "Optional: Upload voice recording", "audio/*"),
            text("Text journals", "Feeling stressed due to work deadlines. The noisy environment makes it harder to concentrate. Taking a walk in the park helped a bit.", "e.g. Write how you're feeling today", "Enter your journal entry or mood description")
                .as_required(),
            text("Heart rate & skin conductance", "Heart rate: 75bpm, slightly elevated", "e.g. Heart rate: 80bpm, skin conductance: normal", "Enter biometric data if available"),
            text("Ambient sound recordings", "Office environment, moderate noise, artificial lighting", "e.g. Traffic noise, construction sounds nearby", "Describe ambient sounds around you"),
            text("Light & color sensor data", "Bright fluorescent lights, blue-white color", "e.g. Warm natural sunlight, dim indoor lighting", "Describe lighting conditions"),
            text("Weather & air quality measurements", "New York, USA", "e.g. London, UK for weather correlation", "Enter your location for weather data")
                .as_location(),
        ],
    },
    FeatureSpec {
        id: 4,
        title: "AI Creative World Builder",
        emoji: "🎨",
        description: "Generative AI for creating immersive environmental worlds from user inputs and references.",
        scope: RegionScope::Textual,
        latency_ms: (3000, 5000),
        inputs: &[
            file("User sketches", "Optional: Upload a rough sketch of your world", "image/*"),
            text("Textual theme description", "A mystical floating island kingdom with crystal caves, ancient ruins, and magical forests. The sky has two moons.", "e.g. Post-apocalyptic desert with underground cities", "Describe your world theme and setting")
                .as_required(),
            file("Audio mood samples", "Optional: Upload mood music for atmosphere", "audio/*"),
            file("Environment photos", "Optional: Upload reference environment photos", "image/*"),
            file("Historical reference images", "Optional: Upload historical/fantasy art references", "image/*"),
            text("Art style embeddings", "Studio Ghibli meets Lord of the Rings, vibrant colors, detailed architecture", "e.g. Cyberpunk, dark fantasy, steampunk", "Describe desired art style"),
            text("Terrain elevation maps", "Mountainous terrain with deep valleys and floating rock formations", "e.g. Flat plains with scattered oases", "Describe terrain features"),
        ],
    },
    FeatureSpec {
        id: 5,
        title: "Cross-Domain Scientific Hypothesis Generator",
        emoji: "🔬",
        description: "AI-driven scientific discovery across multiple domains, generating testable hypotheses from diverse data sources.",
        scope: RegionScope::Textual,
        latency_ms: (2500, 4500),
        inputs: &[
            text("Research paper text (PDFs)", "Research on how urban green spaces affect air quality and citizen health outcomes. Previous studies show correlation but causation unclear.", "e.g. Paste research abstract or describe your study", "Enter research context or paste paper abstract")
                .as_required(),
            file("Experimental datasets (CSV/HDF5)", "Optional: Upload experimental dataset (CSV)", ".csv"),
            text("Graph/network datasets", "Variables: tree coverage %, PM2.5 levels, respiratory illness rates, temperature", "e.g. List your key variables and relationships", "Describe your data relationships"),
            file("Simulation outputs", "Optional: Upload simulation outputs", "*"),
            file("Diagram images", "Optional: Upload research diagrams", "image/*"),
            file("Voice queries", "Optional: Ask questions via voice", "audio/*"),
            text("Prior model outputs", "Based on existing literature: green spaces reduce PM2.5 by 10-20%", "e.g. Previous model predicted X correlation", "Enter prior findings or hypotheses"),
        ],
    },
    FeatureSpec {
        id: 6,
        title: "Global Culture & Language Fusion Translator",
        emoji: "🌍",
        description: "Multilingual AI translator that preserves cultural context, emotions, and gestures across languages.",
        scope: RegionScope::Textual,
        latency_ms: (2000, 4000),
        inputs: &[
            file("Speech audio recordings", "Optional: Upload speech audio for translation", "audio/*"),
            text("Written text", "Hello! I hope you're having a wonderful day. I'd like to schedule a meeting to discuss our partnership opportunities.", "e.g. Enter text you want to translate", "Enter text to translate")
                .as_required(),
            file("Gesture video", "Optional: Upload gesture video for analysis", "video/*"),
            file("Facial expression video", "Optional: Upload facial expression video", "video/*"),
            text("Cultural metadata", "Translating for Japanese business context, formal setting", "e.g. Casual conversation with friends in Spain", "Describe the cultural context"),
            file("Environmental audio background", "Optional: Upload background audio for context", "audio/*"),
            text("Geographic context", "New York to Tokyo business communication", "e.g. USA to France, casual tourism", "Describe geographic/cultural journey")
                .as_location(),
        ],
    },
    FeatureSpec {
        id: 7,
        title: "Urban Dynamics Digital Twin",
        emoji: "🏙️",
        description: "Real-time urban simulation and planning tool using traffic, air quality, and citizen data.",
        scope: RegionScope::Geographic,
        latency_ms: (2500, 4500),
        inputs: &[
            file("Traffic CCTV video streams", "Optional: Upload traffic camera footage", "video/*"),
            text("Road network maps", "Manhattan, New York City", "e.g. Downtown Tokyo, Central London", "Enter city or district name")
                .as_location()
                .as_required(),
            text("Traffic flow data", "Morning rush hour, 8-9 AM, weekday, major intersections congested", "e.g. 50,000 vehicles/hour, average speed 15km/h", "Describe traffic conditions"),
            text("Air quality sensors", "PM2.5: 45, AQI: 120, slight smog visible", "e.g. Good air quality, AQI: 50", "Enter air quality readings"),
            text("Noise level sensors", "65 dB average, construction noise on 5th avenue", "e.g. 70 dB, heavy traffic noise", "Describe noise levels"),
            text("Public transit schedules", "Subway running normally, buses delayed 10 minutes", "e.g. Metro: 5 min intervals, buses: 15 min intervals", "Describe public transit status"),
            text("Citizen feedback text reports", "Citizens complaining about traffic and air quality on social media", "e.g. Positive feedback about new bike lanes", "Enter citizen feedback summary"),
            text("Historical event datasets", "Last major event: marathon last weekend caused road closures", "e.g. Festival caused 30% traffic increase", "Describe recent events affecting city"),
        ],
    },
    FeatureSpec {
        id: 8,
        title: "Bio-Synthetic Creativity Lab",
        emoji: "🧬",
        description: "AI-driven molecular design and bio-inspired creativity using protein sequences and creative prompts.",
        scope: RegionScope::Textual,
        latency_ms: (3000, 5000),
        inputs: &[
            text("Protein sequences", "MKWVTFISLLFLFSSAYSRGVFRRDAHKSEVAHR", "e.g. Paste protein sequence in FASTA format", "Enter protein sequence"),
            text("Molecular graphs", "Small molecule for binding to carbon dioxide, water-soluble, non-toxic", "e.g. Enzyme for plastic degradation", "Describe molecular constraints"),
            text("Environmental constraints", "Stable at pH 7-9, temperature resistant up to 60°C", "e.g. Must work in marine environment", "Enter environmental constraints"),
            text("Creative prompts", "Design an enzyme that can break down microplastics in ocean water", "e.g. Create a bio-luminescent protein", "Enter your creative prompt for bio-design")
                .as_required(),
            file("Audio motifs", "Optional: Upload audio motif for bio-art", "audio/*"),
            text("Chemical property datasets", "Target properties: high catalytic activity, long half-life, easy to produce", "e.g. Binding affinity > 10nM, solubility > 1mg/mL", "Enter desired chemical properties"),
        ],
    },
    FeatureSpec {
        id: 9,
        title: "Adaptive Education & Skill Synthesizer",
        emoji: "🎓",
        description: "Personalized learning platform that adapts to student needs using multimodal analysis.",
        scope: RegionScope::Textual,
        latency_ms: (2500, 4000),
        inputs: &[
            file("Student video recordings", "Optional: Upload student video for engagement analysis", "video/*"),
            file("Speech responses", "Optional: Upload student speech responses", "audio/*"),
            text("Test answer sheets", "Math: 75%, Science: 82%, English: 68%, History: 90%", "e.g. List recent test scores or grades", "Enter test scores or assessment results")
                .as_required(),
            text("Engagement biometrics", "Good focus in morning, attention drops after lunch, prefers visual learning", "e.g. Eye tracking shows high engagement with videos", "Describe engagement patterns"),
            text("Curriculum content", "High school level, preparing for college entrance exams, focus on STEM", "e.g. Grade 10, AP courses in Physics and Math", "Describe curriculum and learning goals"),
            file("Code submissions", "Optional: Upload code submissions for analysis", "*"),
            text("Peer feedback text", "Good at problem-solving, needs work on essay writing, collaborative learner", "e.g. Excellent in group work, struggles with timed tests", "Enter peer feedback or observations"),
        ],
    },
    FeatureSpec {
        id: 10,
        title: "Quantum-Inspired Pattern Explorer",
        emoji: "⚛️",
        description: "Advanced pattern discovery using tensor networks and topological data analysis across multiple data types.",
        scope: RegionScope::Textual,
        latency_ms: (3000, 5000),
        inputs: &[
            text("High-dimensional numerical datasets", "Temperature data: [23.5, 24.1, 23.8, 25.2, 26.0, 24.5]\nHumidity data: [65, 68, 70, 72, 71, 69]", "e.g. Paste numerical data arrays", "Enter numerical dataset")
                .as_required(),
            text("Time-series signals", "Monthly readings over 2 years: increasing trend with seasonal variations", "e.g. Stock prices, sensor readings over time", "Describe time-series pattern"),
            text("Graph structures", "Nodes: [City A, City B, City C], Edges: [A-B: strong, B-C: weak, A-C: moderate]", "e.g. Social network, transportation links", "Describe graph/network structure"),
            file("Images", "Optional: Upload images for pattern analysis", "image/*"),
            text("Text corpora", "Research papers about climate change patterns and predictions", "e.g. News articles, research documents", "Enter text corpus for analysis"),
            file("Waveforms", "Optional: Upload waveform data (audio, signals)", "audio/*"),
            text("Scientific tensor data", "Looking for anomalies in sensor data, predict future trends, find hidden correlations", "e.g. Cluster similar items, detect outliers", "Describe your analysis goals"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_ids_round_trip_through_table() {
        for id in FeatureId::ALL {
            assert_eq!(id.spec().id, id.number());
        }
    }

    #[test]
    fn test_invalid_ids() {
        assert_eq!(FeatureId::try_from(0), Err(InvalidFeatureId(0)));
        assert_eq!(FeatureId::try_from(11), Err(InvalidFeatureId(11)));
        assert!(feature(7).is_ok());
    }

    #[test]
    fn test_input_counts() {
        let counts: Vec<usize> = FEATURES.iter().map(|f| f.total_inputs()).collect();
        assert_eq!(counts, vec![9, 8, 7, 7, 7, 7, 8, 6, 7, 7]);
    }

    #[test]
    fn test_file_inputs_are_upload_slots() {
        for spec in FEATURES {
            for input in spec.inputs {
                let upload = input.example.starts_with("Optional: Upload")
                    || input.example.starts_with("Optional: Ask");
                assert_eq!(input.kind == InputKind::File, upload, "{}", input.label);
            }
        }
    }

    #[test]
    fn test_location_fields() {
        assert_eq!(feature(1).unwrap().location_fields(), vec!["input_0"]);
        assert_eq!(feature(3).unwrap().location_fields(), vec!["input_6"]);
        assert_eq!(feature(7).unwrap().location_fields(), vec!["input_1"]);
        assert!(feature(4).unwrap().location_fields().is_empty());
    }

    #[test]
    fn test_schema_overrides_label_heuristic() {
        let crisis = feature(1).unwrap();
        // "Satellite imagery" looks like a file by keyword, but the schema says text
        assert_eq!(guess_kind_from_label(crisis.inputs[0].label), InputKind::File);
        assert_eq!(crisis.kind_of("input_0"), InputKind::Text);
        assert_eq!(crisis.kind_of("input_2"), InputKind::File);
    }

    #[test]
    fn test_unknown_fields_use_heuristic() {
        let spec = feature(2).unwrap();
        assert_eq!(spec.kind_of("drone_image"), InputKind::File);
        assert_eq!(spec.kind_of("notes"), InputKind::Text);
        assert_eq!(spec.kind_of("input_42"), InputKind::Text);
    }

    #[test]
    fn test_input_index() {
        assert_eq!(input_index("input_12"), Some(12));
        assert_eq!(input_index("input_"), None);
        assert_eq!(input_index("_targetLanguages"), None);
    }
}
