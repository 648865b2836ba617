//! Embedded Regional Dataset
//!
//! Static environmental profiles for the regions the showcase knows about.
//! Used as a stand-in whenever live weather or air-quality data is missing,
//! and as the source of ecosystem, urban and cultural context for every
//! feature processor.
//!
//! Iteration order matters: the resolver returns the first match, and the
//! first record is the default region.

use serde::Serialize;

/// Average summer/winter temperatures (°C)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonalTemperature {
    pub summer: f64,
    pub winter: f64,
}

/// Hazard likelihoods, each on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskFactors {
    pub flood: u32,
    pub earthquake: u32,
    pub hurricane: u32,
    pub wildfire: u32,
    pub drought: u32,
    pub heatwave: u32,
}

impl RiskFactors {
    /// Factor names and values in declaration order
    pub fn entries(&self) -> [(&'static str, u32); 6] {
        [
            ("flood", self.flood),
            ("earthquake", self.earthquake),
            ("hurricane", self.hurricane),
            ("wildfire", self.wildfire),
            ("drought", self.drought),
            ("heatwave", self.heatwave),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemProfile {
    /// 0.0 - 1.0
    pub biodiversity_index: f64,
    pub dominant_species: &'static [&'static str],
    pub threatened_species: &'static [&'static str],
    pub vegetation_type: &'static str,
    pub water_bodies: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrbanProfile {
    pub population: u64,
    /// 1 - 10
    pub traffic_congestion: u32,
    /// % of commuters using public transit
    pub public_transit: u32,
    pub green_space_percent: u32,
    /// Average dB
    pub noise_level: u32,
    /// %
    pub citizen_satisfaction: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalContext {
    pub primary_languages: &'static [&'static str],
    pub greeting_style: &'static str,
    pub formality_level: &'static str,
    pub business_culture: &'static str,
}

/// Static environmental profile for one named region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalRecord {
    pub region: &'static str,
    pub country: &'static str,
    pub continent: &'static str,
    pub climate: &'static str,
    pub avg_temperature: SeasonalTemperature,
    /// %
    pub avg_humidity: u32,
    /// mm per year
    pub avg_rainfall: u32,
    /// 1 - 5
    pub air_quality_index: u32,
    pub risk_factors: RiskFactors,
    pub ecosystem: EcosystemProfile,
    pub urban: UrbanProfile,
    pub cultural_context: CulturalContext,
}

/// Continent → keywords that imply it. Checked in this order.
pub static CONTINENT_KEYWORDS: &[(&str, &[&str])] = &[
    ("North America", &["usa", "america", "canada", "mexico", "us", "united states"]),
    ("Europe", &["uk", "england", "france", "germany", "spain", "italy", "europe", "britain"]),
    ("Asia", &["china", "japan", "india", "korea", "asia", "singapore", "vietnam", "thailand", "indonesia"]),
    ("South America", &["brazil", "argentina", "chile", "peru", "colombia", "south america"]),
    ("Africa", &["egypt", "kenya", "nigeria", "south africa", "morocco", "africa"]),
    ("Oceania", &["australia", "new zealand", "pacific", "oceania"]),
];

/// Climate → keywords that imply it. Checked in this order.
pub static CLIMATE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Tropical rainforest", &["tropical", "rainforest", "jungle", "amazon"]),
    ("Hot desert", &["desert", "arid", "sahara", "dubai"]),
    ("Oceanic", &["coastal", "marine", "oceanic"]),
    ("Mediterranean", &["mediterranean", "california"]),
];

// ============================================================================
// EMBEDDED REGIONS
// ============================================================================

pub static REGIONS: &[RegionalRecord] = &[
    // North America
    RegionalRecord {
        region: "New York",
        country: "USA",
        continent: "North America",
        climate: "Humid subtropical",
        avg_temperature: SeasonalTemperature { summer: 28.0, winter: 2.0 },
        avg_humidity: 63,
        avg_rainfall: 1268,
        air_quality_index: 2,
        risk_factors: RiskFactors { flood: 45, earthquake: 15, hurricane: 35, wildfire: 10, drought: 20, heatwave: 40 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.62,
            dominant_species: &["White-tailed deer", "Eastern gray squirrel", "American robin", "Red-tailed hawk"],
            threatened_species: &["Atlantic sturgeon", "Indiana bat", "Piping plover"],
            vegetation_type: "Temperate deciduous forest",
            water_bodies: &["Hudson River", "East River", "Atlantic Ocean"],
        },
        urban: UrbanProfile { population: 8_336_817, traffic_congestion: 9, public_transit: 56, green_space_percent: 14, noise_level: 70, citizen_satisfaction: 65 },
        cultural_context: CulturalContext {
            primary_languages: &["English", "Spanish", "Chinese"],
            greeting_style: "Direct handshake",
            formality_level: "Medium",
            business_culture: "Fast-paced, direct communication",
        },
    },
    RegionalRecord {
        region: "Los Angeles",
        country: "USA",
        continent: "North America",
        climate: "Mediterranean",
        avg_temperature: SeasonalTemperature { summer: 29.0, winter: 14.0 },
        avg_humidity: 50,
        avg_rainfall: 378,
        air_quality_index: 3,
        risk_factors: RiskFactors { flood: 25, earthquake: 75, hurricane: 5, wildfire: 80, drought: 70, heatwave: 60 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.58,
            dominant_species: &["California scrub jay", "Western fence lizard", "Coyote", "Red-tailed hawk"],
            threatened_species: &["California gnatcatcher", "Desert tortoise", "Santa Ana sucker"],
            vegetation_type: "Chaparral and coastal sage scrub",
            water_bodies: &["Pacific Ocean", "Los Angeles River", "Santa Monica Bay"],
        },
        urban: UrbanProfile { population: 3_898_747, traffic_congestion: 10, public_transit: 12, green_space_percent: 11, noise_level: 68, citizen_satisfaction: 58 },
        cultural_context: CulturalContext {
            primary_languages: &["English", "Spanish"],
            greeting_style: "Casual wave or handshake",
            formality_level: "Low",
            business_culture: "Creative, networking-focused",
        },
    },
    // Europe
    RegionalRecord {
        region: "London",
        country: "United Kingdom",
        continent: "Europe",
        climate: "Oceanic",
        avg_temperature: SeasonalTemperature { summer: 22.0, winter: 6.0 },
        avg_humidity: 79,
        avg_rainfall: 602,
        air_quality_index: 2,
        risk_factors: RiskFactors { flood: 55, earthquake: 5, hurricane: 10, wildfire: 5, drought: 15, heatwave: 25 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.55,
            dominant_species: &["European robin", "Grey squirrel", "Red fox", "Common pigeon"],
            threatened_species: &["European eel", "Water vole", "Hedgehog"],
            vegetation_type: "Temperate broadleaf forest",
            water_bodies: &["Thames River", "Regent Canal", "Serpentine Lake"],
        },
        urban: UrbanProfile { population: 8_982_000, traffic_congestion: 8, public_transit: 45, green_space_percent: 33, noise_level: 65, citizen_satisfaction: 68 },
        cultural_context: CulturalContext {
            primary_languages: &["English"],
            greeting_style: "Polite handshake",
            formality_level: "Medium-High",
            business_culture: "Reserved, punctual, formal meetings",
        },
    },
    RegionalRecord {
        region: "Paris",
        country: "France",
        continent: "Europe",
        climate: "Oceanic",
        avg_temperature: SeasonalTemperature { summer: 25.0, winter: 5.0 },
        avg_humidity: 75,
        avg_rainfall: 641,
        air_quality_index: 2,
        risk_factors: RiskFactors { flood: 45, earthquake: 10, hurricane: 5, wildfire: 15, drought: 25, heatwave: 35 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.52,
            dominant_species: &["European starling", "House sparrow", "Pigeon", "Common swift"],
            threatened_species: &["European eel", "Garden dormouse", "Common toad"],
            vegetation_type: "Urban parkland with temperate species",
            water_bodies: &["Seine River", "Canal Saint-Martin", "Bois de Boulogne lakes"],
        },
        urban: UrbanProfile { population: 2_161_000, traffic_congestion: 7, public_transit: 68, green_space_percent: 21, noise_level: 64, citizen_satisfaction: 62 },
        cultural_context: CulturalContext {
            primary_languages: &["French"],
            greeting_style: "La bise (cheek kisses)",
            formality_level: "High",
            business_culture: "Relationship-focused, formal dress",
        },
    },
    RegionalRecord {
        region: "Berlin",
        country: "Germany",
        continent: "Europe",
        climate: "Oceanic",
        avg_temperature: SeasonalTemperature { summer: 24.0, winter: 1.0 },
        avg_humidity: 72,
        avg_rainfall: 570,
        air_quality_index: 2,
        risk_factors: RiskFactors { flood: 30, earthquake: 5, hurricane: 5, wildfire: 10, drought: 20, heatwave: 30 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.58,
            dominant_species: &["Wild boar", "Red fox", "European rabbit", "Common buzzard"],
            threatened_species: &["European pond turtle", "Sand lizard", "Great bustard"],
            vegetation_type: "Urban forest and parkland",
            water_bodies: &["Spree River", "Havel River", "Wannsee Lake"],
        },
        urban: UrbanProfile { population: 3_645_000, traffic_congestion: 5, public_transit: 62, green_space_percent: 30, noise_level: 58, citizen_satisfaction: 74 },
        cultural_context: CulturalContext {
            primary_languages: &["German"],
            greeting_style: "Firm handshake",
            formality_level: "High",
            business_culture: "Punctual, efficient, direct",
        },
    },
    // Asia
    RegionalRecord {
        region: "Tokyo",
        country: "Japan",
        continent: "Asia",
        climate: "Humid subtropical",
        avg_temperature: SeasonalTemperature { summer: 30.0, winter: 6.0 },
        avg_humidity: 70,
        avg_rainfall: 1530,
        air_quality_index: 2,
        risk_factors: RiskFactors { flood: 50, earthquake: 90, hurricane: 60, wildfire: 10, drought: 15, heatwave: 45 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.48,
            dominant_species: &["Japanese macaque", "Tanuki", "Japanese bush warbler", "Koi"],
            threatened_species: &["Japanese giant salamander", "Crested ibis", "Amami rabbit"],
            vegetation_type: "Urban with temple gardens",
            water_bodies: &["Sumida River", "Tokyo Bay", "Tama River"],
        },
        urban: UrbanProfile { population: 13_960_000, traffic_congestion: 6, public_transit: 78, green_space_percent: 8, noise_level: 62, citizen_satisfaction: 72 },
        cultural_context: CulturalContext {
            primary_languages: &["Japanese"],
            greeting_style: "Bow (15-30 degrees)",
            formality_level: "Very High",
            business_culture: "Hierarchical, consensus-driven, group harmony",
        },
    },
    RegionalRecord {
        region: "Singapore",
        country: "Singapore",
        continent: "Asia",
        climate: "Tropical rainforest",
        avg_temperature: SeasonalTemperature { summer: 31.0, winter: 27.0 },
        avg_humidity: 84,
        avg_rainfall: 2340,
        air_quality_index: 2,
        risk_factors: RiskFactors { flood: 40, earthquake: 5, hurricane: 15, wildfire: 5, drought: 10, heatwave: 30 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.65,
            dominant_species: &["Long-tailed macaque", "Oriental pied hornbill", "Monitor lizard", "Smooth-coated otter"],
            threatened_species: &["Sunda pangolin", "Oriental small-clawed otter", "Banded leaf monkey"],
            vegetation_type: "Tropical rainforest and urban gardens",
            water_bodies: &["Marina Bay", "Singapore River", "MacRitchie Reservoir"],
        },
        urban: UrbanProfile { population: 5_686_000, traffic_congestion: 4, public_transit: 66, green_space_percent: 47, noise_level: 55, citizen_satisfaction: 82 },
        cultural_context: CulturalContext {
            primary_languages: &["English", "Mandarin", "Malay", "Tamil"],
            greeting_style: "Handshake or slight bow",
            formality_level: "Medium-High",
            business_culture: "Efficient, multicultural, professional",
        },
    },
    RegionalRecord {
        region: "Mumbai",
        country: "India",
        continent: "Asia",
        climate: "Tropical wet and dry",
        avg_temperature: SeasonalTemperature { summer: 33.0, winter: 25.0 },
        avg_humidity: 75,
        avg_rainfall: 2422,
        air_quality_index: 4,
        risk_factors: RiskFactors { flood: 75, earthquake: 40, hurricane: 35, wildfire: 10, drought: 30, heatwave: 55 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.55,
            dominant_species: &["Rhesus macaque", "Indian flying fox", "Black kite", "House crow"],
            threatened_species: &["Indian pangolin", "Rusty-spotted cat", "Indian python"],
            vegetation_type: "Tropical coastal with mangroves",
            water_bodies: &["Arabian Sea", "Mithi River", "Powai Lake"],
        },
        urban: UrbanProfile { population: 20_411_000, traffic_congestion: 10, public_transit: 38, green_space_percent: 6, noise_level: 85, citizen_satisfaction: 52 },
        cultural_context: CulturalContext {
            primary_languages: &["Hindi", "Marathi", "English"],
            greeting_style: "Namaste with folded hands",
            formality_level: "Medium",
            business_culture: "Relationship-oriented, flexible timing",
        },
    },
    RegionalRecord {
        region: "Beijing",
        country: "China",
        continent: "Asia",
        climate: "Humid continental",
        avg_temperature: SeasonalTemperature { summer: 31.0, winter: -2.0 },
        avg_humidity: 55,
        avg_rainfall: 571,
        air_quality_index: 4,
        risk_factors: RiskFactors { flood: 35, earthquake: 45, hurricane: 10, wildfire: 15, drought: 40, heatwave: 45 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.45,
            dominant_species: &["Eurasian magpie", "Chinese pond heron", "Mandarin duck", "Beijing swift"],
            threatened_species: &["Giant panda (nearby)", "Chinese alligator", "Sichuan taimen"],
            vegetation_type: "Temperate with urban parks",
            water_bodies: &["Kunming Lake", "Houhai Lake", "Beijing-Hangzhou Canal"],
        },
        urban: UrbanProfile { population: 21_540_000, traffic_congestion: 8, public_transit: 52, green_space_percent: 45, noise_level: 72, citizen_satisfaction: 64 },
        cultural_context: CulturalContext {
            primary_languages: &["Mandarin"],
            greeting_style: "Handshake or slight nod",
            formality_level: "High",
            business_culture: "Guanxi (relationships) important, hierarchical",
        },
    },
    // South America
    RegionalRecord {
        region: "São Paulo",
        country: "Brazil",
        continent: "South America",
        climate: "Humid subtropical",
        avg_temperature: SeasonalTemperature { summer: 28.0, winter: 17.0 },
        avg_humidity: 78,
        avg_rainfall: 1454,
        air_quality_index: 3,
        risk_factors: RiskFactors { flood: 60, earthquake: 5, hurricane: 5, wildfire: 25, drought: 35, heatwave: 40 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.72,
            dominant_species: &["Tufted capuchin", "Rufous-bellied thrush", "Black vulture", "Common marmoset"],
            threatened_species: &["Black lion tamarin", "Maned sloth", "Brazilian merganser"],
            vegetation_type: "Atlantic Forest fragments",
            water_bodies: &["Tietê River", "Pinheiros River", "Guarapiranga Reservoir"],
        },
        urban: UrbanProfile { population: 12_325_000, traffic_congestion: 9, public_transit: 35, green_space_percent: 12, noise_level: 78, citizen_satisfaction: 55 },
        cultural_context: CulturalContext {
            primary_languages: &["Portuguese"],
            greeting_style: "Cheek kisses and embrace",
            formality_level: "Low-Medium",
            business_culture: "Relationship-focused, flexible schedules",
        },
    },
    // Africa
    RegionalRecord {
        region: "Cairo",
        country: "Egypt",
        continent: "Africa",
        climate: "Hot desert",
        avg_temperature: SeasonalTemperature { summer: 35.0, winter: 14.0 },
        avg_humidity: 50,
        avg_rainfall: 25,
        air_quality_index: 4,
        risk_factors: RiskFactors { flood: 15, earthquake: 35, hurricane: 5, wildfire: 10, drought: 85, heatwave: 80 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.38,
            dominant_species: &["Egyptian mongoose", "Hoopoe", "White stork (migratory)", "Nile tilapia"],
            threatened_species: &["Egyptian vulture", "Slender-horned gazelle", "Nile crocodile"],
            vegetation_type: "Nile Valley cultivation and desert",
            water_bodies: &["Nile River", "Lake Nasser (nearby)"],
        },
        urban: UrbanProfile { population: 20_901_000, traffic_congestion: 9, public_transit: 25, green_space_percent: 4, noise_level: 82, citizen_satisfaction: 48 },
        cultural_context: CulturalContext {
            primary_languages: &["Arabic"],
            greeting_style: "Handshake, same-gender cheek kisses",
            formality_level: "Medium-High",
            business_culture: "Hospitality important, relationship-based",
        },
    },
    RegionalRecord {
        region: "Nairobi",
        country: "Kenya",
        continent: "Africa",
        climate: "Subtropical highland",
        avg_temperature: SeasonalTemperature { summer: 25.0, winter: 18.0 },
        avg_humidity: 65,
        avg_rainfall: 869,
        air_quality_index: 3,
        risk_factors: RiskFactors { flood: 45, earthquake: 25, hurricane: 5, wildfire: 30, drought: 55, heatwave: 35 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.85,
            dominant_species: &["Marabou stork", "Olive baboon", "Sykes monkey", "Cattle egret"],
            threatened_species: &["African elephant", "Black rhinoceros", "Grevy zebra"],
            vegetation_type: "Highland savanna and urban parks",
            water_bodies: &["Nairobi River", "Athi River", "Nairobi Dam"],
        },
        urban: UrbanProfile { population: 4_735_000, traffic_congestion: 8, public_transit: 45, green_space_percent: 18, noise_level: 72, citizen_satisfaction: 58 },
        cultural_context: CulturalContext {
            primary_languages: &["English", "Swahili"],
            greeting_style: "Handshake with eye contact",
            formality_level: "Medium",
            business_culture: "Building trust important, flexible timing",
        },
    },
    // Oceania
    RegionalRecord {
        region: "Sydney",
        country: "Australia",
        continent: "Oceania",
        climate: "Humid subtropical",
        avg_temperature: SeasonalTemperature { summer: 26.0, winter: 13.0 },
        avg_humidity: 65,
        avg_rainfall: 1213,
        air_quality_index: 1,
        risk_factors: RiskFactors { flood: 40, earthquake: 15, hurricane: 25, wildfire: 70, drought: 55, heatwave: 60 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.78,
            dominant_species: &["Sulphur-crested cockatoo", "Brushtail possum", "Australian magpie", "Rainbow lorikeet"],
            threatened_species: &["Koala", "Eastern quoll", "Southern corroboree frog"],
            vegetation_type: "Temperate eucalyptus woodland",
            water_bodies: &["Sydney Harbour", "Parramatta River", "Hawkesbury River"],
        },
        urban: UrbanProfile { population: 5_312_000, traffic_congestion: 7, public_transit: 28, green_space_percent: 46, noise_level: 62, citizen_satisfaction: 76 },
        cultural_context: CulturalContext {
            primary_languages: &["English"],
            greeting_style: "Casual handshake",
            formality_level: "Low",
            business_culture: "Egalitarian, direct, work-life balance valued",
        },
    },
    // Middle East
    RegionalRecord {
        region: "Dubai",
        country: "UAE",
        continent: "Asia",
        climate: "Hot desert",
        avg_temperature: SeasonalTemperature { summer: 41.0, winter: 20.0 },
        avg_humidity: 60,
        avg_rainfall: 94,
        air_quality_index: 3,
        risk_factors: RiskFactors { flood: 20, earthquake: 20, hurricane: 15, wildfire: 5, drought: 90, heatwave: 95 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.35,
            dominant_species: &["Arabian oryx (reintroduced)", "Sand gazelle", "Greater flamingo", "Desert monitor"],
            threatened_species: &["Arabian leopard", "Hawksbill turtle", "Socotra cormorant"],
            vegetation_type: "Desert with coastal mangroves",
            water_bodies: &["Persian Gulf", "Dubai Creek", "Artificial lakes"],
        },
        urban: UrbanProfile { population: 3_331_000, traffic_congestion: 6, public_transit: 18, green_space_percent: 8, noise_level: 65, citizen_satisfaction: 78 },
        cultural_context: CulturalContext {
            primary_languages: &["Arabic", "English"],
            greeting_style: "Handshake (same gender), hand on heart",
            formality_level: "High",
            business_culture: "Relationship-focused, hospitality important",
        },
    },
    // Ecosystem regions
    RegionalRecord {
        region: "Amazon Rainforest",
        country: "Brazil",
        continent: "South America",
        climate: "Tropical rainforest",
        avg_temperature: SeasonalTemperature { summer: 32.0, winter: 26.0 },
        avg_humidity: 88,
        avg_rainfall: 2300,
        air_quality_index: 1,
        risk_factors: RiskFactors { flood: 70, earthquake: 5, hurricane: 5, wildfire: 45, drought: 25, heatwave: 20 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.98,
            dominant_species: &["Jaguar", "Harpy eagle", "Poison dart frog", "Anaconda", "Scarlet macaw", "Pink river dolphin"],
            threatened_species: &["Giant otter", "Golden lion tamarin", "Amazonian manatee", "Hyacinth macaw"],
            vegetation_type: "Tropical rainforest with multiple canopy layers",
            water_bodies: &["Amazon River", "Negro River", "Tapajós River"],
        },
        urban: UrbanProfile { population: 50_000, traffic_congestion: 1, public_transit: 5, green_space_percent: 98, noise_level: 45, citizen_satisfaction: 70 },
        cultural_context: CulturalContext {
            primary_languages: &["Portuguese", "Indigenous languages"],
            greeting_style: "Varies by indigenous group",
            formality_level: "Low",
            business_culture: "Community-oriented",
        },
    },
    RegionalRecord {
        region: "Yellowstone",
        country: "USA",
        continent: "North America",
        climate: "Semi-arid to continental",
        avg_temperature: SeasonalTemperature { summer: 22.0, winter: -8.0 },
        avg_humidity: 45,
        avg_rainfall: 490,
        air_quality_index: 1,
        risk_factors: RiskFactors { flood: 25, earthquake: 55, hurricane: 5, wildfire: 65, drought: 40, heatwave: 25 },
        ecosystem: EcosystemProfile {
            biodiversity_index: 0.92,
            dominant_species: &["American bison", "Gray wolf", "Grizzly bear", "Elk", "Trumpeter swan", "Cutthroat trout"],
            threatened_species: &["Lynx", "Wolverine", "Yellowstone cutthroat trout"],
            vegetation_type: "Subalpine coniferous forest and meadows",
            water_bodies: &["Yellowstone Lake", "Yellowstone River", "Geothermal features"],
        },
        urban: UrbanProfile { population: 5_000, traffic_congestion: 2, public_transit: 5, green_space_percent: 99, noise_level: 30, citizen_satisfaction: 85 },
        cultural_context: CulturalContext {
            primary_languages: &["English"],
            greeting_style: "Friendly wave",
            formality_level: "Very Low",
            business_culture: "Conservation-focused",
        },
    },
];
