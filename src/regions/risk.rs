//! Regional risk summary and species observations derived from a record

use serde::Serialize;

use super::dataset::RegionalRecord;
use crate::adapters::scorer::Scorer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalRisk {
    pub overall_risk: u32,
    pub risk_level: &'static str,
    /// Top three factor names, capitalised
    pub primary_risks: Vec<String>,
}

pub fn regional_risk(region: &RegionalRecord) -> RegionalRisk {
    let factors = region.risk_factors.entries();
    let total: u32 = factors.iter().map(|(_, v)| v).sum();
    let overall_risk = (total as f64 / factors.len() as f64).round() as u32;

    let risk_level = match overall_risk {
        r if r > 60 => "Critical",
        r if r > 45 => "High",
        r if r > 30 => "Moderate",
        _ => "Low",
    };

    // Stable sort keeps declaration order on ties
    let mut sorted = factors.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let primary_risks = sorted
        .iter()
        .take(3)
        .map(|(name, _)| capitalize(name))
        .collect();

    RegionalRisk {
        overall_risk,
        risk_level,
        primary_risks,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesObservation {
    pub name: String,
    pub status: &'static str,
    pub confidence: f64,
    pub count: u32,
}

/// Four dominant species followed by two threatened ones
pub fn species_data(region: &RegionalRecord, scorer: &dyn Scorer) -> Vec<SpeciesObservation> {
    let eco = &region.ecosystem;
    let stable = eco.dominant_species.iter().take(4).map(|name| SpeciesObservation {
        name: name.to_string(),
        status: "Stable",
        confidence: scorer.uniform(0.85, 0.99),
        count: scorer.integer(50, 550) as u32,
    });
    let threatened = eco.threatened_species.iter().take(2).map(|name| SpeciesObservation {
        name: name.to_string(),
        status: "Threatened",
        confidence: scorer.uniform(0.75, 0.90),
        count: scorer.integer(5, 55) as u32,
    });
    stable.chain(threatened).collect()
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scorer::FixedScorer;
    use crate::regions::RegionResolver;

    #[test]
    fn test_tokyo_risk() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let risk = regional_risk(tokyo);
        // (50 + 90 + 60 + 10 + 15 + 45) / 6 = 45
        assert_eq!(risk.overall_risk, 45);
        assert_eq!(risk.risk_level, "Moderate");
        assert_eq!(risk.primary_risks, vec!["Earthquake", "Hurricane", "Flood"]);
    }

    #[test]
    fn test_dubai_risk() {
        let dubai = RegionResolver::builtin().resolve("Dubai");
        let risk = regional_risk(dubai);
        // 245 / 6 = 40.8
        assert_eq!(risk.overall_risk, 41);
        assert_eq!(risk.risk_level, "Moderate");
        assert_eq!(risk.primary_risks, vec!["Heatwave", "Drought", "Flood"]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        // Berlin: flood 30, heatwave 30, drought 20
        let berlin = RegionResolver::builtin().resolve("Berlin");
        let risk = regional_risk(berlin);
        assert_eq!(risk.primary_risks, vec!["Flood", "Heatwave", "Drought"]);
    }

    #[test]
    fn test_species_data_shape() {
        let amazon = RegionResolver::builtin().resolve("Amazon Rainforest");
        let species = species_data(amazon, &FixedScorer::midpoint());
        assert_eq!(species.len(), 6);
        assert_eq!(species[0].name, "Jaguar");
        assert!(species[..4].iter().all(|s| s.status == "Stable"));
        assert!(species[4..].iter().all(|s| s.status == "Threatened"));
        assert_eq!(species[0].count, 300);
        assert_eq!(species[5].count, 30);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("wildfire"), "Wildfire");
        assert_eq!(capitalize(""), "");
    }
}
