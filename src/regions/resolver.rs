//! Region Resolver
//!
//! Maps free text to the best-matching regional record. Total: every input
//! resolves to some record.
//!
//! Precedence:
//! 1. region or country name is a substring of the input (table order)
//! 2. a continent keyword is present → first record on that continent
//! 3. a climate keyword is present → first record with that climate
//! 4. the first record in the table

use thiserror::Error;

use super::dataset::{RegionalRecord, CLIMATE_KEYWORDS, CONTINENT_KEYWORDS, REGIONS};

pub type KeywordTable<'a> = &'a [(&'a str, &'a [&'a str])];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolverError {
    #[error("region table is empty")]
    EmptyDataset,
}

/// Read-only resolver over an injected region table
#[derive(Debug, Clone, Copy)]
pub struct RegionResolver<'a> {
    regions: &'a [RegionalRecord],
    continent_keywords: KeywordTable<'a>,
    climate_keywords: KeywordTable<'a>,
}

impl<'a> RegionResolver<'a> {
    /// Build a resolver over a custom table. The first record is the default.
    pub fn new(
        regions: &'a [RegionalRecord],
        continent_keywords: KeywordTable<'a>,
        climate_keywords: KeywordTable<'a>,
    ) -> Result<Self, ResolverError> {
        if regions.is_empty() {
            return Err(ResolverError::EmptyDataset);
        }
        Ok(Self {
            regions,
            continent_keywords,
            climate_keywords,
        })
    }

    /// Record returned when nothing matches
    pub fn default_region(&self) -> &'a RegionalRecord {
        &self.regions[0]
    }

    pub fn resolve(&self, input: &str) -> &'a RegionalRecord {
        let lower = input.to_lowercase();

        // Direct name match
        if let Some(region) = self.regions.iter().find(|r| {
            lower.contains(&r.region.to_lowercase()) || lower.contains(&r.country.to_lowercase())
        }) {
            return region;
        }

        // Continent keywords
        for (continent, keywords) in self.continent_keywords {
            if keywords.iter().any(|k| lower.contains(k)) {
                if let Some(region) = self.regions.iter().find(|r| r.continent == *continent) {
                    return region;
                }
            }
        }

        // Climate keywords
        for (climate, keywords) in self.climate_keywords {
            if keywords.iter().any(|k| lower.contains(k)) {
                if let Some(region) = self.regions.iter().find(|r| r.climate == *climate) {
                    return region;
                }
            }
        }

        self.default_region()
    }
}

impl RegionResolver<'static> {
    /// Resolver over the embedded dataset
    pub fn builtin() -> Self {
        Self {
            regions: REGIONS,
            continent_keywords: CONTINENT_KEYWORDS,
            climate_keywords: CLIMATE_KEYWORDS,
        }
    }
}

impl Default for RegionResolver<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(input: &str) -> &'static str {
        RegionResolver::builtin().resolve(input).region
    }

    #[test]
    fn test_direct_region_match() {
        assert_eq!(resolve("Tokyo, Japan"), "Tokyo");
        assert_eq!(resolve("downtown SINGAPORE"), "Singapore");
        assert_eq!(resolve("São Paulo"), "São Paulo");
    }

    #[test]
    fn test_country_match() {
        assert_eq!(resolve("somewhere in Kenya"), "Nairobi");
        assert_eq!(resolve("Lyon, France"), "Paris");
    }

    #[test]
    fn test_first_in_table_order_wins() {
        assert_eq!(resolve("New York via London"), "New York");
        assert_eq!(resolve("London via New York"), "New York");
    }

    #[test]
    fn test_continent_keywords() {
        assert_eq!(resolve("Madrid, Spain"), "London");
        assert_eq!(resolve("Seoul, Korea"), "Tokyo");
        assert_eq!(resolve("Wellington, New Zealand"), "Sydney");
        assert_eq!(resolve("Lagos, Nigeria"), "Cairo");
    }

    #[test]
    fn test_earlier_continent_keyword_shadows_later() {
        // "america" is a North America keyword and is checked first
        assert_eq!(resolve("Lima, south america"), "New York");
    }

    #[test]
    fn test_climate_keywords() {
        assert_eq!(resolve("deep jungle"), "Singapore");
        assert_eq!(resolve("sahara"), "Cairo");
        assert_eq!(resolve("mediterranean coast"), "Los Angeles");
    }

    #[test]
    fn test_default_region() {
        assert_eq!(resolve("xyz"), "New York");
        assert_eq!(resolve(""), "New York");
    }

    #[test]
    fn test_idempotent() {
        let resolver = RegionResolver::builtin();
        assert_eq!(resolver.resolve("Cairo"), resolver.resolve("Cairo"));
    }

    #[test]
    fn test_custom_table() {
        let regions = &REGIONS[2..5];
        let resolver = RegionResolver::new(regions, CONTINENT_KEYWORDS, &[]).unwrap();
        assert_eq!(resolver.resolve("nowhere").region, "London");
        assert_eq!(resolver.resolve("Tokyo").region, "London");
        assert_eq!(resolver.resolve("Berlin").region, "Berlin");
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = RegionResolver::new(&[], CONTINENT_KEYWORDS, CLIMATE_KEYWORDS).unwrap_err();
        assert_eq!(err, ResolverError::EmptyDataset);
    }
}
