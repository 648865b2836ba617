//! Regional data: the embedded dataset, the free-text resolver and
//! derived risk/species summaries.

pub mod dataset;
pub mod resolver;
pub mod risk;

pub use dataset::{
    CulturalContext, EcosystemProfile, RegionalRecord, RiskFactors,
    SeasonalTemperature, UrbanProfile, REGIONS,
};
pub use resolver::{RegionResolver, ResolverError};
pub use risk::{regional_risk, species_data, RegionalRisk, SpeciesObservation};
