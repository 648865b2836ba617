//! Feature Router
//!
//! Maps a numeric feature id to its processor. The id is validated once
//! here; processors never see an out-of-range id.

use std::time::Instant;

use thiserror::Error;
use tracing::info;

use super::{
    bio_lab, crisis, ecosystem, education, emotion, hypothesis, pattern_explorer, translator,
    urban_twin, world_builder, FeatureContext, FeatureResult,
};
use crate::catalog::{FeatureId, InvalidFeatureId};
use crate::form::FormSubmission;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error(transparent)]
    InvalidFeature(#[from] InvalidFeatureId),
}

#[derive(Clone)]
pub struct FeatureRouter {
    ctx: FeatureContext,
}

impl FeatureRouter {
    pub fn new(ctx: FeatureContext) -> Self {
        Self { ctx }
    }

    pub async fn route(&self, id: u32, form: &FormSubmission) -> Result<FeatureResult, RouteError> {
        let feature = FeatureId::try_from(id)?;
        Ok(self.run(feature, form).await)
    }

    pub async fn run(&self, feature: FeatureId, form: &FormSubmission) -> FeatureResult {
        let started = Instant::now();
        let ctx = &self.ctx;

        let result = match feature {
            FeatureId::CrisisPredictor => crisis::process(ctx, form).await,
            FeatureId::EcosystemAnalyzer => ecosystem::process(ctx, form).await,
            FeatureId::EmotionScanner => emotion::process(ctx, form).await,
            FeatureId::WorldBuilder => world_builder::process(ctx, form).await,
            FeatureId::HypothesisGenerator => hypothesis::process(ctx, form).await,
            FeatureId::Translator => translator::process(ctx, form).await,
            FeatureId::UrbanTwin => urban_twin::process(ctx, form).await,
            FeatureId::BioLab => bio_lab::process(ctx, form).await,
            FeatureId::Education => education::process(ctx, form).await,
            FeatureId::PatternExplorer => pattern_explorer::process(ctx, form).await,
        };

        info!(
            feature = feature.number(),
            keys = result.data.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "feature processed"
        );
        result
    }
}
