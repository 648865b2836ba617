//! Feature Processors
//!
//! Every processor runs the same sequence:
//! 1. completeness of the submission
//! 2. simulated inference latency for the feature
//! 3. region resolution (location fields or all text, per the catalog)
//! 4. adapter calls for the feature's theme
//! 5. one guarded generation attempt with a templated fallback
//! 6. merge into the payload, annotated with `_inputWarning`/`_inputPercentage`
//!
//! Any error escaping step 4-6 is logged and replaced with a minimal payload
//! built from the regional record alone, so a processor always returns a
//! result.

pub mod bio_lab;
pub mod charts;
pub mod crisis;
pub mod ecosystem;
pub mod education;
pub mod emotion;
pub mod hypothesis;
pub mod pattern_explorer;
pub mod router;
pub mod translator;
pub mod urban_twin;
pub mod world_builder;

use std::sync::Arc;

use anyhow::bail;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::adapters::{
    FixedScorer, GeminiClient, Generator, HuggingFaceClient, LatencySimulator, OfflineGenerator,
    OfflineInference, OfflineWeather, OpenWeatherClient, RandomScorer, Scorer, TextInference,
    WeatherProvider,
};
use crate::catalog::{FeatureId, FeatureSpec, RegionScope};
use crate::completeness::{assess, CompletenessResult};
use crate::config::AppConfig;
use crate::form::FormSubmission;
use crate::regions::{RegionResolver, RegionalRecord};

pub use router::{FeatureRouter, RouteError};

/// Everything a processor may call. Cheap to clone; shared read-only across requests.
#[derive(Clone)]
pub struct FeatureContext {
    pub resolver: RegionResolver<'static>,
    pub weather: Arc<dyn WeatherProvider>,
    pub inference: Arc<dyn TextInference>,
    pub generator: Arc<dyn Generator>,
    pub scorer: Arc<dyn Scorer>,
    pub latency: LatencySimulator,
}

impl FeatureContext {
    /// Live adapters, or offline ones when `offline_mode` is set
    pub fn from_config(config: &AppConfig) -> Self {
        let scorer: Arc<dyn Scorer> = if config.deterministic_scores {
            Arc::new(FixedScorer::midpoint())
        } else {
            Arc::new(RandomScorer)
        };
        let latency = LatencySimulator::new(config.simulate_latency, scorer.clone());

        if config.offline_mode {
            return Self {
                latency,
                ..Self::offline(scorer)
            };
        }

        let http = reqwest::Client::new();
        Self {
            resolver: RegionResolver::builtin(),
            weather: Arc::new(OpenWeatherClient::new(
                http.clone(),
                &config.openweather_base_url,
                config.openweather_api_key.clone(),
            )),
            inference: Arc::new(HuggingFaceClient::new(
                http.clone(),
                &config.hf_api_url,
                config.huggingface_api_key.clone(),
            )),
            generator: Arc::new(GeminiClient::new(
                http,
                &config.gemini_base_url,
                config.gemini_api_key.clone(),
                &config.gemini_model,
                &config.gemini_vision_model,
            )),
            scorer,
            latency,
        }
    }

    /// Fallback-only adapters, no simulated latency
    pub fn offline(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            resolver: RegionResolver::builtin(),
            weather: Arc::new(OfflineWeather),
            inference: Arc::new(OfflineInference),
            generator: Arc::new(OfflineGenerator),
            latency: LatencySimulator::disabled(scorer.clone()),
            scorer,
        }
    }

    pub fn with_weather(mut self, weather: Arc<dyn WeatherProvider>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_inference(mut self, inference: Arc<dyn TextInference>) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = generator;
        self
    }
}

/// Feature payload: the two completeness annotations plus feature-specific keys
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureResult {
    #[serde(rename = "_inputWarning")]
    pub input_warning: Option<String>,
    #[serde(rename = "_inputPercentage")]
    pub input_percentage: u32,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl FeatureResult {
    pub fn new(completeness: &CompletenessResult, data: Map<String, Value>) -> Self {
        Self {
            input_warning: completeness.warning_message.clone(),
            input_percentage: completeness.percentage,
            data,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Serialize a payload struct into its key map
pub fn to_map<T: Serialize>(payload: &T) -> anyhow::Result<Map<String, Value>> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => bail!("payload serialized to a non-object: {}", other),
    }
}

/// Steps 1-3 of a processor run
pub struct Prepared {
    pub feature: FeatureId,
    pub spec: &'static FeatureSpec,
    pub completeness: CompletenessResult,
    pub location: String,
    pub text: String,
    pub region: &'static RegionalRecord,
}

impl Prepared {
    pub async fn begin(ctx: &FeatureContext, feature: FeatureId, form: &FormSubmission) -> Self {
        let spec = feature.spec();
        let completeness = assess(form, spec.total_inputs());

        ctx.latency.pause(spec.latency_ms).await;

        let location = form.extract_location(spec);
        let text = form.text_content();
        let region = match spec.scope {
            RegionScope::Geographic => ctx.resolver.resolve(&location),
            RegionScope::Textual => ctx.resolver.resolve(&text),
        };

        info!(
            feature = feature.number(),
            region = region.region,
            filled = completeness.filled_count,
            total = completeness.total_count,
            "processing feature"
        );

        Self {
            feature,
            spec,
            completeness,
            location,
            text,
            region,
        }
    }

    /// Submitted text, or `default` when nothing was typed
    pub fn text_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.text.is_empty() {
            default
        } else {
            &self.text
        }
    }

    /// Step 6, or step 7 when the analysis failed
    pub fn finish<T, B>(&self, outcome: anyhow::Result<T>, baseline: impl FnOnce() -> B) -> FeatureResult
    where
        T: Serialize,
        B: Serialize,
    {
        let data = outcome.and_then(|payload| to_map(&payload));
        let data = match data {
            Ok(map) => map,
            Err(e) => {
                error!(
                    feature = self.feature.number(),
                    region = self.region.region,
                    error = ?e,
                    "analysis failed, returning regional baseline"
                );
                to_map(&baseline()).unwrap_or_default()
            }
        };
        FeatureResult::new(&self.completeness, data)
    }
}

/// Describe an uploaded image with the vision model, if one was supplied
pub async fn image_insights(
    ctx: &FeatureContext,
    form: &FormSubmission,
    spec: &FeatureSpec,
    prompt: &str,
) -> Option<String> {
    let image = form.image_input(spec)?;
    match ctx.generator.describe_image(image, prompt).await {
        Ok(description) => Some(description),
        Err(e) => {
            warn!(filename = %image.filename, error = %e, "image description unavailable");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub fn offline_context() -> FeatureContext {
        FeatureContext::offline(Arc::new(FixedScorer::midpoint()))
    }

    /// Steps 1-3 for `feature`, driven to completion on a local runtime
    pub fn prepared(ctx: &FeatureContext, feature: FeatureId, form: &FormSubmission) -> Prepared {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(Prepared::begin(ctx, feature, form))
    }

    pub fn failed<T>() -> anyhow::Result<T> {
        Err(anyhow::anyhow!("upstream unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{offline_context, prepared as prepared_for};
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Demo {
        alert_message: &'static str,
    }

    fn prepared(form: FormSubmission) -> Prepared {
        prepared_for(&offline_context(), FeatureId::CrisisPredictor, &form)
    }

    #[test]
    fn test_result_serializes_annotations_first_class() {
        let prep = prepared(FormSubmission::new().with_text("input_0", "Tokyo, Japan"));
        let result = prep.finish(Ok(Demo { alert_message: "ok" }), || json!({}));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["_inputPercentage"], 11);
        assert!(value["_inputWarning"].as_str().unwrap().contains("1 out of 9"));
        assert_eq!(value["alertMessage"], "ok");
        assert_eq!(prep.region.region, "Tokyo");
    }

    #[test]
    fn test_failed_analysis_uses_baseline() {
        let prep = prepared(FormSubmission::new().with_text("input_0", "Cairo"));
        let outcome: anyhow::Result<Demo> = Err(anyhow::anyhow!("boom"));
        let result = prep.finish(outcome, || json!({ "alertMessage": "baseline" }));
        assert_eq!(result.get("alertMessage"), Some(&json!("baseline")));
        assert_eq!(result.input_percentage, 11);
    }

    #[test]
    fn test_non_object_payload_is_an_error() {
        assert!(to_map(&vec![1, 2]).is_err());
        assert!(to_map(&json!({ "a": 1 })).is_ok());
    }

    #[test]
    fn test_complete_submission_has_null_warning() {
        let mut form = FormSubmission::new();
        for i in 0..9 {
            form.push_text(format!("input_{}", i), "Tokyo");
        }
        let prep = prepared(form);
        let result = prep.finish(Ok(json!({})), || json!({}));
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["_inputWarning"].is_null());
        assert_eq!(value["_inputPercentage"], 100);
    }
}
