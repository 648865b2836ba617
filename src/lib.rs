//! Eco Feature Server
//!
//! Backend for ten AI showcase features. Each feature takes a loosely-typed
//! form submission, resolves a region from it, enriches the request with
//! weather, text-inference and generative-model calls, and always returns a
//! payload, falling back to templated regional data when upstreams fail.
//!
//! - `catalog/`: the ten features and their input schemas
//! - `form/` + `completeness/`: submissions and how complete they are
//! - `regions/`: the built-in regional dataset and resolver
//! - `adapters/`: upstream clients, offline fallbacks and the score source
//! - `processors/`: one module per feature plus the router
//! - `api_server`: axum HTTP surface (feature `api`)

pub mod adapters;
pub mod catalog;
pub mod completeness;
pub mod config;
pub mod form;
pub mod processors;
pub mod regions;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{FeatureId, FeatureSpec, InvalidFeatureId};
pub use completeness::{assess, CompletenessResult};
pub use config::AppConfig;
pub use form::{FieldValue, FormSubmission, UploadedFile};
pub use processors::{FeatureContext, FeatureResult, FeatureRouter, RouteError};
pub use regions::{RegionResolver, RegionalRecord};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
