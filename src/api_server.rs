// Axum API Server Module
//
// Purpose: HTTP surface for the ten feature processors
// Endpoints: /health, /features, /features/:id (GET schema, POST multipart)

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{FeatureId, FeatureSpec, InputKind, NamedInput};
use crate::config::AppConfig;
use crate::form::{FieldValue, FormSubmission, UploadedFile};
use crate::processors::{FeatureContext, FeatureResult, FeatureRouter, RouteError};

/// Upper bound for a whole multipart submission (images included)
pub const MAX_SUBMISSION_BYTES: usize = 20 * 1024 * 1024;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<FeatureRouter>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        tracing::info!("Initializing feature adapters...");
        let ctx = FeatureContext::from_config(&config);
        Self::with_context(config, ctx)
    }

    /// State around an already-built context (tests, custom adapters)
    pub fn with_context(config: AppConfig, ctx: FeatureContext) -> Self {
        Self {
            router: Arc::new(FeatureRouter::new(ctx)),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Feature catalog
        .route("/features", get(list_features))

        // Schema lookup + submission share one path
        .route("/features/:id", get(get_feature).post(process_feature))

        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureSummary {
    id: u32,
    title: &'static str,
    emoji: &'static str,
    description: &'static str,
    input_count: usize,
}

async fn list_features() -> Json<Vec<FeatureSummary>> {
    let features = FeatureId::ALL
        .iter()
        .map(|feature| {
            let spec = feature.spec();
            FeatureSummary {
                id: spec.id,
                title: spec.title,
                emoji: spec.emoji,
                description: spec.description,
                input_count: spec.total_inputs(),
            }
        })
        .collect();
    Json(features)
}

#[derive(Debug, Serialize)]
struct FeatureSchema {
    id: u32,
    title: &'static str,
    emoji: &'static str,
    description: &'static str,
    inputs: Vec<NamedInput>,
}

async fn get_feature(Path(id): Path<String>) -> Result<Json<FeatureSchema>, AppError> {
    let spec = parse_feature_id(&id)?.spec();
    Ok(Json(FeatureSchema {
        id: spec.id,
        title: spec.title,
        emoji: spec.emoji,
        description: spec.description,
        inputs: spec.named_inputs(),
    }))
}

#[derive(Debug, Serialize)]
struct FeatureResponse {
    success: bool,
    data: FeatureResult,
    message: &'static str,
}

async fn process_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FeatureResponse>, AppError> {
    let feature = parse_feature_id(&id)?;

    let multipart = multipart.map_err(|e| {
        AppError::BadRequest("Invalid form submission".to_string(), Some(e.body_text()))
    })?;
    let form = read_submission(multipart, feature.spec()).await?;

    if form.filled_count() == 0 {
        return Err(AppError::BadRequest("No inputs provided".to_string(), None));
    }

    tracing::info!(
        feature = feature.number(),
        fields = form.len(),
        "processing submission"
    );

    // Processor panics become a 500
    let router = state.router.clone();
    let data = tokio::spawn(async move { router.route(feature.number(), &form).await })
        .await
        .map_err(|e| {
            tracing::error!(feature = feature.number(), error = %e, "processor task failed");
            AppError::Internal("Failed to process feature".to_string(), Some(e.to_string()))
        })??;

    Ok(Json(FeatureResponse {
        success: true,
        data,
        message: "Analysis completed successfully",
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Numeric id in 1..=10
fn parse_feature_id(raw: &str) -> Result<FeatureId, AppError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|id| FeatureId::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid feature ID".to_string(), None))
}

/// Parts with a filename become uploads, everything else text
async fn read_submission(
    mut multipart: Multipart,
    spec: &FeatureSpec,
) -> Result<FormSubmission, AppError> {
    let mut form = FormSubmission::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = read_field(field, spec, &name).await.map_err(malformed)?;
        form.insert(name, value);
    }
    Ok(form)
}

async fn read_field(
    field: Field<'_>,
    spec: &FeatureSpec,
    name: &str,
) -> Result<FieldValue, MultipartError> {
    match upload_filename(spec, name, field.file_name(), field.content_type()) {
        Some(filename) => {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            Ok(FieldValue::File(UploadedFile::from_bytes(
                filename,
                content_type,
                &bytes,
            )))
        }
        None => Ok(FieldValue::Text(field.text().await?)),
    }
}

/// Filename to store a part under, or `None` for a text part.
///
/// Some clients drop the filename on uploads. A part without one is still a
/// file when its field is file-kind (by schema, or by label keywords for
/// undeclared names) and it carries a non-text content type. The field name
/// stands in for the filename.
fn upload_filename(
    spec: &FeatureSpec,
    name: &str,
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Option<String> {
    if let Some(file_name) = file_name {
        return Some(file_name.to_string());
    }
    let binary = content_type.is_some_and(|ct| !ct.starts_with("text/"));
    (binary && spec.kind_of(name) == InputKind::File).then(|| name.to_string())
}

fn malformed(e: MultipartError) -> AppError {
    tracing::warn!(error = %e, "malformed multipart body");
    AppError::BadRequest("Invalid form submission".to_string(), Some(e.body_text()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    /// Message plus optional details
    BadRequest(String, Option<String>),
    Internal(String, Option<String>),
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::InvalidFeature(_) => {
                AppError::BadRequest("Invalid feature ID".to_string(), Some(e.to_string()))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, details) = match self {
            AppError::BadRequest(msg, details) => (StatusCode::BAD_REQUEST, msg, details),
            AppError::Internal(msg, details) => (StatusCode::INTERNAL_SERVER_ERROR, msg, details),
        };

        let mut body = json!({
            "success": false,
            "error": message
        });
        if let (Some(details), Value::Object(map)) = (details, &mut body) {
            map.insert("details".to_string(), Value::String(details));
        }

        (status, Json(body)).into_response()
    }
}
