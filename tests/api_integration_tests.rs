// API Integration Tests
//
// Purpose: Exercise every endpoint in-process against offline adapters
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;

    use async_trait::async_trait;
    use eco_feature_server::adapters::{FixedScorer, GenerationError, Generator};
    use eco_feature_server::{
        create_router, AppConfig, AppState, FeatureContext, UploadedFile,
    };
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    const BOUNDARY: &str = "ecoFeatureBoundary7MA4YWxk";

    // Helper: offline, deterministic, no simulated latency
    fn create_test_app() -> axum::Router {
        let config = AppConfig {
            simulate_latency: false,
            offline_mode: true,
            deterministic_scores: true,
            ..AppConfig::default()
        };
        create_router(AppState::new(config))
    }

    /// Vision stand-in that names the upload it was given
    struct NamingGenerator;

    #[async_trait]
    impl Generator for NamingGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Offline)
        }

        async fn describe_image(
            &self,
            image: &UploadedFile,
            _prompt: &str,
        ) -> Result<String, GenerationError> {
            Ok(format!("{} ({})", image.filename, image.content_type))
        }
    }

    // Helper: offline app whose vision model reports what it received
    fn create_vision_app() -> axum::Router {
        let config = AppConfig {
            simulate_latency: false,
            offline_mode: true,
            deterministic_scores: true,
            ..AppConfig::default()
        };
        let ctx = FeatureContext::offline(Arc::new(FixedScorer::midpoint()))
            .with_generator(Arc::new(NamingGenerator));
        create_router(AppState::with_context(config, ctx))
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, &'a [u8]),
        /// Binary part with a content type but no filename
        Blob(&'a str, &'a str, &'a [u8]),
    }

    // Helper: hand-built multipart/form-data body
    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, filename, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
                Part::Blob(name, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn post_feature(id: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/features/{}", id))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Feature Catalog
    // =========================================================================

    #[tokio::test]
    async fn test_list_features() {
        let response = create_test_app().oneshot(get("/features")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        let features = body.as_array().unwrap();
        assert_eq!(features.len(), 10);
        assert_eq!(features[0]["id"], 1);
        assert_eq!(features[0]["inputCount"], 9);
        assert_eq!(features[9]["id"], 10);
    }

    #[tokio::test]
    async fn test_get_feature_schema() {
        let response = create_test_app().oneshot(get("/features/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["title"], "Multimodal Crisis Predictor & Planner");
        let inputs = body["inputs"].as_array().unwrap();
        assert_eq!(inputs.len(), 9);
        assert_eq!(inputs[0]["name"], "input_0");
        assert_eq!(inputs[0]["location"], true);
        assert_eq!(inputs[2]["kind"], "file");
        assert_eq!(inputs[2]["accept"], "image/*");
    }

    #[tokio::test]
    async fn test_get_feature_invalid_id() {
        for uri in ["/features/0", "/features/11", "/features/abc"] {
            let response = create_test_app().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    // =========================================================================
    // Section 3: Feature Submission
    // =========================================================================

    #[tokio::test]
    async fn test_submit_crisis_feature() {
        let request = post_feature("1", &[Part::Text("input_0", "Tokyo, Japan")]);
        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Analysis completed successfully");
        assert_eq!(body["data"]["_inputPercentage"], 11);
        assert!(body["data"]["alertMessage"].is_string());
        assert_eq!(body["data"]["resourceTable"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_with_file_upload() {
        let request = post_feature(
            "2",
            &[
                Part::Text("input_0", "Nairobi, Kenya"),
                Part::File("input_1", "drone.jpg", "image/jpeg", &[0xff, 0xd8, 0xff, 0xe0]),
            ],
        );
        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["speciesList"].is_array());
        // Both the text and the file count
        let warning = body["data"]["_inputWarning"].as_str().unwrap();
        assert!(warning.contains("You provided 2 out of"));
    }

    #[tokio::test]
    async fn test_upload_without_filename_is_kept_as_file() {
        let request = post_feature(
            "2",
            &[
                Part::Text("input_0", "Nairobi, Kenya"),
                Part::Blob("drone_image", "image/png", &[0x89, 0x50, 0x4e, 0x47]),
            ],
        );
        let response = create_vision_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["data"]["imageInsights"], "drone_image (image/png)");
    }

    #[tokio::test]
    async fn test_declared_text_field_stays_text() {
        // input_0 of feature 1 is a text field even though its label mentions imagery
        let request = post_feature(
            "1",
            &[Part::Blob("input_0", "application/octet-stream", b"Tokyo, Japan")],
        );
        let response = create_vision_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert!(body["data"]["alertMessage"].as_str().unwrap().contains("Tokyo"));
        assert!(body["data"].get("imageInsights").is_none());
    }

    #[tokio::test]
    async fn test_submit_invalid_feature_id() {
        for id in ["0", "11", "abc"] {
            let request = post_feature(id, &[Part::Text("input_0", "Tokyo")]);
            let response = create_test_app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: Value = json_response(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Invalid feature ID");
        }
    }

    #[tokio::test]
    async fn test_submit_without_inputs() {
        let request = post_feature(
            "3",
            &[Part::Text("input_0", "   "), Part::Text("_targetLanguages", "es")],
        );
        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = json_response(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No inputs provided");
    }

    #[tokio::test]
    async fn test_submit_non_multipart_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/features/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"input_0": "Tokyo"}"#))
            .unwrap();
        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = json_response(response).await;
        assert_eq!(body["success"], false);
        assert!(body["details"].is_string());
    }
}
