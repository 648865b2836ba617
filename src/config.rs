//! Environment-driven configuration

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_vision_model: String,
    pub hf_api_url: String,
    pub huggingface_api_key: Option<String>,
    /// Sleep for each feature's latency window before processing
    pub simulate_latency: bool,
    /// Skip every upstream call and take the fallback path
    pub offline_mode: bool,
    /// Use the fixed midpoint scorer instead of the RNG
    pub deterministic_scores: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            openweather_api_key: None,
            openweather_base_url: "https://api.openweathermap.org".to_string(),
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-pro".to_string(),
            gemini_vision_model: "gemini-pro-vision".to_string(),
            hf_api_url: "https://api-inference.huggingface.co/models".to_string(),
            huggingface_api_key: None,
            simulate_latency: true,
            offline_mode: false,
            deterministic_scores: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source; unset or blank values keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            openweather_base_url: get("OPENWEATHER_BASE_URL")
                .unwrap_or(defaults.openweather_base_url),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_vision_model: get("GEMINI_VISION_MODEL")
                .unwrap_or(defaults.gemini_vision_model),
            hf_api_url: get("HF_API_URL").unwrap_or(defaults.hf_api_url),
            huggingface_api_key: get("HUGGINGFACE_API_KEY"),
            simulate_latency: get("SIMULATE_LATENCY")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.simulate_latency),
            offline_mode: get("OFFLINE_MODE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.offline_mode),
            deterministic_scores: get("DETERMINISTIC_SCORES")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.deterministic_scores),
        }
    }

    /// One-line summary for the startup log, keys redacted
    pub fn summary(&self) -> String {
        fn key_state(key: &Option<String>) -> &'static str {
            if key.is_some() {
                "set"
            } else {
                "unset"
            }
        }
        format!(
            "port={} weather_key={} gemini_key={} hf_key={} model={} simulate_latency={} offline={} deterministic={}",
            self.port,
            key_state(&self.openweather_api_key),
            key_state(&self.gemini_api_key),
            key_state(&self.huggingface_api_key),
            self.gemini_model,
            self.simulate_latency,
            self.offline_mode,
            self.deterministic_scores,
        )
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert!(config.openweather_api_key.is_none());
        assert!(config.simulate_latency);
        assert!(!config.offline_mode);
        assert_eq!(config.gemini_model, "gemini-pro");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("OPENWEATHER_API_KEY", "abc"),
            ("SIMULATE_LATENCY", "false"),
            ("OFFLINE_MODE", "1"),
            ("GEMINI_API_KEY", "  "),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.openweather_api_key.as_deref(), Some("abc"));
        assert!(!config.simulate_latency);
        assert!(config.offline_mode);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_bad_port_keeps_default() {
        assert_eq!(config_from(&[("PORT", "http")]).port, 3000);
    }

    #[test]
    fn test_summary_redacts_keys() {
        let config = config_from(&[("GEMINI_API_KEY", "secret")]);
        let summary = config.summary();
        assert!(summary.contains("gemini_key=set"));
        assert!(!summary.contains("secret"));
    }
}
