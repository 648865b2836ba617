//! OpenWeather client (current weather, geocoding, air pollution, forecast)
//! plus the regional stand-ins used when it has nothing to offer.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    AdapterError, AirQualitySnapshot, Coordinates, ForecastDay, PollutantComponents,
    WeatherProvider, WeatherSnapshot,
};
use crate::regions::RegionalRecord;

/// Labels for AQI 1..=5
const QUALITY_LEVELS: [&str; 5] = ["Good", "Fair", "Moderate", "Poor", "Very Poor"];

/// 3-hourly forecast entries per day
const ENTRIES_PER_DAY: usize = 8;

pub fn quality_label(aqi: u32) -> &'static str {
    (aqi as usize)
        .checked_sub(1)
        .and_then(|i| QUALITY_LEVELS.get(i))
        .copied()
        .unwrap_or("Unknown")
}

pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn key(&self) -> Result<&str, AdapterError> {
        self.api_key.as_deref().ok_or(AdapterError::MissingApiKey)
    }

    fn weather_url(&self, location: &str, key: &str) -> String {
        match parse_coordinates(location) {
            Some((lat, lon)) => format!(
                "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=metric",
                self.base_url, lat, lon, key
            ),
            None => format!(
                "{}/data/2.5/weather?q={}&appid={}&units=metric",
                self.base_url,
                urlencoding::encode(location),
                key
            ),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AdapterError> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(AdapterError::Status(resp.status().as_u16()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| AdapterError::Malformed(e.without_url().to_string()))
    }

    async fn try_current(&self, location: &str) -> Result<WeatherSnapshot, AdapterError> {
        let url = self.weather_url(location, self.key()?);
        let body: CurrentWeatherResponse = self.get_json(&url).await?;
        body.into_snapshot()
    }

    async fn try_geocode(&self, location: &str) -> Result<Option<Coordinates>, AdapterError> {
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(location),
            self.key()?
        );
        let hits: Vec<Coordinates> = self.get_json(&url).await?;
        Ok(hits.into_iter().next())
    }

    async fn try_air_quality(&self, coords: Coordinates) -> Result<AirQualitySnapshot, AdapterError> {
        let url = format!(
            "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
            self.base_url,
            coords.lat,
            coords.lon,
            self.key()?
        );
        let body: AirPollutionResponse = self.get_json(&url).await?;
        body.into_snapshot()
    }

    async fn try_forecast(&self, location: &str) -> Result<Vec<ForecastDay>, AdapterError> {
        let url = format!(
            "{}/data/2.5/forecast?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(location),
            self.key()?
        );
        let body: ForecastResponse = self.get_json(&url).await?;
        Ok(body.daily())
    }
}

/// Log an absorbed failure. A missing key is expected configuration, not a fault.
fn absorb<T>(call: &str, location: &str, result: Result<T, AdapterError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(AdapterError::MissingApiKey) => {
            debug!(call, location, "weather key not configured, using fallback");
            None
        }
        Err(e) => {
            warn!(call, location, error = %e, "weather call failed, using fallback");
            None
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, location: &str) -> Option<WeatherSnapshot> {
        absorb("current_weather", location, self.try_current(location).await)
    }

    async fn geocode(&self, location: &str) -> Option<Coordinates> {
        absorb("geocode", location, self.try_geocode(location).await).flatten()
    }

    async fn air_quality(&self, coords: Coordinates) -> Option<AirQualitySnapshot> {
        let label = format!("{},{}", coords.lat, coords.lon);
        absorb("air_quality", &label, self.try_air_quality(coords).await)
    }

    async fn forecast(&self, location: &str) -> Vec<ForecastDay> {
        absorb("forecast", location, self.try_forecast(location).await).unwrap_or_default()
    }
}

/// `"lat,lon"` → numbers, as written
fn parse_coordinates(location: &str) -> Option<(&str, &str)> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"^(-?\d+\.?\d*),\s*(-?\d+\.?\d*)$").ok())
        .as_ref()?;
    let caps = pattern.captures(location.trim())?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

// ============================================================================
// Wire formats
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    wind: WindBlock,
    weather: Vec<ConditionBlock>,
    name: String,
    #[serde(default)]
    sys: SysBlock,
    /// metres
    #[serde(default)]
    visibility: f64,
    #[serde(default)]
    clouds: CloudsBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
    pressure: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct SysBlock {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Default, Deserialize)]
struct CloudsBlock {
    all: f64,
}

impl CurrentWeatherResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, AdapterError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::Malformed("empty weather list".into()))?;
        Ok(WeatherSnapshot {
            temperature: self.main.temp,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            description: condition.description,
            icon: condition.icon,
            city: self.name,
            country: self.sys.country,
            feels_like: self.main.feels_like,
            visibility: self.visibility / 1000.0,
            clouds: self.clouds.all,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: AqiBlock,
    #[serde(default)]
    components: PollutantComponents,
}

#[derive(Debug, Deserialize)]
struct AqiBlock {
    aqi: u32,
}

impl AirPollutionResponse {
    fn into_snapshot(self) -> Result<AirQualitySnapshot, AdapterError> {
        let entry = self
            .list
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::Malformed("empty air pollution list".into()))?;
        Ok(AirQualitySnapshot {
            aqi: entry.main.aqi,
            components: entry.components,
            quality_level: quality_label(entry.main.aqi).to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: ForecastMain,
    weather: Vec<ConditionBlock>,
    /// Probability of precipitation, 0..1
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
    humidity: f64,
}

impl ForecastResponse {
    /// Every 8th entry: one reading per day
    fn daily(self) -> Vec<ForecastDay> {
        self.list
            .into_iter()
            .step_by(ENTRIES_PER_DAY)
            .map(|entry| ForecastDay {
                date: entry
                    .dt_txt
                    .split(' ')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                temperature: entry.main.temp,
                humidity: entry.main.humidity,
                description: entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|c| c.description)
                    .unwrap_or_default(),
                precipitation: entry.pop * 100.0,
            })
            .collect()
    }
}

// ============================================================================
// Regional stand-ins
// ============================================================================

impl WeatherSnapshot {
    /// Typical summer conditions for a region
    pub fn from_region(region: &RegionalRecord) -> Self {
        let summer = region.avg_temperature.summer;
        Self {
            temperature: summer,
            humidity: region.avg_humidity as f64,
            pressure: 1013.0,
            wind_speed: 5.0,
            description: format!("Typical {} conditions", region.climate),
            icon: "02d".to_string(),
            city: region.region.to_string(),
            country: region.country.to_string(),
            feels_like: summer + 2.0,
            visibility: 10.0,
            clouds: 30.0,
        }
    }
}

impl AirQualitySnapshot {
    pub fn from_region(region: &RegionalRecord) -> Self {
        let aqi = region.air_quality_index;
        Self {
            aqi,
            components: PollutantComponents {
                pm2_5: Some(aqi as f64 * 10.0),
                pm10: Some(aqi as f64 * 15.0),
                o3: Some(40.0),
                no2: Some(20.0),
                ..Default::default()
            },
            quality_level: match aqi {
                0..=2 => "Good",
                3 => "Moderate",
                _ => "Unhealthy",
            }
            .to_string(),
        }
    }
}

/// Hazard estimate from a single weather reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterRisk {
    pub flood_risk: u32,
    pub storm_risk: u32,
    pub heatwave_risk: u32,
    pub overall_risk: u32,
    pub risk_level: &'static str,
}

impl DisasterRisk {
    pub fn from_weather(weather: &WeatherSnapshot) -> Self {
        let flood_risk = match weather.humidity {
            h if h > 90.0 => 80,
            h if h > 80.0 => 60,
            h if h > 70.0 => 40,
            _ => 20,
        };

        let mut storm_risk = match weather.wind_speed {
            w if w > 20.0 => 90,
            w if w > 15.0 => 70,
            w if w > 10.0 => 50,
            _ => 20,
        };
        if weather.pressure < 1000.0 {
            storm_risk = (storm_risk + 20).min(100);
        }

        let heatwave_risk = match weather.temperature {
            t if t > 40.0 => 95,
            t if t > 35.0 => 70,
            t if t > 30.0 => 40,
            _ => 10,
        };

        let overall_risk =
            ((flood_risk + storm_risk + heatwave_risk) as f64 / 3.0).round() as u32;
        let risk_level = match overall_risk {
            r if r > 70 => "Critical",
            r if r > 50 => "High",
            r if r > 30 => "Moderate",
            _ => "Low",
        };

        Self {
            flood_risk,
            storm_risk,
            heatwave_risk,
            overall_risk,
            risk_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionResolver;
    use approx::assert_relative_eq;

    const CURRENT: &str = r#"{
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 18.2, "feels_like": 17.9, "pressure": 1008, "humidity": 82},
        "visibility": 8000,
        "wind": {"speed": 4.1, "deg": 240},
        "clouds": {"all": 75},
        "sys": {"country": "GB"},
        "name": "London"
    }"#;

    #[test]
    fn test_parse_current_weather() {
        let body: CurrentWeatherResponse = serde_json::from_str(CURRENT).unwrap();
        let snapshot = body.into_snapshot().unwrap();
        assert_eq!(snapshot.city, "London");
        assert_eq!(snapshot.country, "GB");
        assert_eq!(snapshot.description, "light rain");
        assert_relative_eq!(snapshot.visibility, 8.0);
        assert_relative_eq!(snapshot.humidity, 82.0);
    }

    #[test]
    fn test_empty_weather_list_is_malformed() {
        let body: CurrentWeatherResponse = serde_json::from_str(
            r#"{"weather": [], "main": {"temp": 1, "feels_like": 1, "pressure": 1, "humidity": 1},
                "wind": {"speed": 1}, "name": "X"}"#,
        )
        .unwrap();
        assert!(matches!(body.into_snapshot(), Err(AdapterError::Malformed(_))));
    }

    #[test]
    fn test_parse_air_pollution() {
        let body: AirPollutionResponse = serde_json::from_str(
            r#"{"list": [{"main": {"aqi": 2}, "components": {"co": 201.9, "no2": 0.77, "pm2_5": 0.5, "pm10": 0.54}}]}"#,
        )
        .unwrap();
        let aq = body.into_snapshot().unwrap();
        assert_eq!(aq.aqi, 2);
        assert_eq!(aq.quality_level, "Fair");
        assert_eq!(aq.components.no2, Some(0.77));
        assert_eq!(aq.components.so2, None);
    }

    #[test]
    fn test_forecast_takes_one_entry_per_day() {
        let entries: Vec<String> = (0..40)
            .map(|i| {
                format!(
                    r#"{{"dt_txt": "2024-06-{:02} {:02}:00:00", "main": {{"temp": {}, "humidity": 60}},
                        "weather": [{{"description": "clear sky"}}], "pop": 0.25}}"#,
                    1 + i / 8,
                    (i % 8) * 3,
                    20 + i
                )
            })
            .collect();
        let json = format!(r#"{{"list": [{}]}}"#, entries.join(","));
        let body: ForecastResponse = serde_json::from_str(&json).unwrap();
        let days = body.daily();
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[1].date, "2024-06-02");
        assert_relative_eq!(days[1].temperature, 28.0);
        assert_relative_eq!(days[0].precipitation, 25.0);
    }

    #[test]
    fn test_quality_label() {
        assert_eq!(quality_label(1), "Good");
        assert_eq!(quality_label(5), "Very Poor");
        assert_eq!(quality_label(0), "Unknown");
        assert_eq!(quality_label(6), "Unknown");
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("40.7128, -74.0060"), Some(("40.7128", "-74.0060")));
        assert_eq!(parse_coordinates("35,139"), Some(("35", "139")));
        assert_eq!(parse_coordinates("Tokyo, Japan"), None);
    }

    #[test]
    fn test_weather_url_selects_query_style() {
        let client = OpenWeatherClient::new(reqwest::Client::new(), "https://example.test/", None);
        let by_coords = client.weather_url("1.5, 2.5", "k");
        assert_eq!(
            by_coords,
            "https://example.test/data/2.5/weather?lat=1.5&lon=2.5&appid=k&units=metric"
        );
        let by_name = client.weather_url("São Paulo", "k");
        assert!(by_name.contains("q=S%C3%A3o%20Paulo"));
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_without_network() {
        let client = OpenWeatherClient::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        assert!(client.current_weather("Tokyo").await.is_none());
        assert!(client.geocode("Tokyo").await.is_none());
        assert!(client.forecast("Tokyo").await.is_empty());
    }

    #[test]
    fn test_regional_weather_fallback() {
        let cairo = RegionResolver::builtin().resolve("Cairo");
        let weather = WeatherSnapshot::from_region(cairo);
        assert_relative_eq!(weather.temperature, 35.0);
        assert_relative_eq!(weather.feels_like, 37.0);
        assert_eq!(weather.description, "Typical Hot desert conditions");
        assert_relative_eq!(weather.visibility, 10.0);

        let aq = AirQualitySnapshot::from_region(cairo);
        assert_eq!(aq.aqi, 4);
        assert_eq!(aq.components.pm2_5, Some(40.0));
        assert_eq!(aq.quality_level, "Unhealthy");
    }

    fn weather(temperature: f64, humidity: f64, wind_speed: f64, pressure: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature,
            humidity,
            pressure,
            wind_speed,
            description: String::new(),
            icon: String::new(),
            city: String::new(),
            country: String::new(),
            feels_like: temperature,
            visibility: 10.0,
            clouds: 0.0,
        }
    }

    #[test]
    fn test_disaster_risk_calm() {
        let risk = DisasterRisk::from_weather(&weather(22.0, 50.0, 3.0, 1015.0));
        assert_eq!((risk.flood_risk, risk.storm_risk, risk.heatwave_risk), (20, 20, 10));
        assert_eq!(risk.overall_risk, 17);
        assert_eq!(risk.risk_level, "Low");
    }

    #[test]
    fn test_disaster_risk_low_pressure_storm() {
        let risk = DisasterRisk::from_weather(&weather(41.0, 95.0, 25.0, 990.0));
        assert_eq!(risk.storm_risk, 100);
        assert_eq!(risk.flood_risk, 80);
        assert_eq!(risk.heatwave_risk, 95);
        // (80 + 100 + 95) / 3 = 91.7
        assert_eq!(risk.overall_risk, 92);
        assert_eq!(risk.risk_level, "Critical");
    }

    #[test]
    fn test_disaster_risk_boundaries_are_exclusive() {
        let risk = DisasterRisk::from_weather(&weather(30.0, 70.0, 10.0, 1000.0));
        assert_eq!((risk.flood_risk, risk.storm_risk, risk.heatwave_risk), (20, 20, 10));
    }

    #[tokio::test]
    async fn test_transport_error_hides_key() {
        let client = OpenWeatherClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            Some("SECRETKEY123".to_string()),
        );
        let err = client.try_current("Tokyo").await.unwrap_err();
        assert!(matches!(err, AdapterError::Transport(_)));
        let message = err.to_string();
        assert!(!message.contains("SECRETKEY123"), "{}", message);
        assert!(!message.contains("appid"), "{}", message);
    }
}
