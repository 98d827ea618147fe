use std::env;

/// Number of route points sampled for weather lookup.
pub const WEATHER_SAMPLE_POINTS: usize = 30;
/// Cap on traveler-facing alerts per trip.
pub const MAX_ALERTS: usize = 5;
/// Furthest-ahead day (from today) the daily forecast provider covers.
pub const FORECAST_DAYS_LIMIT: i64 = 14;

const MAPBOX_DIRECTIONS_URL: &str = "https://api.mapbox.com/directions/v5/mapbox/driving-traffic";
const MAPBOX_GEOCODING_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";
const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const NL_PARSER_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const IP_LOOKUP_URL: &str = "http://ip-api.com/json/";

/// External API credentials and endpoints. Base URLs are overridable via
/// environment so tests and staging can point elsewhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub mapbox_token: String,
    pub parser_api_key: String,
    pub directions_url: String,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub parser_url: String,
    pub ip_lookup_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mapbox_token: trimmed_var("MAPBOX_ACCESS_TOKEN"),
            parser_api_key: trimmed_var("NL_PARSER_API_KEY"),
            directions_url: var_or("MAPBOX_DIRECTIONS_URL", MAPBOX_DIRECTIONS_URL),
            geocoding_url: var_or("MAPBOX_GEOCODING_URL", MAPBOX_GEOCODING_URL),
            forecast_url: var_or("FORECAST_URL", OPEN_METEO_URL),
            parser_url: var_or("NL_PARSER_URL", NL_PARSER_URL),
            ip_lookup_url: var_or("IP_LOOKUP_URL", IP_LOOKUP_URL),
        }
    }

    /// Both external API keys are configured.
    pub fn keys_present(&self) -> bool {
        !self.mapbox_token.is_empty() && !self.parser_api_key.is_empty()
    }
}

fn trimmed_var(key: &str) -> String {
    env::var(key)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
