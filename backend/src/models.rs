use serde::Deserialize;
use shared::Coordinate;

/// Structured trip request recovered from free text by the language parser.
#[derive(Debug, Clone, Deserialize)]
pub struct TripDetails {
    #[serde(default)]
    pub origin: Option<String>,
    pub destination: String,
    #[serde(default)]
    pub departure_time: Option<String>,
}

/// A place name resolved to coordinates, with the ISO country code the
/// geocoder reported for it.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub coord: Coordinate,
    pub name: String,
    pub country: String,
}

/// Coarse position derived from the caller's IP address.
#[derive(Debug, Clone)]
pub struct IpLocation {
    pub coord: Coordinate,
    pub label: String,
    pub country: String,
}

/// A driving route as returned by the directions provider.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub geometry: Vec<Coordinate>,
    pub duration_secs: f64,
    pub distance_meters: f64,
}

/// Hourly forecast series for one sampled location. Timestamps stay as the
/// provider's strings; the correlator parses them entry by entry so index
/// alignment with the code/temperature arrays is preserved even when a
/// payload is malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weathercode: Vec<i32>,
    #[serde(default, rename = "temperature_2m")]
    pub temperature: Vec<f64>,
}

/// Daily forecast payload. `daily` may be absent when the provider has no
/// data for a location, which the summarizer reports differently from a
/// transport failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyResponse {
    #[serde(default)]
    pub daily: Option<DailyOutlook>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyOutlook {
    #[serde(default)]
    pub weathercode: Vec<i32>,
    #[serde(default, rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(default, rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
}

impl DailyResponse {
    /// First-day (code, max °C, min °C) triple, if all daily fields are
    /// populated.
    pub fn first_day(&self) -> Option<(i32, f64, f64)> {
        let daily = self.daily.as_ref()?;
        let code = daily.weathercode.first().copied()?;
        let t_max = daily.temperature_max.first().copied()?;
        let t_min = daily.temperature_min.first().copied()?;
        Some((code, t_max, t_min))
    }
}
