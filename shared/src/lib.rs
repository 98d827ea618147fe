use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Coordinate rendered as a display label, used when reverse geocoding
    /// cannot produce a place name.
    pub fn display_label(self) -> String {
        format!("{:.2}, {:.2}", self.lat, self.lon)
    }
}

/// Display color as [r, g, b] channels.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Severe,
}

impl Severity {
    /// Only High and Severe conditions warrant a traveler-facing alert.
    pub fn is_hazardous(self) -> bool {
        matches!(self, Severity::High | Severity::Severe)
    }
}

/// A contiguous slice of route geometry carrying one weather classification.
/// Adjacent segments share their boundary point so the rendered path has no
/// visual gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSegment {
    pub path: Vec<Coordinate>,
    pub color: Rgb,
    pub outline_color: Rgb,
    pub tooltip: String,
}

/// A hazardous-weather encounter along the route, in route order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub severity: Severity,
    pub description: String,
    pub time: String,
    pub temperature_c: f64,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripMetrics {
    pub distance_miles: f64,
    pub duration_minutes: i64,
    pub duration_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripQuery {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub origin_name: String,
    pub destination_name: String,
    pub departure_date: String,
    pub departure_text: String,
    pub eta_text: String,
    pub metrics: TripMetrics,
    pub route: Vec<Coordinate>,
    pub segments: Vec<RouteSegment>,
    pub alerts: Vec<WeatherAlert>,
    pub destination_forecast: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
