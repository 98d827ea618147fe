use shared::{Rgb, Severity};

/// Severity tier, display color and short description for one WMO
/// condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherClass {
    pub severity: Severity,
    pub color: Rgb,
    pub description: &'static str,
}

/// Map a WMO condition code to its hazard classification.
///
/// Thresholds are inclusive upper bounds in ascending order; the final arm
/// catches every code above the highest threshold, so the function is total.
/// Snow is tiered Severe despite its pale color: it impairs driving more
/// than its thermal severity suggests.
pub fn classify(code: i32) -> WeatherClass {
    let (severity, color, description) = match code {
        c if c <= 3 => (Severity::Low, [0, 100, 255], "Clear/Cloudy"),
        c if c <= 48 => (Severity::Medium, [255, 215, 0], "Fog"),
        c if c <= 55 => (Severity::Medium, [255, 165, 0], "Drizzle"),
        c if c <= 67 => (Severity::High, [255, 69, 0], "Rain"),
        c if c <= 77 => (Severity::Severe, [200, 200, 255], "Snow"),
        c if c <= 82 => (Severity::High, [255, 140, 0], "Showers"),
        _ => (Severity::Severe, [255, 0, 0], "Thunderstorm"),
    };
    WeatherClass {
        severity,
        color,
        description,
    }
}

/// Lighten a color by blending each channel 40% toward white, producing the
/// halo/outline shade rendered under a segment's primary color.
pub fn lighten(color: Rgb) -> Rgb {
    color.map(|c| (f64::from(c) + (255.0 - f64::from(c)) * 0.4).round() as u8)
}
