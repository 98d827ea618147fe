use std::future::Future;

use chrono::{NaiveDateTime, Timelike};
use shared::{Coordinate, Rgb, RouteSegment, WeatherAlert};
use thiserror::Error;

use crate::models::HourlySeries;
use crate::sample::SamplePoint;
use crate::severity::{classify, lighten};

const UNAVAILABLE_COLOR: Rgb = [0, 100, 255];
const UNAVAILABLE_TOOLTIP: &str = "Weather data unavailable";
const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const ALERT_TIME_FORMAT: &str = "%b %d - %I:%M %p";

#[derive(Debug, Error)]
enum SeriesError {
    #[error("hourly arrays out of sync at entry {0}")]
    Misaligned(usize),
}

/// Join sampled route points against their forecast series and build the
/// per-segment display data plus a capped list of hazard alerts.
///
/// Each segment spans two consecutive sample indices inclusively, so
/// adjacent segments share one boundary point; the last segment extends to
/// the true end of the geometry. A segment's weather is read from its
/// start sample's series. Segments with no forecast entry for their
/// arrival hour are still emitted, with unavailable styling.
///
/// A malformed series (arrays out of sync) abandons the whole computation
/// in favor of a single fallback segment spanning the route, with no
/// alerts. Partial results are never returned.
pub async fn correlate_route_weather<F, Fut>(
    geometry: &[Coordinate],
    samples: &[SamplePoint],
    series: &[HourlySeries],
    max_alerts: usize,
    reverse_geocode: F,
) -> (Vec<RouteSegment>, Vec<WeatherAlert>)
where
    F: Fn(Coordinate) -> Fut,
    Fut: Future<Output = String>,
{
    if geometry.is_empty() {
        return (Vec::new(), Vec::new());
    }

    match build_segments(geometry, samples, series, max_alerts, &reverse_geocode).await {
        Ok(result) => result,
        Err(_) => (vec![unavailable_segment(geometry.to_vec())], Vec::new()),
    }
}

async fn build_segments<F, Fut>(
    geometry: &[Coordinate],
    samples: &[SamplePoint],
    series: &[HourlySeries],
    max_alerts: usize,
    reverse_geocode: &F,
) -> Result<(Vec<RouteSegment>, Vec<WeatherAlert>), SeriesError>
where
    F: Fn(Coordinate) -> Fut,
    Fut: Future<Output = String>,
{
    let mut segments = Vec::new();
    let mut alerts = Vec::new();

    let last = samples.len().saturating_sub(1);
    for k in 0..last {
        let start = samples[k].index;
        let end = if k + 1 == last {
            geometry.len() - 1
        } else {
            samples[k + 1].index
        };
        let path = geometry[start..=end].to_vec();
        let arrival = samples[k].arrival;

        let segment = match series.get(k) {
            None => unavailable_segment(path),
            Some(point_series) => match hourly_match(point_series, arrival)? {
                None => unavailable_segment(path),
                Some((code, temperature)) => {
                    let class = classify(code);
                    if class.severity.is_hazardous() && alerts.len() < max_alerts {
                        let location = reverse_geocode(geometry[start]).await;
                        alerts.push(WeatherAlert {
                            severity: class.severity,
                            description: class.description.to_string(),
                            time: arrival.format(ALERT_TIME_FORMAT).to_string(),
                            temperature_c: temperature,
                            location,
                        });
                    }
                    RouteSegment {
                        path,
                        color: class.color,
                        outline_color: lighten(class.color),
                        tooltip: format!("{}, {temperature}°C", class.description),
                    }
                }
            },
        };
        segments.push(segment);
    }

    Ok((segments, alerts))
}

/// Find the first hourly entry in the same hour bucket as the arrival
/// estimate. Entries with unparsable timestamps cannot match; a matching
/// entry without a corresponding code or temperature is a malformed
/// payload.
fn hourly_match(
    series: &HourlySeries,
    arrival: NaiveDateTime,
) -> Result<Option<(i32, f64)>, SeriesError> {
    for (idx, raw) in series.time.iter().enumerate() {
        let Ok(entry) = NaiveDateTime::parse_from_str(raw, HOURLY_TIME_FORMAT) else {
            continue;
        };
        if entry.date() == arrival.date() && entry.hour() == arrival.hour() {
            let code = series
                .weathercode
                .get(idx)
                .copied()
                .ok_or(SeriesError::Misaligned(idx))?;
            let temperature = series
                .temperature
                .get(idx)
                .copied()
                .ok_or(SeriesError::Misaligned(idx))?;
            return Ok(Some((code, temperature)));
        }
    }
    Ok(None)
}

fn unavailable_segment(path: Vec<Coordinate>) -> RouteSegment {
    RouteSegment {
        path,
        color: UNAVAILABLE_COLOR,
        outline_color: lighten(UNAVAILABLE_COLOR),
        tooltip: UNAVAILABLE_TOOLTIP.to_string(),
    }
}
