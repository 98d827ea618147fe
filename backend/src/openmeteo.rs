use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;

use crate::config::Config;
use crate::models::{DailyResponse, HourlySeries};

const ROUTE_WEATHER_TIMEOUT: Duration = Duration::from_secs(5);
const DAILY_FORECAST_TIMEOUT: Duration = Duration::from_secs(8);
// Hourly coverage requested along a route; keeps multi-day trips matchable.
const HOURLY_FORECAST_DAYS: &str = "10";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RouteWeatherResponse {
    Many(Vec<PointWeather>),
    One(PointWeather),
}

#[derive(Debug, Deserialize)]
struct PointWeather {
    #[serde(default)]
    hourly: HourlySeries,
}

/// Hourly forecast series for each point, in input order. The provider
/// answers a single-point query with a bare object instead of an array.
pub async fn route_weather(
    client: &Client,
    config: &Config,
    points: &[Coordinate],
) -> Vec<HourlySeries> {
    if points.is_empty() {
        return Vec::new();
    }
    match fetch_route_weather(client, config, points).await {
        Ok(series) => series,
        Err(err) => {
            tracing::warn!("route weather request failed: {err}");
            Vec::new()
        }
    }
}

async fn fetch_route_weather(
    client: &Client,
    config: &Config,
    points: &[Coordinate],
) -> Result<Vec<HourlySeries>, reqwest::Error> {
    let latitudes = join_csv(points.iter().map(|p| p.lat));
    let longitudes = join_csv(points.iter().map(|p| p.lon));

    let response: RouteWeatherResponse = client
        .get(&config.forecast_url)
        .query(&[
            ("latitude", latitudes.as_str()),
            ("longitude", longitudes.as_str()),
            ("hourly", "weathercode,temperature_2m"),
            ("forecast_days", HOURLY_FORECAST_DAYS),
            ("timezone", "UTC"),
        ])
        .timeout(ROUTE_WEATHER_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(match response {
        RouteWeatherResponse::Many(list) => list.into_iter().map(|point| point.hourly).collect(),
        RouteWeatherResponse::One(point) => vec![point.hourly],
    })
}

/// Daily forecast for one location and date, or None when the provider is
/// unreachable.
pub async fn daily_forecast(
    client: &Client,
    config: &Config,
    coord: Coordinate,
    date: NaiveDate,
) -> Option<DailyResponse> {
    match fetch_daily_forecast(client, config, coord, date).await {
        Ok(response) => Some(response),
        Err(err) => {
            tracing::warn!("daily forecast request failed: {err}");
            None
        }
    }
}

async fn fetch_daily_forecast(
    client: &Client,
    config: &Config,
    coord: Coordinate,
    date: NaiveDate,
) -> Result<DailyResponse, reqwest::Error> {
    let latitude = coord.lat.to_string();
    let longitude = coord.lon.to_string();
    let day = date.format("%Y-%m-%d").to_string();

    client
        .get(&config.forecast_url)
        .query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("daily", "weathercode,temperature_2m_max,temperature_2m_min"),
            ("timezone", "auto"),
            ("start_date", day.as_str()),
            ("end_date", day.as_str()),
        ])
        .timeout(DAILY_FORECAST_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

fn join_csv(values: impl Iterator<Item = f64>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
