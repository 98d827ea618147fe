use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;

use crate::config::Config;
use crate::models::{GeocodedPlace, RoutePlan};

// Reverse geocoding sits inside the alert loop, so it gets a tighter
// timeout than the other calls.
const REVERSE_GEOCODE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    center: [f64; 2],
    place_name: String,
    #[serde(default)]
    context: Vec<ContextItem>,
}

#[derive(Debug, Deserialize)]
struct ContextItem {
    #[serde(default)]
    id: String,
    short_code: Option<String>,
}

/// Resolve a place query to coordinates, name and country code.
pub async fn geocode(client: &Client, config: &Config, query: &str) -> Option<GeocodedPlace> {
    if query.is_empty() {
        return None;
    }
    match fetch_geocode(client, config, query).await {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!("geocoding failed for {query:?}: {err}");
            None
        }
    }
}

async fn fetch_geocode(
    client: &Client,
    config: &Config,
    query: &str,
) -> Result<Option<GeocodedPlace>, reqwest::Error> {
    let url = format!("{}/{}.json", config.geocoding_url, query);
    let response: GeocodeResponse = client
        .get(&url)
        .query(&[
            ("access_token", config.mapbox_token.as_str()),
            ("limit", "1"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.features.into_iter().next().map(|feature| {
        let country = country_code(&feature);
        GeocodedPlace {
            coord: Coordinate {
                lat: feature.center[1],
                lon: feature.center[0],
            },
            name: feature.place_name,
            country,
        }
    }))
}

fn country_code(feature: &Feature) -> String {
    feature
        .context
        .iter()
        .find(|item| item.id.starts_with("country"))
        .map(|item| item.short_code.as_deref().unwrap_or("us"))
        .unwrap_or("us")
        .to_uppercase()
}

/// Resolve coordinates to a place name. Degrades to a formatted coordinate
/// label so the alert loop always gets a displayable location.
pub async fn reverse_geocode(client: &Client, config: &Config, coord: Coordinate) -> String {
    match fetch_reverse(client, config, coord).await {
        Ok(Some(name)) => name,
        Ok(None) => coord.display_label(),
        Err(err) => {
            tracing::warn!("reverse geocoding failed near {}: {err}", coord.display_label());
            coord.display_label()
        }
    }
}

async fn fetch_reverse(
    client: &Client,
    config: &Config,
    coord: Coordinate,
) -> Result<Option<String>, reqwest::Error> {
    let url = format!("{}/{},{}.json", config.geocoding_url, coord.lon, coord.lat);
    let response: GeocodeResponse = client
        .get(&url)
        .query(&[
            ("access_token", config.mapbox_token.as_str()),
            ("limit", "1"),
            ("types", "place,locality"),
        ])
        .timeout(REVERSE_GEOCODE_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response
        .features
        .into_iter()
        .next()
        .map(|feature| feature.place_name))
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    geometry: RouteGeometry,
    duration: f64,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Fetch a driving route. Geometry arrives as GeoJSON [lon, lat] pairs and
/// is converted to typed coordinates at this boundary.
pub async fn directions(
    client: &Client,
    config: &Config,
    start: Coordinate,
    end: Coordinate,
) -> Option<RoutePlan> {
    match fetch_directions(client, config, start, end).await {
        Ok(plan) => plan,
        Err(err) => {
            tracing::warn!("directions request failed: {err}");
            None
        }
    }
}

async fn fetch_directions(
    client: &Client,
    config: &Config,
    start: Coordinate,
    end: Coordinate,
) -> Result<Option<RoutePlan>, reqwest::Error> {
    let url = format!(
        "{}/{},{};{},{}",
        config.directions_url, start.lon, start.lat, end.lon, end.lat
    );
    let response: DirectionsResponse = client
        .get(&url)
        .query(&[
            ("access_token", config.mapbox_token.as_str()),
            ("geometries", "geojson"),
            ("overview", "full"),
            ("annotations", "duration,distance,congestion"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.routes.into_iter().next().map(|route| RoutePlan {
        geometry: route
            .geometry
            .coordinates
            .iter()
            .map(|&[lon, lat]| Coordinate { lat, lon })
            .collect(),
        duration_secs: route.duration,
        distance_meters: route.distance,
    }))
}
