pub mod config;
pub mod correlate;
pub mod duration;
pub mod error;
pub mod forecast;
pub mod iplocate;
pub mod mapbox;
pub mod models;
pub mod nlparse;
pub mod openmeteo;
pub mod providers;
pub mod sample;
pub mod severity;

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{Duration, Local, NaiveDateTime};
use tower_http::cors::{Any, CorsLayer};

use shared::{ApiError, Coordinate, TripMetrics, TripPlan, TripQuery};

use crate::config::{MAX_ALERTS, WEATHER_SAMPLE_POINTS};
use crate::correlate::correlate_route_weather;
use crate::duration::format_duration;
use crate::error::TripError;
use crate::forecast::destination_outlook;
use crate::models::GeocodedPlace;
use crate::providers::Providers;
use crate::sample::sample_route;

const METERS_PER_MILE: f64 = 1_609.34;
const TIMELINE_FORMAT: &str = "%b %d, %I:%M %p";

pub struct AppState<P> {
    pub providers: Arc<P>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            providers: Arc::clone(&self.providers),
        }
    }
}

pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: Providers + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trip", post(trip_handler::<P>))
        .layer(cors)
        .with_state(state)
}

async fn trip_handler<P>(
    State(state): State<AppState<P>>,
    Json(query): Json<TripQuery>,
) -> Result<Json<TripPlan>, (StatusCode, Json<ApiError>)>
where
    P: Providers + 'static,
{
    plan_trip(state.providers.as_ref(), &query.text)
        .await
        .map(Json)
        .map_err(trip_error_response)
}

/// Run one trip query through the full pipeline: parse the free text,
/// resolve both endpoints, fetch the driving route, correlate weather
/// along it and summarize the destination outlook.
pub async fn plan_trip<P: Providers>(providers: &P, text: &str) -> Result<TripPlan, TripError> {
    let details = providers
        .parse_trip(text)
        .await
        .ok_or(TripError::ParserUnavailable)?;

    let origin = match details.origin.as_deref() {
        Some(query) => providers.geocode(query).await,
        None => providers.locate_ip().await.map(|location| GeocodedPlace {
            coord: location.coord,
            name: location.label,
            country: location.country,
        }),
    };
    let destination = providers.geocode(&details.destination).await;

    // Domestic-only service; the correlation core below stays
    // geography-agnostic.
    if is_foreign(origin.as_ref()) || is_foreign(destination.as_ref()) {
        return Err(TripError::UnsupportedCountry);
    }
    let (origin, destination) = match (origin, destination) {
        (Some(origin), Some(destination)) => (origin, destination),
        _ => return Err(TripError::LocationNotFound),
    };

    let departure = parse_departure(details.departure_time.as_deref());

    let route = providers
        .directions(origin.coord, destination.coord)
        .await
        .ok_or(TripError::NoRouteFound)?;

    let samples = sample_route(
        &route.geometry,
        route.duration_secs,
        departure,
        WEATHER_SAMPLE_POINTS,
    );
    let sampled_coords: Vec<Coordinate> = samples
        .iter()
        .map(|sample| route.geometry[sample.index])
        .collect();
    let series = providers.route_weather(&sampled_coords).await;

    let (segments, alerts) = correlate_route_weather(
        &route.geometry,
        &samples,
        &series,
        MAX_ALERTS,
        |coord| providers.reverse_geocode(coord),
    )
    .await;

    let duration_minutes = (route.duration_secs / 60.0).round() as i64;
    let eta = departure + Duration::minutes(duration_minutes);

    let destination_forecast = destination_outlook(
        destination.coord,
        Some(eta),
        Local::now().date_naive(),
        |coord, date| providers.daily_forecast(coord, date),
    )
    .await;

    Ok(TripPlan {
        origin_name: origin.name,
        destination_name: destination.name,
        departure_date: departure.format("%m-%d-%Y").to_string(),
        departure_text: departure.format(TIMELINE_FORMAT).to_string(),
        eta_text: eta.format(TIMELINE_FORMAT).to_string(),
        metrics: TripMetrics {
            distance_miles: (route.distance_meters / METERS_PER_MILE * 10.0).round() / 10.0,
            duration_minutes,
            duration_text: format_duration(route.duration_secs / 60.0),
        },
        route: route.geometry,
        segments,
        alerts,
        destination_forecast,
    })
}

fn is_foreign(place: Option<&GeocodedPlace>) -> bool {
    place.is_some_and(|place| !place.country.eq_ignore_ascii_case("US"))
}

/// Parse the ISO departure timestamp supplied by the language parser,
/// falling back to the current local time when absent or unparsable.
fn parse_departure(raw: Option<&str>) -> NaiveDateTime {
    raw.and_then(|value| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|parsed| parsed.naive_local())
            })
    })
    .unwrap_or_else(|| Local::now().naive_local())
}

fn trip_error_response(err: TripError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        TripError::ParserUnavailable => StatusCode::BAD_GATEWAY,
        TripError::LocationNotFound | TripError::UnsupportedCountry => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TripError::NoRouteFound => StatusCode::NOT_FOUND,
    };
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
