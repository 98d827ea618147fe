use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use shared::Coordinate;

use crate::config::Config;
use crate::models::{
    DailyResponse, GeocodedPlace, HourlySeries, IpLocation, RoutePlan, TripDetails,
};
use crate::{iplocate, mapbox, nlparse, openmeteo};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// External service contracts the trip pipeline depends on.
///
/// Abstracting the providers allows:
/// - **Testing**: mock implementations for the API tests
/// - **Swapping**: alternative geocoding or forecast vendors
///
/// # Contract
/// Every method makes a single attempt and degrades on failure to `None`,
/// an empty list, or a coordinate-label fallback. No method retries.
pub trait Providers: Send + Sync {
    /// Extract structured trip details from a free-text request.
    fn parse_trip(&self, text: &str) -> impl Future<Output = Option<TripDetails>> + Send;

    /// Resolve a place query to coordinates, name and country code.
    fn geocode(&self, query: &str) -> impl Future<Output = Option<GeocodedPlace>> + Send;

    /// Resolve coordinates to a place name, falling back to a formatted
    /// coordinate label.
    fn reverse_geocode(&self, coord: Coordinate) -> impl Future<Output = String> + Send;

    /// Coarse position of the caller, derived from their IP address.
    fn locate_ip(&self) -> impl Future<Output = Option<IpLocation>> + Send;

    /// Driving route between two coordinates.
    fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Option<RoutePlan>> + Send;

    /// Hourly forecast series for each point, in input order.
    fn route_weather(
        &self,
        points: &[Coordinate],
    ) -> impl Future<Output = Vec<HourlySeries>> + Send;

    /// Daily forecast for one location and date.
    fn daily_forecast(
        &self,
        coord: Coordinate,
        date: NaiveDate,
    ) -> impl Future<Output = Option<DailyResponse>> + Send;
}

/// Live providers backed by the HTTP APIs configured in [`Config`].
pub struct LiveProviders {
    client: Client,
    config: Config,
}

impl LiveProviders {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("roadcast/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }
}

impl Providers for LiveProviders {
    async fn parse_trip(&self, text: &str) -> Option<TripDetails> {
        nlparse::parse_trip(&self.client, &self.config, text).await
    }

    async fn geocode(&self, query: &str) -> Option<GeocodedPlace> {
        mapbox::geocode(&self.client, &self.config, query).await
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> String {
        mapbox::reverse_geocode(&self.client, &self.config, coord).await
    }

    async fn locate_ip(&self) -> Option<IpLocation> {
        iplocate::locate_ip(&self.client, &self.config).await
    }

    async fn directions(&self, start: Coordinate, end: Coordinate) -> Option<RoutePlan> {
        mapbox::directions(&self.client, &self.config, start, end).await
    }

    async fn route_weather(&self, points: &[Coordinate]) -> Vec<HourlySeries> {
        openmeteo::route_weather(&self.client, &self.config, points).await
    }

    async fn daily_forecast(&self, coord: Coordinate, date: NaiveDate) -> Option<DailyResponse> {
        openmeteo::daily_forecast(&self.client, &self.config, coord, date).await
    }
}
