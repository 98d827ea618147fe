use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::Request,
};
use backend::{
    AppState, create_router,
    models::{
        DailyOutlook, DailyResponse, GeocodedPlace, HourlySeries, IpLocation, RoutePlan,
        TripDetails,
    },
    providers::Providers,
};
use chrono::{Duration, Local, NaiveDate};
use hyper::StatusCode;
use serde_json::json;
use shared::{ApiError, Coordinate, TripPlan};
use tower::ServiceExt;

/// Canned providers; the flags steer each test scenario.
struct MockProviders {
    parser_down: bool,
    destination_country: &'static str,
    no_route: bool,
    storm: bool,
    fixed_departure: bool,
}

impl MockProviders {
    fn clear_trip() -> Self {
        Self {
            parser_down: false,
            destination_country: "US",
            no_route: false,
            storm: false,
            fixed_departure: true,
        }
    }

    fn route_geometry() -> Vec<Coordinate> {
        (0..10)
            .map(|i| Coordinate {
                lat: 39.74 + f64::from(i) * 0.03,
                lon: -105.0 + f64::from(i) * 0.01,
            })
            .collect()
    }

    /// Hourly timeline bracketing the trip, in the same shape the live
    /// forecast provider returns.
    fn hourly_series(&self) -> HourlySeries {
        let base = if self.fixed_departure {
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        } else {
            Local::now().naive_local()
        };
        let code = if self.storm { 95 } else { 1 };
        HourlySeries {
            time: (0..48)
                .map(|h| {
                    (base + Duration::hours(h - 1))
                        .format("%Y-%m-%dT%H:00")
                        .to_string()
                })
                .collect(),
            weathercode: vec![code; 48],
            temperature: vec![18.0; 48],
        }
    }
}

impl Providers for MockProviders {
    async fn parse_trip(&self, _text: &str) -> Option<TripDetails> {
        if self.parser_down {
            return None;
        }
        Some(TripDetails {
            origin: Some("Denver".to_string()),
            destination: "Boulder".to_string(),
            departure_time: self
                .fixed_departure
                .then(|| "2024-06-01T08:00:00".to_string()),
        })
    }

    async fn geocode(&self, query: &str) -> Option<GeocodedPlace> {
        let country = if query == "Boulder" {
            self.destination_country
        } else {
            "US"
        };
        Some(GeocodedPlace {
            coord: Coordinate {
                lat: 39.74,
                lon: -105.0,
            },
            name: format!("{query}, Colorado, United States"),
            country: country.to_string(),
        })
    }

    async fn reverse_geocode(&self, _coord: Coordinate) -> String {
        "Rocky Flats, Colorado".to_string()
    }

    async fn locate_ip(&self) -> Option<IpLocation> {
        None
    }

    async fn directions(&self, _start: Coordinate, _end: Coordinate) -> Option<RoutePlan> {
        if self.no_route {
            return None;
        }
        Some(RoutePlan {
            geometry: Self::route_geometry(),
            duration_secs: 3600.0,
            distance_meters: 16093.4,
        })
    }

    async fn route_weather(&self, points: &[Coordinate]) -> Vec<HourlySeries> {
        points.iter().map(|_| self.hourly_series()).collect()
    }

    async fn daily_forecast(&self, _coord: Coordinate, _date: NaiveDate) -> Option<DailyResponse> {
        Some(DailyResponse {
            daily: Some(DailyOutlook {
                weathercode: vec![95],
                temperature_max: vec![30.0],
                temperature_min: vec![18.0],
            }),
        })
    }
}

fn test_app(providers: MockProviders) -> axum::Router {
    let state = AppState {
        providers: Arc::new(providers),
    };
    create_router(state)
}

fn trip_request(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/trip")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn trip_endpoint_returns_full_plan() {
    let app = test_app(MockProviders::clear_trip());

    let response = app
        .oneshot(trip_request("Denver to Boulder tomorrow morning"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let plan: TripPlan = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(plan.origin_name, "Denver, Colorado, United States");
    assert_eq!(plan.destination_name, "Boulder, Colorado, United States");
    assert_eq!(plan.departure_date, "06-01-2024");
    assert_eq!(plan.departure_text, "Jun 01, 08:00 AM");
    assert_eq!(plan.eta_text, "Jun 01, 09:00 AM");
    assert_eq!(plan.metrics.distance_miles, 10.0);
    assert_eq!(plan.metrics.duration_minutes, 60);
    assert_eq!(plan.metrics.duration_text, "1 hr");
    assert_eq!(plan.route.len(), 10);

    // 10 route points sampled at stride 1 make 9 two-point segments
    assert_eq!(plan.segments.len(), 9);
    for segment in &plan.segments {
        assert_eq!(segment.color, [0, 100, 255]);
        assert_eq!(segment.tooltip, "Clear/Cloudy, 18°C");
    }
    assert!(plan.alerts.is_empty());

    // The trip is dated in the past, so the outlook window rejects it
    assert_eq!(plan.destination_forecast, "Data unavailable (past date)");
}

#[tokio::test]
async fn stormy_route_caps_alerts_and_summarizes_destination() {
    let app = test_app(MockProviders {
        storm: true,
        fixed_departure: false,
        ..MockProviders::clear_trip()
    });

    let response = app
        .oneshot(trip_request("drive me from Denver to Boulder"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let plan: TripPlan = serde_json::from_slice(&bytes).unwrap();

    // Nine hazardous segments, but the alert list stays capped
    assert_eq!(plan.segments.len(), 9);
    assert_eq!(plan.alerts.len(), 5);
    for alert in &plan.alerts {
        assert_eq!(alert.description, "Thunderstorm");
        assert_eq!(alert.location, "Rocky Flats, Colorado");
        assert_eq!(alert.temperature_c, 18.0);
    }
    for segment in &plan.segments {
        assert_eq!(segment.color, [255, 0, 0]);
        assert_eq!(segment.outline_color, [255, 102, 102]);
    }

    assert!(plan.destination_forecast.contains("Thunderstorm"));
    assert!(plan.destination_forecast.ends_with("High 30°C / Low 18°C"));
}

#[tokio::test]
async fn parser_outage_maps_to_bad_gateway() {
    let app = test_app(MockProviders {
        parser_down: true,
        ..MockProviders::clear_trip()
    });

    let response = app.oneshot(trip_request("anywhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let error: ApiError = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error.message, "trip parser unavailable");
}

#[tokio::test]
async fn foreign_destination_is_rejected() {
    let app = test_app(MockProviders {
        destination_country: "FR",
        ..MockProviders::clear_trip()
    });

    let response = app
        .oneshot(trip_request("Denver to Boulder"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let error: ApiError = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error.message, "only USA routes are supported");
}

#[tokio::test]
async fn missing_route_maps_to_not_found() {
    let app = test_app(MockProviders {
        no_route: true,
        ..MockProviders::clear_trip()
    });

    let response = app
        .oneshot(trip_request("Denver to Boulder"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let error: ApiError = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error.message, "no route found");
}
