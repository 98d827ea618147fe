use thiserror::Error;

/// Failures that abort a trip query. Everything else in the pipeline
/// degrades to a fallback value instead of surfacing here.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("trip parser unavailable")]
    ParserUnavailable,
    #[error("could not resolve trip locations")]
    LocationNotFound,
    #[error("only USA routes are supported")]
    UnsupportedCountry,
    #[error("no route found")]
    NoRouteFound,
}
