use std::future::Future;

use chrono::{Days, NaiveDate, NaiveDateTime};
use shared::Coordinate;

use crate::config::FORECAST_DAYS_LIMIT;
use crate::models::DailyResponse;
use crate::severity::classify;

/// Summarize the destination's weather for the day after arrival.
///
/// The forecast provider only covers a bounded window, so out-of-range
/// arrival dates short-circuit to an explanatory message before any fetch.
/// `today` anchors the window check; the fetch is injected so both are
/// testable without a clock or network.
pub async fn destination_outlook<F, Fut>(
    coord: Coordinate,
    arrival: Option<NaiveDateTime>,
    today: NaiveDate,
    fetch: F,
) -> String
where
    F: Fn(Coordinate, NaiveDate) -> Fut,
    Fut: Future<Output = Option<DailyResponse>>,
{
    let Some(arrival) = arrival else {
        return "Data unavailable (no date)".to_string();
    };

    let delta = (arrival.date() - today).num_days();
    if delta > FORECAST_DAYS_LIMIT {
        return "Forecast unavailable (>14 days)".to_string();
    }
    if delta < -1 {
        return "Data unavailable (past date)".to_string();
    }

    let next_day = arrival.date() + Days::new(1);
    match fetch(coord, next_day).await {
        None => "Weather service unavailable".to_string(),
        Some(response) => match response.first_day() {
            Some((code, t_max, t_min)) => format!(
                "{}: {}, High {t_max}°C / Low {t_min}°C",
                next_day.format("%Y-%m-%d"),
                classify(code).description
            ),
            None => "Data unavailable for this location.".to_string(),
        },
    }
}
