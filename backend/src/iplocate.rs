use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;

use crate::config::Config;
use crate::models::IpLocation;

const IP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    city: String,
    #[serde(default, rename = "regionName")]
    region_name: String,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

/// Coarse caller position from their IP address, used as the origin when a
/// trip request names no starting point.
pub async fn locate_ip(client: &Client, config: &Config) -> Option<IpLocation> {
    match fetch_location(client, config).await {
        Ok(location) => location,
        Err(err) => {
            tracing::warn!("ip location lookup failed: {err}");
            None
        }
    }
}

async fn fetch_location(
    client: &Client,
    config: &Config,
) -> Result<Option<IpLocation>, reqwest::Error> {
    let response: IpApiResponse = client
        .get(&config.ip_lookup_url)
        .timeout(IP_LOOKUP_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if response.status != "success" {
        return Ok(None);
    }

    Ok(Some(IpLocation {
        coord: Coordinate {
            lat: response.lat,
            lon: response.lon,
        },
        label: format!("{}, {}", response.city, response.region_name),
        country: response
            .country_code
            .unwrap_or_else(|| "US".to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_with_missing_country() {
        let response: IpApiResponse = serde_json::from_str(
            r#"{"status": "success", "lat": 39.74, "lon": -104.99, "city": "Denver", "regionName": "Colorado"}"#,
        )
        .unwrap();
        assert_eq!(response.status, "success");
        assert!(response.country_code.is_none());
    }
}
