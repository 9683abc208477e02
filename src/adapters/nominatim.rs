//! Nominatim (OpenStreetMap) geocoding client.
//!
//! Nominatim's usage policy requires an identifying User-Agent on every
//! request, so the client refuses to be built without one.

use crate::domain::model::GeoPoint;
use crate::domain::ports::Geocoder;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

pub struct NominatimClient {
    endpoint: String,
    user_agent: String,
    /// Appended to every query, e.g. "Japan", to bias results toward the
    /// region the addresses come from.
    region_hint: Option<String>,
    client: Client,
}

/// A geocoding hit with the human-readable place name, as the proxy exposes it.
#[derive(Debug, Clone)]
pub struct Geocoded {
    pub point: GeoPoint,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Nominatim serializes coordinates as strings.
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimClient {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
        region_hint: Option<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
            region_hint,
            client: Client::new(),
        }
    }

    /// Looks up the best match for a free-text address, or None.
    pub async fn search(&self, address: &str) -> Result<Option<Geocoded>> {
        let query = match &self.region_hint {
            Some(hint) => format!("{}, {}", address, hint),
            None => address.to_string(),
        };
        tracing::debug!("Nominatim query: {}", query);

        let response = self
            .client
            .get(format!("{}/search", self.endpoint))
            .query(&[
                ("format", "json"),
                ("q", query.as_str()),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;
        tracing::debug!("Nominatim response status: {}", response.status());
        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status {}", response.status());
            return Ok(None);
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let lat = parse_coordinate("lat", &place.lat)?;
        let lon = parse_coordinate("lon", &place.lon)?;
        Ok(Some(Geocoded {
            point: GeoPoint { lat, lon },
            display_name: place.display_name,
        }))
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|e| AppError::ProcessingError {
        message: format!("unparseable {} '{}' in geocoding response: {}", field, raw, e),
    })
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>> {
        Ok(self.search(address).await?.map(|hit| hit.point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_search_best_match() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("format", "json")
                .query_param("limit", "1")
                .query_param("q", "箱根町湯本, Japan")
                .header("User-Agent", "kiroku-test/0.1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {
                        "lat": "35.2323",
                        "lon": "139.1069",
                        "display_name": "Hakone-Yumoto, Kanagawa, Japan"
                    }
                ]));
        });

        let client = NominatimClient::new(
            server.base_url(),
            "kiroku-test/0.1",
            Some("Japan".to_string()),
        );
        let hit = client.search("箱根町湯本").await.unwrap().unwrap();

        mock.assert();
        assert_eq!(hit.point.lat, 35.2323);
        assert_eq!(hit.point.lon, 139.1069);
        assert_eq!(hit.display_name, "Hakone-Yumoto, Kanagawa, Japan");
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        });

        let client = NominatimClient::new(server.base_url(), "kiroku-test/0.1", None);
        assert!(client.search("nowhere at all").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_unparseable_coordinates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"lat": "not-a-number", "lon": "0"}]));
        });

        let client = NominatimClient::new(server.base_url(), "kiroku-test/0.1", None);
        let err = client.search("somewhere").await.unwrap_err();
        assert!(matches!(err, AppError::ProcessingError { .. }));
    }

    #[tokio::test]
    async fn test_geocode_trait_returns_point_only() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"lat": "35.6812", "lon": "139.7671", "display_name": "Tokyo Station"}
                ]));
        });

        let client = NominatimClient::new(server.base_url(), "kiroku-test/0.1", None);
        let point = client.geocode("東京駅").await.unwrap().unwrap();
        assert_eq!(point, GeoPoint { lat: 35.6812, lon: 139.7671 });
    }
}
