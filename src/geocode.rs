//! Region-description geocoding via an external mapping service.

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::record::Coordinates;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Geocode-by-text client. Everything that can go wrong resolves to
/// `None`; the session continues with coordinates unset.
pub struct Geocoder {
    http: reqwest::Client,
    endpoint: String,
    credential: Option<String>,
}

impl Geocoder {
    pub fn new(
        endpoint: &str,
        credential: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .unwrap_or_default();

        Geocoder {
            http,
            endpoint: endpoint.to_string(),
            credential,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Resolve a free-text region description to the first candidate's
    /// coordinate pair. `None` region or `None` credential is a no-op.
    pub async fn locate(&self, region: Option<&str>) -> Option<Coordinates> {
        let region = region?;
        let credential = self.credential.as_deref()?;

        let url = format!(
            "{}?address={}&key={}",
            self.endpoint,
            urlencoding::encode(region),
            urlencoding::encode(credential)
        );
        debug!("geocode: resolving '{}'", region);

        let response = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("geocode: request failed for '{}': {}", region, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("geocode: service returned status {} for '{}'", response.status(), region);
            return None;
        }

        let body = match response.json::<GeocodeResponse>().await {
            Ok(body) => body,
            Err(e) => {
                warn!("geocode: failed to parse response: {}", e);
                return None;
            }
        };

        if let Some(status) = &body.status {
            if status != "OK" {
                warn!("geocode: service reported status '{}' for '{}'", status, region);
                return None;
            }
        }

        let candidate = body.results.first()?;
        let coords = Coordinates::new(candidate.geometry.location.lat, candidate.geometry.location.lng);
        if coords.is_none() {
            warn!("geocode: service returned non-finite coordinates for '{}'", region);
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoder(credential: Option<&str>) -> Geocoder {
        Geocoder::new(
            "http://192.0.2.1/geocode/json",
            credential.map(|s| s.to_string()),
            "numintel-test",
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_absent_region_is_noop() {
        let g = geocoder(Some("key"));
        assert!(g.locate(None).await.is_none());
    }

    #[tokio::test]
    async fn test_absent_credential_is_noop() {
        // Unroutable endpoint: must short-circuit before any network I/O
        let g = geocoder(None);
        assert!(g.locate(Some("India")).await.is_none());
    }

    #[test]
    fn test_response_shape_parses() {
        let json = r#"{
            "status": "OK",
            "results": [
                { "geometry": { "location": { "lat": 17.385044, "lng": 78.486671 } } }
            ]
        }"#;
        let body: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.results.len(), 1);
        assert_eq!(body.results[0].geometry.location.lat, 17.385044);
    }
}
