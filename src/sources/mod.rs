//! External lookup clients, one per data source.
//!
//! All four are structurally identical: a single bounded-timeout GET
//! keyed by the phone number, authorized with a bearer credential.
//! Failures degrade to [`SourceOutcome::Unavailable`] and are never
//! propagated; one source's outage must not abort the pipeline or the
//! other sources.

pub mod associated;
pub mod photo;
pub mod social;
pub mod tower;

pub use associated::AssociatedNumbersClient;
pub use photo::ProfilePhotoClient;
pub use social::SocialProfilesClient;
pub use tower::NetworkTowerClient;

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::number::PhoneIdentifier;

/// Outcome of one lookup attempt against one source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    /// No credential configured for this source; no network I/O attempted.
    Unconfigured,
    /// The source was attempted and yielded nothing usable (timeout,
    /// non-2xx, transport error, malformed or incomplete body).
    Unavailable,
    /// The source responded with a usable value.
    Found(T),
}

impl<T> SourceOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            SourceOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SourceOutcome::Found(_))
    }
}

/// Shared plumbing for the four lookup clients: endpoint, credential and
/// a bounded-timeout HTTP client.
pub(crate) struct SourceClient {
    name: &'static str,
    http: reqwest::Client,
    endpoint: String,
    credential: Option<String>,
}

impl SourceClient {
    pub(crate) fn new(
        name: &'static str,
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

        SourceClient {
            name,
            http,
            endpoint: endpoint.to_string(),
            credential,
        }
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// One GET keyed by the identifier, deserialized into the source's
    /// response shape. All failure modes collapse to `Unavailable`.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        id: &PhoneIdentifier,
    ) -> SourceOutcome<T> {
        let credential = match &self.credential {
            Some(token) => token,
            None => {
                debug!("{}: no credential configured, skipping lookup", self.name);
                return SourceOutcome::Unconfigured;
            }
        };

        let url = format!(
            "{}?phone={}",
            self.endpoint,
            urlencoding::encode(id.e164())
        );
        debug!("{}: GET {}", self.name, url);

        let response = match self
            .http
            .get(&url)
            .bearer_auth(credential)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("{}: request failed for {}: {}", self.name, id.display(), e);
                return SourceOutcome::Unavailable;
            }
        };

        if !response.status().is_success() {
            warn!(
                "{}: {} returned status {} for {}",
                self.name,
                self.endpoint,
                response.status(),
                id.display()
            );
            return SourceOutcome::Unavailable;
        }

        match response.json::<T>().await {
            Ok(body) => SourceOutcome::Found(body),
            Err(e) => {
                warn!("{}: failed to parse response body: {}", self.name, e);
                SourceOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_into_option() {
        assert_eq!(SourceOutcome::Found(5).into_option(), Some(5));
        assert_eq!(SourceOutcome::<i32>::Unavailable.into_option(), None);
        assert_eq!(SourceOutcome::<i32>::Unconfigured.into_option(), None);
    }

    #[tokio::test]
    async fn test_unconfigured_short_circuits_without_network() {
        // Endpoint is unroutable; without a credential it must never be hit
        let client = SourceClient::new(
            "test",
            "http://192.0.2.1/v1/lookup",
            None,
            "numintel-test",
            Duration::from_millis(50),
        );
        let id = PhoneIdentifier::normalize("+1 555 0100").unwrap();
        let outcome: SourceOutcome<serde_json::Value> = client.fetch_json(&id).await;
        assert_eq!(outcome, SourceOutcome::Unconfigured);
    }
}
