//! Last-known network tower lookup.

use serde::Deserialize;
use std::time::Duration;

use super::{SourceClient, SourceOutcome};
use crate::number::PhoneIdentifier;

#[derive(Debug, Deserialize)]
struct TowerResponse {
    last_tower: Option<String>,
}

pub struct NetworkTowerClient {
    inner: SourceClient,
}

impl NetworkTowerClient {
    pub fn new(
        endpoint: &str,
        credential: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        NetworkTowerClient {
            inner: SourceClient::new("network-tower", endpoint, credential, user_agent, timeout),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// A body without a `last_tower` field counts as unavailable; the
    /// record falls back to the "Unknown" sentinel at presentation time.
    pub async fn fetch(&self, id: &PhoneIdentifier) -> SourceOutcome<String> {
        match self.inner.fetch_json::<TowerResponse>(id).await {
            SourceOutcome::Found(body) => match body.last_tower {
                Some(tower) => SourceOutcome::Found(tower),
                None => SourceOutcome::Unavailable,
            },
            SourceOutcome::Unavailable => SourceOutcome::Unavailable,
            SourceOutcome::Unconfigured => SourceOutcome::Unconfigured,
        }
    }
}
