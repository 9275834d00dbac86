//! Associated-numbers lookup.

use serde::Deserialize;
use std::time::Duration;

use super::{SourceClient, SourceOutcome};
use crate::number::PhoneIdentifier;

#[derive(Debug, Deserialize)]
struct AssociatedResponse {
    #[serde(default)]
    associated_numbers: Vec<String>,
}

pub struct AssociatedNumbersClient {
    inner: SourceClient,
}

impl AssociatedNumbersClient {
    pub fn new(
        endpoint: &str,
        credential: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        AssociatedNumbersClient {
            inner: SourceClient::new(
                "associated-numbers",
                endpoint,
                credential,
                user_agent,
                timeout,
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    pub async fn fetch(&self, id: &PhoneIdentifier) -> SourceOutcome<Vec<String>> {
        match self.inner.fetch_json::<AssociatedResponse>(id).await {
            SourceOutcome::Found(body) => SourceOutcome::Found(body.associated_numbers),
            SourceOutcome::Unavailable => SourceOutcome::Unavailable,
            SourceOutcome::Unconfigured => SourceOutcome::Unconfigured,
        }
    }
}
