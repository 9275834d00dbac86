//! Social-media profile lookup.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{SourceClient, SourceOutcome};
use crate::number::PhoneIdentifier;

#[derive(Debug, Deserialize)]
struct ProfilesResponse {
    #[serde(default)]
    profiles: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    url: Option<String>,
}

pub struct SocialProfilesClient {
    inner: SourceClient,
}

impl SocialProfilesClient {
    pub fn new(
        endpoint: &str,
        credential: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        SocialProfilesClient {
            inner: SourceClient::new("social-profiles", endpoint, credential, user_agent, timeout),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// Profile URLs in response order. Entries without a URL are dropped.
    pub async fn fetch(&self, id: &PhoneIdentifier) -> SourceOutcome<Vec<String>> {
        match self.inner.fetch_json::<ProfilesResponse>(id).await {
            SourceOutcome::Found(body) => {
                let urls: Vec<String> = body
                    .profiles
                    .into_iter()
                    .filter_map(|p| p.url)
                    .collect();
                debug!("social-profiles: {} profiles for {}", urls.len(), id.display());
                SourceOutcome::Found(urls)
            }
            SourceOutcome::Unavailable => SourceOutcome::Unavailable,
            SourceOutcome::Unconfigured => SourceOutcome::Unconfigured,
        }
    }
}
