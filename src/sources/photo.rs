//! Profile-photo lookup.

use serde::Deserialize;
use std::time::Duration;

use super::{SourceClient, SourceOutcome};
use crate::number::PhoneIdentifier;

#[derive(Debug, Deserialize)]
struct PhotoResponse {
    photo_url: Option<String>,
}

pub struct ProfilePhotoClient {
    inner: SourceClient,
}

impl ProfilePhotoClient {
    pub fn new(
        endpoint: &str,
        credential: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        ProfilePhotoClient {
            inner: SourceClient::new("profile-photo", endpoint, credential, user_agent, timeout),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// A body without a `photo_url` field counts as unavailable; the
    /// record falls back to the placeholder URL at presentation time.
    pub async fn fetch(&self, id: &PhoneIdentifier) -> SourceOutcome<String> {
        match self.inner.fetch_json::<PhotoResponse>(id).await {
            SourceOutcome::Found(body) => match body.photo_url {
                Some(url) => SourceOutcome::Found(url),
                None => SourceOutcome::Unavailable,
            },
            SourceOutcome::Unavailable => SourceOutcome::Unavailable,
            SourceOutcome::Unconfigured => SourceOutcome::Unconfigured,
        }
    }
}
