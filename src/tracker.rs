//! The fan-out orchestrator: one phone number in, one assembled
//! [`TrackedRecord`] out.
//!
//! Normalization is the only step allowed to fail. The attribute
//! resolvers always complete; the four lookup clients run concurrently
//! and degrade independently; geocoding is best-effort. Results are
//! merged into the record only after every source has finished, so no
//! partial write is ever observable.

use crate::config::AppConfig;
use crate::geocode::Geocoder;
use crate::logger::StatusLogger;
use crate::number::{InvalidNumberError, PhoneIdentifier};
use crate::plan;
use crate::record::TrackedRecord;
use crate::sources::{
    AssociatedNumbersClient, NetworkTowerClient, ProfilePhotoClient, SocialProfilesClient,
    SourceOutcome,
};

pub struct Tracker {
    social: SocialProfilesClient,
    associated: AssociatedNumbersClient,
    tower: NetworkTowerClient,
    photo: ProfilePhotoClient,
    geocoder: Geocoder,
    logger: StatusLogger,
}

impl Tracker {
    pub fn from_config(config: &AppConfig, logger: StatusLogger) -> Self {
        let ua = &config.http.user_agent;
        let timeout = config.http.timeout();

        Tracker {
            social: SocialProfilesClient::new(
                &config.endpoints.social_profiles,
                config.credentials.social_media(),
                ua,
                timeout,
            ),
            associated: AssociatedNumbersClient::new(
                &config.endpoints.associated_numbers,
                config.credentials.associated_numbers(),
                ua,
                timeout,
            ),
            tower: NetworkTowerClient::new(
                &config.endpoints.network_tower,
                config.credentials.network_tower(),
                ua,
                timeout,
            ),
            photo: ProfilePhotoClient::new(
                &config.endpoints.profile_photo,
                config.credentials.profile_photo(),
                ua,
                timeout,
            ),
            geocoder: Geocoder::new(
                &config.endpoints.geocode,
                config.credentials.maps(),
                ua,
                timeout,
            ),
            logger,
        }
    }

    /// Track a number: normalize, resolve attributes, fan out to all four
    /// lookup sources exactly once, then geocode the resolved region.
    ///
    /// Only normalization can abort the operation; every downstream
    /// failure is absorbed as field-level absence.
    pub async fn track(&self, raw: &str) -> Result<TrackedRecord, InvalidNumberError> {
        let id = PhoneIdentifier::normalize(raw)?;
        self.logger.log_track_start(id.display());

        let mut record = TrackedRecord::new(id.clone());
        record.timezones = plan::timezones(&id);
        record.region = plan::region(&id);
        record.carrier = plan::carrier(&id);

        // The four sources share no state and fill disjoint fields, so
        // they run concurrently; the merge below happens only after all
        // four have completed.
        let (social, associated, tower, photo) = tokio::join!(
            self.social.fetch(&id),
            self.associated.fetch(&id),
            self.tower.fetch(&id),
            self.photo.fetch(&id),
        );

        self.logger.log_source_result(
            "social profiles",
            &social,
            &format!(
                "{} profile(s) found",
                social.clone().into_option().map(|v| v.len()).unwrap_or(0)
            ),
        );
        self.logger.log_source_result(
            "associated numbers",
            &associated,
            &format!(
                "{} number(s) found",
                associated.clone().into_option().map(|v| v.len()).unwrap_or(0)
            ),
        );
        self.logger.log_source_result(
            "network tower",
            &tower,
            &format!("last tower: {}", tower.clone().into_option().unwrap_or_default()),
        );
        self.logger.log_source_result(
            "profile photo",
            &photo,
            &format!("photo url: {}", photo.clone().into_option().unwrap_or_default()),
        );

        if let SourceOutcome::Found(profiles) = social {
            record.social_profiles = profiles;
        }
        if let SourceOutcome::Found(numbers) = associated {
            record.associated_numbers = numbers.into_iter().collect();
        }
        if let SourceOutcome::Found(last_tower) = tower {
            record.last_tower = Some(last_tower);
        }
        if let SourceOutcome::Found(url) = photo {
            record.photo_url = Some(url);
        }

        record.coordinates = self.geocoder.locate(record.region.as_deref()).await;
        self.logger.log_geocode_result(
            record.region.as_deref(),
            record.coordinates.map(|c| c.to_string()).as_deref(),
        );

        Ok(record)
    }
}
