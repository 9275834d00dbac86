//! The aggregate record: merged results of every resolver and lookup
//! source for the currently tracked number.

use std::collections::BTreeSet;

use crate::number::PhoneIdentifier;

/// Sentinel shown whenever a source yielded no usable value.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder shown when no profile photo could be fetched.
pub const PLACEHOLDER_PHOTO_URL: &str = "https://example.com/photo.jpg";

/// A finite latitude/longitude pair.
///
/// Constructible only through [`Coordinates::new`], which rejects
/// non-finite components; a record either has a complete usable pair or
/// none at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Coordinates { lat, lon })
        } else {
            None
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// One mutable record per tracked session.
///
/// Every optional/collection field is independently absent or empty:
/// failure of one external source never blocks population of the others.
/// Tracking a second number replaces the record wholesale, never merges.
#[derive(Debug, Clone)]
pub struct TrackedRecord {
    pub identifier: PhoneIdentifier,
    pub timezones: Vec<String>,
    pub region: Option<String>,
    pub carrier: Option<String>,
    /// Insertion order = response order
    pub social_profiles: Vec<String>,
    pub associated_numbers: BTreeSet<String>,
    pub last_tower: Option<String>,
    pub photo_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl TrackedRecord {
    pub fn new(identifier: PhoneIdentifier) -> Self {
        TrackedRecord {
            identifier,
            timezones: Vec::new(),
            region: None,
            carrier: None,
            social_profiles: Vec::new(),
            associated_numbers: BTreeSet::new(),
            last_tower: None,
            photo_url: None,
            coordinates: None,
        }
    }

    pub fn region_display(&self) -> &str {
        self.region.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn carrier_display(&self) -> &str {
        self.carrier.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn last_tower_display(&self) -> &str {
        self.last_tower.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn photo_url_display(&self) -> &str {
        self.photo_url.as_deref().unwrap_or(PLACEHOLDER_PHOTO_URL)
    }
}
