//! Embedded numbering-plan metadata and the attribute resolvers backed
//! by it.
//!
//! The three resolvers (timezones, region, carrier) are pure lookups over
//! the canonical identifier: they never touch the network, never fail, and
//! are idempotent. Absence is the only failure signal; presentation
//! substitutes the "Unknown" sentinel.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::number::PhoneIdentifier;

/// One numbering-plan entry: region name and timezones for a country.
struct PlanEntry {
    /// Country calling code
    code: u16,
    /// ISO 3166-1 alpha-2 region id, used to disambiguate shared codes
    region_id: &'static str,
    /// Human-readable region description
    region: &'static str,
    timezones: &'static [&'static str],
}

/// Static plan table. Shared calling codes (e.g. +1) appear once per
/// region; lookup prefers the ISO id resolved by the parser and falls
/// back to the first entry for the calling code.
static PLAN: &[PlanEntry] = &[
    PlanEntry { code: 1, region_id: "US", region: "United States", timezones: &["America/New_York", "America/Chicago", "America/Denver", "America/Los_Angeles"] },
    PlanEntry { code: 1, region_id: "CA", region: "Canada", timezones: &["America/Toronto", "America/Winnipeg", "America/Edmonton", "America/Vancouver"] },
    PlanEntry { code: 7, region_id: "RU", region: "Russia", timezones: &["Europe/Moscow", "Asia/Yekaterinburg", "Asia/Vladivostok"] },
    PlanEntry { code: 20, region_id: "EG", region: "Egypt", timezones: &["Africa/Cairo"] },
    PlanEntry { code: 27, region_id: "ZA", region: "South Africa", timezones: &["Africa/Johannesburg"] },
    PlanEntry { code: 30, region_id: "GR", region: "Greece", timezones: &["Europe/Athens"] },
    PlanEntry { code: 31, region_id: "NL", region: "Netherlands", timezones: &["Europe/Amsterdam"] },
    PlanEntry { code: 32, region_id: "BE", region: "Belgium", timezones: &["Europe/Brussels"] },
    PlanEntry { code: 33, region_id: "FR", region: "France", timezones: &["Europe/Paris"] },
    PlanEntry { code: 34, region_id: "ES", region: "Spain", timezones: &["Europe/Madrid", "Atlantic/Canary"] },
    PlanEntry { code: 39, region_id: "IT", region: "Italy", timezones: &["Europe/Rome"] },
    PlanEntry { code: 41, region_id: "CH", region: "Switzerland", timezones: &["Europe/Zurich"] },
    PlanEntry { code: 43, region_id: "AT", region: "Austria", timezones: &["Europe/Vienna"] },
    PlanEntry { code: 44, region_id: "GB", region: "United Kingdom", timezones: &["Europe/London"] },
    PlanEntry { code: 45, region_id: "DK", region: "Denmark", timezones: &["Europe/Copenhagen"] },
    PlanEntry { code: 46, region_id: "SE", region: "Sweden", timezones: &["Europe/Stockholm"] },
    PlanEntry { code: 47, region_id: "NO", region: "Norway", timezones: &["Europe/Oslo"] },
    PlanEntry { code: 48, region_id: "PL", region: "Poland", timezones: &["Europe/Warsaw"] },
    PlanEntry { code: 49, region_id: "DE", region: "Germany", timezones: &["Europe/Berlin"] },
    PlanEntry { code: 52, region_id: "MX", region: "Mexico", timezones: &["America/Mexico_City", "America/Tijuana"] },
    PlanEntry { code: 54, region_id: "AR", region: "Argentina", timezones: &["America/Argentina/Buenos_Aires"] },
    PlanEntry { code: 55, region_id: "BR", region: "Brazil", timezones: &["America/Sao_Paulo", "America/Manaus"] },
    PlanEntry { code: 61, region_id: "AU", region: "Australia", timezones: &["Australia/Sydney", "Australia/Adelaide", "Australia/Perth"] },
    PlanEntry { code: 62, region_id: "ID", region: "Indonesia", timezones: &["Asia/Jakarta", "Asia/Makassar", "Asia/Jayapura"] },
    PlanEntry { code: 63, region_id: "PH", region: "Philippines", timezones: &["Asia/Manila"] },
    PlanEntry { code: 64, region_id: "NZ", region: "New Zealand", timezones: &["Pacific/Auckland"] },
    PlanEntry { code: 65, region_id: "SG", region: "Singapore", timezones: &["Asia/Singapore"] },
    PlanEntry { code: 66, region_id: "TH", region: "Thailand", timezones: &["Asia/Bangkok"] },
    PlanEntry { code: 81, region_id: "JP", region: "Japan", timezones: &["Asia/Tokyo"] },
    PlanEntry { code: 82, region_id: "KR", region: "South Korea", timezones: &["Asia/Seoul"] },
    PlanEntry { code: 84, region_id: "VN", region: "Vietnam", timezones: &["Asia/Ho_Chi_Minh"] },
    PlanEntry { code: 86, region_id: "CN", region: "China", timezones: &["Asia/Shanghai"] },
    PlanEntry { code: 90, region_id: "TR", region: "Turkey", timezones: &["Europe/Istanbul"] },
    PlanEntry { code: 91, region_id: "IN", region: "India", timezones: &["Asia/Kolkata"] },
    PlanEntry { code: 92, region_id: "PK", region: "Pakistan", timezones: &["Asia/Karachi"] },
    PlanEntry { code: 234, region_id: "NG", region: "Nigeria", timezones: &["Africa/Lagos"] },
    PlanEntry { code: 254, region_id: "KE", region: "Kenya", timezones: &["Africa/Nairobi"] },
    PlanEntry { code: 351, region_id: "PT", region: "Portugal", timezones: &["Europe/Lisbon", "Atlantic/Azores"] },
    PlanEntry { code: 353, region_id: "IE", region: "Ireland", timezones: &["Europe/Dublin"] },
    PlanEntry { code: 380, region_id: "UA", region: "Ukraine", timezones: &["Europe/Kyiv"] },
    PlanEntry { code: 852, region_id: "HK", region: "Hong Kong", timezones: &["Asia/Hong_Kong"] },
    PlanEntry { code: 966, region_id: "SA", region: "Saudi Arabia", timezones: &["Asia/Riyadh"] },
    PlanEntry { code: 971, region_id: "AE", region: "United Arab Emirates", timezones: &["Asia/Dubai"] },
    PlanEntry { code: 972, region_id: "IL", region: "Israel", timezones: &["Asia/Jerusalem"] },
];

static BY_REGION_ID: Lazy<HashMap<&'static str, &'static PlanEntry>> = Lazy::new(|| {
    PLAN.iter().map(|e| (e.region_id, e)).collect()
});

/// Mobile carrier prefixes per region: (region id, national-number prefix,
/// carrier name). Longest matching prefix wins.
static CARRIER_PREFIXES: &[(&str, &str, &str)] = &[
    // India
    ("IN", "98", "Airtel"),
    ("IN", "99", "Airtel"),
    ("IN", "70", "Jio"),
    ("IN", "79", "Jio"),
    ("IN", "90", "Vi"),
    ("IN", "91", "Vi"),
    // Germany
    ("DE", "151", "Telekom"),
    ("DE", "160", "Telekom"),
    ("DE", "170", "Telekom"),
    ("DE", "152", "Vodafone"),
    ("DE", "172", "Vodafone"),
    ("DE", "176", "O2"),
    ("DE", "179", "O2"),
    // United Kingdom
    ("GB", "7400", "Three"),
    ("GB", "7700", "Vodafone"),
    ("GB", "7800", "O2"),
    ("GB", "7900", "EE"),
    // France
    ("FR", "60", "Orange"),
    ("FR", "61", "Bouygues"),
    ("FR", "62", "SFR"),
    // Spain
    ("ES", "600", "Movistar"),
    ("ES", "610", "Vodafone"),
    ("ES", "620", "Orange"),
];

fn entry_for(id: &PhoneIdentifier) -> Option<&'static PlanEntry> {
    if let Some(region_id) = id.region_id() {
        if let Some(entry) = BY_REGION_ID.get(region_id) {
            return Some(*entry);
        }
    }
    // Shared or unresolved codes fall back to the first plan entry
    PLAN.iter().find(|e| e.code == id.country_code())
}

/// Timezone names for the number's region. Empty when the plan has no
/// entry for the country. Never fails.
pub fn timezones(id: &PhoneIdentifier) -> Vec<String> {
    entry_for(id)
        .map(|e| e.timezones.iter().map(|tz| tz.to_string()).collect())
        .unwrap_or_default()
}

/// Free-text region description for the number. Never fails.
pub fn region(id: &PhoneIdentifier) -> Option<String> {
    entry_for(id).map(|e| e.region.to_string())
}

/// Carrier name inferred from the national-number prefix. Never fails;
/// regions without prefix data simply resolve to `None`.
pub fn carrier(id: &PhoneIdentifier) -> Option<String> {
    let region_id = id.region_id()?;
    let national = id.national_number().to_string();

    CARRIER_PREFIXES
        .iter()
        .filter(|(rid, prefix, _)| *rid == region_id && national.starts_with(prefix))
        .max_by_key(|(_, prefix, _)| prefix.len())
        .map(|(_, _, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::PhoneIdentifier;

    #[test]
    fn test_region_and_timezones_for_india() {
        let id = PhoneIdentifier::normalize("+91 99999 12345").unwrap();
        assert_eq!(region(&id), Some("India".to_string()));
        assert_eq!(timezones(&id), vec!["Asia/Kolkata".to_string()]);
    }

    #[test]
    fn test_carrier_prefix_lookup() {
        let id = PhoneIdentifier::normalize("+91 98765 43210").unwrap();
        assert_eq!(carrier(&id), Some("Airtel".to_string()));
    }

    #[test]
    fn test_unknown_plan_yields_absence() {
        // +1 555 0100 is parseable but too short for a valid US number,
        // so the parser cannot attribute a region; the code fallback still
        // resolves the NANP entry.
        let id = PhoneIdentifier::normalize("+1 555 0100").unwrap();
        assert!(region(&id).is_some());
        assert!(!timezones(&id).is_empty());
        // No carrier prefix data for the NANP
        assert_eq!(carrier(&id), None);
    }

    #[test]
    fn test_resolvers_are_idempotent() {
        let id = PhoneIdentifier::normalize("+49 1512 3456789").unwrap();
        assert_eq!(timezones(&id), timezones(&id));
        assert_eq!(region(&id), region(&id));
        assert_eq!(carrier(&id), carrier(&id));
    }

    #[test]
    fn test_longest_prefix_wins() {
        // GB 7900 (EE) must beat any shorter overlapping prefix
        let id = PhoneIdentifier::normalize("+44 7900 123456").unwrap();
        assert_eq!(carrier(&id), Some("EE".to_string()));
    }
}
