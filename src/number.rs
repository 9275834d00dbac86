//! Phone-number normalization.
//!
//! Every downstream component keys off the canonical [`PhoneIdentifier`]
//! produced here. Parsing is the only step of a track operation that is
//! allowed to fail hard; the caller decides whether to re-prompt or abort.

use phonenumber::Mode;
use thiserror::Error;

/// Raw input that could not be parsed into a country-code-qualified number.
///
/// Carries the parser diagnostic so the user sees why the input was
/// rejected. Terminal for the current track operation only; the session
/// stays alive and re-prompts.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("could not parse '{input}' as a phone number: {reason}")]
pub struct InvalidNumberError {
    pub input: String,
    pub reason: String,
}

/// Canonical parsed form of a phone number. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneIdentifier {
    /// Country calling code (e.g. 1, 44, 91)
    country_code: u16,
    /// National significant number
    national_number: u64,
    /// ISO region the number plan resolved to, when determinable
    region_id: Option<String>,
    /// International display form: leading `+`, space-separated groups
    display: String,
    /// Compact E.164 form used in endpoint URLs
    e164: String,
}

impl PhoneIdentifier {
    /// Parse raw input into a canonical identifier.
    ///
    /// The input must carry a country-code prefix; anything the number
    /// plan cannot make sense of is rejected with the parse diagnostic.
    pub fn normalize(raw: &str) -> Result<Self, InvalidNumberError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidNumberError {
                input: raw.to_string(),
                reason: "empty input".to_string(),
            });
        }

        let parsed = phonenumber::parse(None, trimmed).map_err(|e| InvalidNumberError {
            input: raw.to_string(),
            reason: e.to_string(),
        })?;

        let region_id = parsed
            .country()
            .id()
            .map(|id| id.as_ref().to_string());

        Ok(PhoneIdentifier {
            country_code: parsed.country().code(),
            national_number: parsed.national().value(),
            region_id,
            display: phonenumber::format(&parsed).mode(Mode::International).to_string(),
            e164: phonenumber::format(&parsed).mode(Mode::E164).to_string(),
        })
    }

    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    /// ISO 3166-1 alpha-2 region the parser attributed the number to.
    pub fn region_id(&self) -> Option<&str> {
        self.region_id.as_deref()
    }

    /// International display form, e.g. `+91 99999 12345`.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Compact E.164 form, e.g. `+919999912345`.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// Display form with `+` and spaces stripped, safe for file names.
    pub fn sanitized(&self) -> String {
        self.display
            .chars()
            .filter(|c| *c != '+' && !c.is_whitespace())
            .collect()
    }
}

impl std::fmt::Display for PhoneIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_valid_international_number() {
        let id = PhoneIdentifier::normalize("+1 555 0100").expect("should parse");
        assert_eq!(id.country_code(), 1);
        assert_eq!(id.national_number(), 5550100);
        assert!(id.display().starts_with('+'));
        assert!(id.e164().starts_with("+1"));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = PhoneIdentifier::normalize("hello world").unwrap_err();
        assert_eq!(err.input, "hello world");
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_normalize_rejects_missing_country_code() {
        // Without a default region a bare national number is unparseable
        assert!(PhoneIdentifier::normalize("555 0100").is_err());
    }

    #[test]
    fn test_normalize_rejects_empty_input() {
        assert!(PhoneIdentifier::normalize("").is_err());
        assert!(PhoneIdentifier::normalize("   ").is_err());
    }

    #[test]
    fn test_sanitized_strips_plus_and_spaces() {
        let id = PhoneIdentifier::normalize("+91 99999 12345").expect("should parse");
        let sanitized = id.sanitized();
        assert!(!sanitized.contains('+'));
        assert!(!sanitized.contains(' '));
        assert!(sanitized.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_display_is_international_format() {
        let id = PhoneIdentifier::normalize("+442071234567").expect("should parse");
        assert!(id.display().starts_with("+44"));
        assert!(id.display().contains(' '), "international format groups digits");
    }
}
