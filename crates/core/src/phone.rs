//! Shared MoMo phone number handling.
//!
//! Both the submission path and the lookup path go through this module, so a
//! number is stored and queried under exactly one canonical form.

use guardmogo_common::{AppError, AppResult};

/// Ghanaian mobile carriers with known MoMo prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    Mtn,
    AirtelTigo,
    Telecel,
}

impl Carrier {
    /// Resolve a carrier from its submitted name.
    ///
    /// Returns `None` for "Other" and any custom carrier name, which skip
    /// prefix validation.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "MTN" => Some(Self::Mtn),
            "AirtelTigo" => Some(Self::AirtelTigo),
            "Telecel" => Some(Self::Telecel),
            _ => None,
        }
    }

    /// Carrier display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mtn => "MTN",
            Self::AirtelTigo => "AirtelTigo",
            Self::Telecel => "Telecel",
        }
    }

    /// Known number prefixes for this carrier (local leading-zero form).
    #[must_use]
    pub const fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Mtn => &["024", "054", "055", "059", "053"],
            Self::AirtelTigo => &["026", "056", "027", "057"],
            Self::Telecel => &["020", "050"],
        }
    }

    /// Whether a normalized number carries one of this carrier's prefixes.
    #[must_use]
    pub fn matches(self, normalized: &str) -> bool {
        self.prefixes().iter().any(|p| normalized.starts_with(p))
    }
}

/// Normalize a MoMo number to the local leading-zero form.
///
/// Strips all whitespace and rewrites a leading `+233` country code to `0`.
/// Idempotent: normalizing an already-normalized number is a no-op.
#[must_use]
pub fn normalize(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    cleaned
        .strip_prefix("+233")
        .map_or(cleaned.clone(), |rest| format!("0{rest}"))
}

/// Validate a MoMo number against the basic format and an optional carrier.
///
/// Returns the normalized number on success. The carrier prefix check only
/// applies when a known carrier was selected; custom carriers accept any
/// well-formed number.
pub fn validate(input: &str, carrier: Option<Carrier>) -> AppResult<String> {
    let normalized = normalize(input);

    if normalized.is_empty() {
        return Err(AppError::Validation("Phone number is required".to_string()));
    }

    if !normalized.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone number must contain only digits".to_string(),
        ));
    }

    if normalized.len() != 10 || !normalized.starts_with('0') {
        return Err(AppError::Validation(
            "Phone number must be 10 digits starting with 0".to_string(),
        ));
    }

    if let Some(carrier) = carrier
        && !carrier.matches(&normalized)
    {
        return Err(AppError::Validation(format!(
            "Number prefix does not match {} (expected one of: {})",
            carrier.name(),
            carrier.prefixes().join(", ")
        )));
    }

    Ok(normalized)
}
