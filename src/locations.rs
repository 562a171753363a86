//! Supported monitoring locations
//!
//! The dashboard serves a small fixed set of Navi Mumbai / Mumbai stations.
//! Input is matched case-insensitively against this whitelist; anything else
//! is a validation error, never a silent no-op.

use crate::AeroGuardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monitored location from the fixed whitelist.
///
/// The source data disagrees on whether Mumbai proper belongs to the set;
/// this implementation uses the four-city union (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitoredLocation {
    CbdBelapur,
    Sanpada,
    Vashi,
    Mumbai,
}

impl MonitoredLocation {
    /// All supported locations, in display order.
    pub const ALL: [MonitoredLocation; 4] = [
        MonitoredLocation::CbdBelapur,
        MonitoredLocation::Sanpada,
        MonitoredLocation::Vashi,
        MonitoredLocation::Mumbai,
    ];

    /// Parse user input against the whitelist (case-insensitive exact match).
    pub fn parse(input: &str) -> Result<Self, AeroGuardError> {
        match input.trim().to_lowercase().as_str() {
            "cbd belapur" | "cbd-belapur" | "belapur" => Ok(MonitoredLocation::CbdBelapur),
            "sanpada" => Ok(MonitoredLocation::Sanpada),
            "vashi" => Ok(MonitoredLocation::Vashi),
            "mumbai" => Ok(MonitoredLocation::Mumbai),
            other => Err(AeroGuardError::validation(format!(
                "Unsupported location '{other}'. Supported: CBD Belapur, Sanpada, Vashi, Mumbai"
            ))),
        }
    }

    /// Display name shown on the dashboard.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MonitoredLocation::CbdBelapur => "CBD Belapur",
            MonitoredLocation::Sanpada => "Sanpada",
            MonitoredLocation::Vashi => "Vashi",
            MonitoredLocation::Mumbai => "Mumbai",
        }
    }

    /// Lowercase identifier used in URLs and cache keys.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            MonitoredLocation::CbdBelapur => "cbd-belapur",
            MonitoredLocation::Sanpada => "sanpada",
            MonitoredLocation::Vashi => "vashi",
            MonitoredLocation::Mumbai => "mumbai",
        }
    }

    /// Station coordinates (latitude, longitude).
    #[must_use]
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            MonitoredLocation::CbdBelapur => (19.0158, 73.0295),
            MonitoredLocation::Sanpada => (19.0209, 73.0069),
            MonitoredLocation::Vashi => (19.0748, 72.9976),
            MonitoredLocation::Mumbai => (19.0760, 72.8777),
        }
    }

    /// Typical base AQI used when no live or cached data is available.
    #[must_use]
    pub fn base_aqi(&self) -> u32 {
        match self {
            MonitoredLocation::CbdBelapur => 95,
            MonitoredLocation::Sanpada => 82,
            MonitoredLocation::Vashi => 108,
            MonitoredLocation::Mumbai => 125,
        }
    }
}

impl fmt::Display for MonitoredLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            MonitoredLocation::parse("CBD Belapur").unwrap(),
            MonitoredLocation::CbdBelapur
        );
        assert_eq!(
            MonitoredLocation::parse("VASHI").unwrap(),
            MonitoredLocation::Vashi
        );
        assert_eq!(
            MonitoredLocation::parse("  sanpada  ").unwrap(),
            MonitoredLocation::Sanpada
        );
    }

    #[test]
    fn test_parse_rejects_unknown_locations() {
        let err = MonitoredLocation::parse("Nowhereville").unwrap_err();
        assert!(matches!(err, AeroGuardError::Validation { .. }));
        assert!(err.to_string().contains("Nowhereville"));
    }

    #[test]
    fn test_keys_round_trip() {
        for location in MonitoredLocation::ALL {
            assert_eq!(MonitoredLocation::parse(location.key()).unwrap(), location);
            assert_eq!(MonitoredLocation::parse(location.name()).unwrap(), location);
        }
    }
}
