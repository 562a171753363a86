//! AQI Classification Engine
//!
//! Maps a numeric AQI reading onto a discrete severity tier together with its
//! display label, color, gauge angle and health advisory text. Classification
//! is a pure function: total over `u32`, deterministic, no side effects.
//! An AQI of 0 is the "no data" sentinel and classifies as Good.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AQI severity tiers with inclusive upper bounds.
///
/// The six tiers partition the non-negative integers: 0-50, 51-100, 101-150,
/// 151-200, 201-300, 301+.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Full classification of a single AQI value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Severity tier
    pub category: AqiCategory,
    /// Display label for the tier
    pub label: &'static str,
    /// Display color (hex) for the tier
    pub color: &'static str,
    /// Gauge needle angle in degrees, 0-360
    pub gauge_angle_deg: f32,
}

impl AqiCategory {
    /// Classify an AQI value into its severity tier.
    #[must_use]
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthySensitive,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    /// Display label for this tier.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Display color (hex) for this tier.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#00e400",
            AqiCategory::Moderate => "#ffff00",
            AqiCategory::UnhealthySensitive => "#ff7e00",
            AqiCategory::Unhealthy => "#ff0000",
            AqiCategory::VeryUnhealthy => "#8f3f97",
            AqiCategory::Hazardous => "#7e0023",
        }
    }

    /// Who is at risk at this tier.
    #[must_use]
    pub fn risk_text(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality poses little or no risk.",
            AqiCategory::Moderate => {
                "Unusually sensitive people may experience respiratory symptoms."
            }
            AqiCategory::UnhealthySensitive => {
                "Sensitive groups may experience health effects; the general public is less likely to be affected."
            }
            AqiCategory::Unhealthy => {
                "Everyone may begin to experience health effects; sensitive groups more seriously."
            }
            AqiCategory::VeryUnhealthy => {
                "Health alert: the risk of health effects is increased for everyone."
            }
            AqiCategory::Hazardous => {
                "Health warning of emergency conditions: everyone is more likely to be affected."
            }
        }
    }

    /// Canned recommendation text for this tier.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Enjoy your normal outdoor activities.",
            AqiCategory::Moderate => {
                "Sensitive people should consider reducing prolonged outdoor exertion."
            }
            AqiCategory::UnhealthySensitive => {
                "Children, the elderly and people with respiratory conditions should limit outdoor exertion."
            }
            AqiCategory::Unhealthy => {
                "Avoid prolonged outdoor exertion; sensitive groups should stay indoors."
            }
            AqiCategory::VeryUnhealthy => {
                "Avoid all outdoor exertion; keep windows closed."
            }
            AqiCategory::Hazardous => {
                "Remain indoors, keep windows closed and use air purifiers if available."
            }
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Per-tier AQI spans and gauge widths. The first four tiers each get 72
// degrees, the fifth 36 and the sixth the remaining 36, so the common low
// range has more visual resolution than the rare extremes.
const GAUGE_SEGMENTS: [(u32, u32, f32, f32); 6] = [
    (0, 50, 0.0, 72.0),
    (50, 100, 72.0, 72.0),
    (100, 150, 144.0, 72.0),
    (150, 200, 216.0, 72.0),
    (200, 300, 288.0, 36.0),
    (300, 500, 324.0, 36.0),
];

/// Map an AQI value onto the gauge dial as an angle in [0, 360] degrees.
///
/// Piecewise-linear within each tier's span; values above 500 clamp to 360.
#[must_use]
pub fn gauge_angle(aqi: u32) -> f32 {
    for &(lo, hi, start, width) in &GAUGE_SEGMENTS {
        if aqi <= hi {
            let fraction = (aqi - lo) as f32 / (hi - lo) as f32;
            return start + fraction * width;
        }
    }
    360.0
}

/// Classify an AQI value into tier, label, color and gauge angle.
#[must_use]
pub fn classify(aqi: u32) -> Classification {
    let category = AqiCategory::from_aqi(aqi);
    Classification {
        category,
        label: category.label(),
        color: category.color(),
        gauge_angle_deg: gauge_angle(aqi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, AqiCategory::Good)]
    #[case(50, AqiCategory::Good)]
    #[case(51, AqiCategory::Moderate)]
    #[case(100, AqiCategory::Moderate)]
    #[case(101, AqiCategory::UnhealthySensitive)]
    #[case(150, AqiCategory::UnhealthySensitive)]
    #[case(151, AqiCategory::Unhealthy)]
    #[case(200, AqiCategory::Unhealthy)]
    #[case(201, AqiCategory::VeryUnhealthy)]
    #[case(300, AqiCategory::VeryUnhealthy)]
    #[case(301, AqiCategory::Hazardous)]
    #[case(500, AqiCategory::Hazardous)]
    #[case(9999, AqiCategory::Hazardous)]
    fn test_tier_boundaries(#[case] aqi: u32, #[case] expected: AqiCategory) {
        assert_eq!(AqiCategory::from_aqi(aqi), expected);
        assert_eq!(classify(aqi).category, expected);
    }

    #[test]
    fn test_tiers_partition_the_domain() {
        // Every value in [0, 500] classifies deterministically, and the tier
        // never decreases as AQI increases.
        let order = |c: AqiCategory| match c {
            AqiCategory::Good => 0,
            AqiCategory::Moderate => 1,
            AqiCategory::UnhealthySensitive => 2,
            AqiCategory::Unhealthy => 3,
            AqiCategory::VeryUnhealthy => 4,
            AqiCategory::Hazardous => 5,
        };
        let mut previous = 0;
        for aqi in 0..=500 {
            let tier = order(AqiCategory::from_aqi(aqi));
            assert!(tier >= previous, "tier regressed at aqi={aqi}");
            previous = tier;
        }
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(25, 36.0)]
    #[case(50, 72.0)]
    #[case(100, 144.0)]
    #[case(150, 216.0)]
    #[case(200, 288.0)]
    #[case(300, 324.0)]
    #[case(500, 360.0)]
    fn test_gauge_angles(#[case] aqi: u32, #[case] expected: f32) {
        assert!((gauge_angle(aqi) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_gauge_clamps_above_500() {
        assert_eq!(gauge_angle(501), 360.0);
        assert_eq!(gauge_angle(2000), 360.0);
    }

    #[test]
    fn test_gauge_is_monotonic() {
        let mut previous = -1.0f32;
        for aqi in 0..=600 {
            let angle = gauge_angle(aqi);
            assert!(angle >= previous, "angle regressed at aqi={aqi}");
            assert!((0.0..=360.0).contains(&angle));
            previous = angle;
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        let first = classify(137);
        let second = classify(137);
        assert_eq!(first, second);
        assert_eq!(first.label, "Unhealthy for Sensitive Groups");
        assert_eq!(first.color, "#ff7e00");
    }
}
