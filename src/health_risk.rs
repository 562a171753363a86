//! Health risk assessment.
//!
//! Scores personal exposure risk from PM2.5 concentration, an exposure
//! profile (persona plus daily outdoor hours) and optional meteorology.
//! The score is anchored to the WHO 24-hour PM2.5 guideline: a score of 1.0
//! means "at the guideline for this persona and exposure".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AeroGuardError, Result};

/// WHO 24-hour PM2.5 guideline, µg/m³.
const WHO_PM25_GUIDELINE: f32 = 15.0;

/// Exposure profile of the person being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    GeneralPublic,
    OutdoorWorkers,
    ChildrenElderly,
}

impl Persona {
    /// Relative sensitivity to particulate exposure.
    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        match self {
            Persona::GeneralPublic => 1.0,
            Persona::OutdoorWorkers => 1.2,
            Persona::ChildrenElderly => 1.5,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Persona::GeneralPublic => "General public",
            Persona::OutdoorWorkers => "Outdoor workers",
            Persona::ChildrenElderly => "Children and elderly",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Risk tier derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Hazardous,
}

impl RiskCategory {
    /// Classify a risk score into its tier.
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score < 1.0 {
            RiskCategory::Low
        } else if score < 2.0 {
            RiskCategory::Moderate
        } else if score < 3.5 {
            RiskCategory::High
        } else {
            RiskCategory::Hazardous
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Assessment request.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthRiskRequest {
    /// PM2.5 concentration, µg/m³
    pub pm25: f32,
    pub persona: Persona,
    /// Hours spent outdoors per day, 0-24
    pub exposure_hours: f32,
    pub humidity: Option<f32>,
    pub wind_speed: Option<f32>,
    pub temperature: Option<f32>,
}

/// Completed assessment.
#[derive(Debug, Clone, Serialize)]
pub struct HealthRiskAssessment {
    pub score: f32,
    pub category: RiskCategory,
    pub persona: Persona,
    pub advice: &'static str,
    /// Conditions that worsened the score
    pub risk_factors: Vec<&'static str>,
}

/// Assess health risk for one person under the given conditions.
///
/// Exposure hours outside 0-24 and negative PM2.5 are validation errors.
pub fn assess(request: &HealthRiskRequest) -> Result<HealthRiskAssessment> {
    if !(0.0..=24.0).contains(&request.exposure_hours) {
        return Err(AeroGuardError::validation(format!(
            "Exposure hours must be between 0 and 24, got {}",
            request.exposure_hours
        )));
    }
    if request.pm25 < 0.0 || !request.pm25.is_finite() {
        return Err(AeroGuardError::validation(format!(
            "PM2.5 must be a non-negative number, got {}",
            request.pm25
        )));
    }

    // Base score: guideline multiples, scaled by persona sensitivity and
    // exposure duration (12 h outdoors adds 50% on top of the base).
    let mut score = (request.pm25 / WHO_PM25_GUIDELINE)
        * request.persona.sensitivity()
        * (1.0 + request.exposure_hours / 12.0 * 0.5);

    let mut risk_factors = Vec::new();
    if request.pm25 > 150.0 {
        risk_factors.push("PM2.5 concentration is extremely hazardous");
    } else if request.pm25 > 75.0 {
        risk_factors.push("PM2.5 concentration is very high");
    } else if request.pm25 > 35.0 {
        risk_factors.push("PM2.5 concentration is elevated");
    }
    if let Some(humidity) = request.humidity {
        if humidity > 80.0 {
            score *= 1.2;
            risk_factors.push("High humidity traps particulates near ground level");
        }
    }
    if let Some(wind) = request.wind_speed {
        if wind < 2.0 {
            score *= 1.3;
            risk_factors.push("Stagnant air prevents pollutant dispersal");
        }
    }
    if let Some(temperature) = request.temperature {
        if temperature > 35.0 {
            score *= 1.1;
            risk_factors.push("High temperature accelerates ozone formation");
        }
    }

    let category = RiskCategory::from_score(score);
    Ok(HealthRiskAssessment {
        score,
        category,
        persona: request.persona,
        advice: advice_for(category, request.persona),
        risk_factors,
    })
}

/// Advisory text per risk tier and persona.
#[must_use]
pub fn advice_for(category: RiskCategory, persona: Persona) -> &'static str {
    match (category, persona) {
        (RiskCategory::Low, Persona::GeneralPublic) => {
            "Conditions are fine for normal outdoor activities."
        }
        (RiskCategory::Low, Persona::OutdoorWorkers) => {
            "Safe for a full outdoor shift; no precautions needed."
        }
        (RiskCategory::Low, Persona::ChildrenElderly) => {
            "Outdoor play and walks are fine today."
        }
        (RiskCategory::Moderate, Persona::GeneralPublic) => {
            "Consider shortening intense outdoor exercise."
        }
        (RiskCategory::Moderate, Persona::OutdoorWorkers) => {
            "Take indoor breaks during the most polluted hours."
        }
        (RiskCategory::Moderate, Persona::ChildrenElderly) => {
            "Limit strenuous outdoor activity; keep medication handy."
        }
        (RiskCategory::High, Persona::GeneralPublic) => {
            "Move exercise indoors and keep outdoor errands short."
        }
        (RiskCategory::High, Persona::OutdoorWorkers) => {
            "Wear an N95 mask and rotate outdoor duty with colleagues."
        }
        (RiskCategory::High, Persona::ChildrenElderly) => {
            "Stay indoors; keep windows closed and use air purification."
        }
        (RiskCategory::Hazardous, Persona::GeneralPublic) => {
            "Avoid going outdoors; seal windows and run air purifiers."
        }
        (RiskCategory::Hazardous, Persona::OutdoorWorkers) => {
            "Outdoor work should be suspended; respirator required if unavoidable."
        }
        (RiskCategory::Hazardous, Persona::ChildrenElderly) => {
            "Remain indoors with filtered air; seek medical help for any breathing difficulty."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(pm25: f32, persona: Persona, exposure_hours: f32) -> HealthRiskRequest {
        HealthRiskRequest {
            pm25,
            persona,
            exposure_hours,
            humidity: None,
            wind_speed: None,
            temperature: None,
        }
    }

    #[rstest]
    #[case(0.5, RiskCategory::Low)]
    #[case(0.99, RiskCategory::Low)]
    #[case(1.0, RiskCategory::Moderate)]
    #[case(1.99, RiskCategory::Moderate)]
    #[case(2.0, RiskCategory::High)]
    #[case(3.49, RiskCategory::High)]
    #[case(3.5, RiskCategory::Hazardous)]
    #[case(10.0, RiskCategory::Hazardous)]
    fn test_category_boundaries(#[case] score: f32, #[case] expected: RiskCategory) {
        assert_eq!(RiskCategory::from_score(score), expected);
    }

    #[test]
    fn test_score_at_guideline_is_baseline() {
        // PM2.5 at the guideline, general public, no outdoor exposure.
        let assessment = assess(&request(15.0, Persona::GeneralPublic, 0.0)).unwrap();
        assert!((assessment.score - 1.0).abs() < 1e-5);
        assert_eq!(assessment.category, RiskCategory::Moderate);
        assert!(assessment.risk_factors.is_empty());
    }

    #[test]
    fn test_sensitive_personas_score_higher() {
        let general = assess(&request(30.0, Persona::GeneralPublic, 4.0)).unwrap();
        let workers = assess(&request(30.0, Persona::OutdoorWorkers, 4.0)).unwrap();
        let children = assess(&request(30.0, Persona::ChildrenElderly, 4.0)).unwrap();
        assert!(workers.score > general.score);
        assert!(children.score > workers.score);
    }

    #[test]
    fn test_exposure_scales_the_score() {
        let short = assess(&request(30.0, Persona::GeneralPublic, 0.0)).unwrap();
        let long = assess(&request(30.0, Persona::GeneralPublic, 12.0)).unwrap();
        assert!((long.score / short.score - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_weather_modifiers_stack() {
        let mut req = request(30.0, Persona::GeneralPublic, 6.0);
        let bare = assess(&req).unwrap();
        req.humidity = Some(90.0);
        req.wind_speed = Some(1.0);
        req.temperature = Some(38.0);
        let worsened = assess(&req).unwrap();
        assert!((worsened.score / bare.score - 1.2 * 1.3 * 1.1).abs() < 1e-4);
        assert_eq!(worsened.risk_factors.len(), 3);
    }

    #[test]
    fn test_mild_weather_adds_no_factors() {
        let mut req = request(30.0, Persona::GeneralPublic, 6.0);
        req.humidity = Some(50.0);
        req.wind_speed = Some(5.0);
        req.temperature = Some(25.0);
        let assessment = assess(&req).unwrap();
        assert!(assessment.risk_factors.is_empty());
    }

    #[rstest]
    #[case(30.0, None)]
    #[case(40.0, Some("elevated"))]
    #[case(90.0, Some("very high"))]
    #[case(160.0, Some("extremely hazardous"))]
    fn test_pm25_band_factors(#[case] pm25: f32, #[case] expected: Option<&str>) {
        let assessment = assess(&request(pm25, Persona::GeneralPublic, 2.0)).unwrap();
        match expected {
            None => assert!(assessment.risk_factors.is_empty()),
            Some(fragment) => {
                assert_eq!(assessment.risk_factors.len(), 1);
                assert!(assessment.risk_factors[0].contains(fragment));
            }
        }
    }

    #[rstest]
    #[case(-1.0)]
    #[case(25.0)]
    fn test_exposure_out_of_range_is_rejected(#[case] hours: f32) {
        let result = assess(&request(30.0, Persona::GeneralPublic, hours));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_pm25_is_rejected() {
        assert!(assess(&request(-5.0, Persona::GeneralPublic, 2.0)).is_err());
    }

    #[test]
    fn test_advice_covers_every_combination() {
        for category in [
            RiskCategory::Low,
            RiskCategory::Moderate,
            RiskCategory::High,
            RiskCategory::Hazardous,
        ] {
            for persona in [
                Persona::GeneralPublic,
                Persona::OutdoorWorkers,
                Persona::ChildrenElderly,
            ] {
                assert!(!advice_for(category, persona).is_empty());
            }
        }
    }

    #[test]
    fn test_persona_deserializes_snake_case() {
        let persona: Persona = serde_json::from_str("\"children_elderly\"").unwrap();
        assert_eq!(persona, Persona::ChildrenElderly);
    }
}
