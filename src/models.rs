//! Domain models for air quality readings and forecasts, plus the wire
//! formats of the upstream AQI service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classification::{Classification, classify};
use crate::locations::MonitoredLocation;

/// Where a reading ultimately came from.
///
/// Tagged on every reading so consumers can tell measured data from
/// fabricated fallback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Fetched from the upstream monitoring service for this request
    Live,
    /// Served from the local cache
    Cached,
    /// Derived from the static per-location baseline table
    Synthetic,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataOrigin::Live => "live",
            DataOrigin::Cached => "cached",
            DataOrigin::Synthetic => "synthetic",
        };
        write!(f, "{s}")
    }
}

/// One complete air quality observation for a location.
///
/// Pollutant concentrations are in the upstream service's reporting units
/// (µg/m³ except CO in mg/m³). An `aqi` of 0 means "no data"; all pollutant
/// fields are 0 in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiReading {
    pub aqi: u32,
    pub pm25: f32,
    pub pm10: f32,
    pub o3: f32,
    pub no2: f32,
    pub no: f32,
    pub so2: f32,
    pub co: f32,
    pub wind_speed: f32,
    pub humidity: f32,
    pub origin: DataOrigin,
    pub recorded_at: DateTime<Utc>,
}

impl AqiReading {
    /// The "no data" sentinel: AQI 0 with every pollutant zeroed.
    #[must_use]
    pub fn empty(origin: DataOrigin) -> Self {
        AqiReading {
            aqi: 0,
            pm25: 0.0,
            pm10: 0.0,
            o3: 0.0,
            no2: 0.0,
            no: 0.0,
            so2: 0.0,
            co: 0.0,
            wind_speed: 0.0,
            humidity: 0.0,
            origin,
            recorded_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aqi == 0
    }

    #[must_use]
    pub fn classification(&self) -> Classification {
        classify(self.aqi)
    }
}

/// One hour of a synthetic forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Hours from now, starting at 1
    #[serde(rename = "hour")]
    pub hour_offset: u32,
    #[serde(rename = "timestamp")]
    pub forecast_for: DateTime<Utc>,
    pub aqi: u32,
    pub category: &'static str,
    pub color: &'static str,
    /// Percent confidence, decaying with horizon, floored at 50
    pub confidence: u32,
}

/// Standard response envelope: `{ success, data }` on the happy path,
/// `{ success: false, error }` on failures.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        ApiEnvelope {
            success: true,
            data,
        }
    }
}

/// Response body for the current-reading endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentAqiResponse {
    pub location: &'static str,
    pub reading: AqiReading,
    pub classification: Classification,
    /// Who is at risk at this tier
    pub risk: &'static str,
    /// What to do about it
    pub advisory: &'static str,
}

impl CurrentAqiResponse {
    #[must_use]
    pub fn new(location: MonitoredLocation, reading: AqiReading) -> Self {
        let classification = reading.classification();
        let category = classification.category;
        CurrentAqiResponse {
            location: location.name(),
            reading,
            classification,
            risk: category.risk_text(),
            advisory: category.recommendation(),
        }
    }
}

/// Response body for the forecast endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub location: &'static str,
    pub base_aqi: u32,
    pub hours: u32,
    pub generated_at: DateTime<Utc>,
    pub forecast: Vec<ForecastPoint>,
}

/// Wire formats of the World Air Quality Index HTTP API.
pub mod waqi {
    use serde::Deserialize;

    /// Top-level envelope. `status` is "ok" on success; anything else means
    /// the station rejected the request (bad token, unknown station).
    #[derive(Debug, Deserialize)]
    pub struct Envelope {
        pub status: String,
        pub data: Option<Payload>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Payload {
        pub aqi: AqiValue,
        #[serde(default)]
        pub iaqi: Iaqi,
    }

    /// The service reports AQI as a number normally but as the string "-"
    /// when the station has no current data.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum AqiValue {
        Number(f64),
        Text(String),
    }

    impl AqiValue {
        #[must_use]
        pub fn as_u32(&self) -> u32 {
            match self {
                AqiValue::Number(n) if *n >= 0.0 => n.round() as u32,
                _ => 0,
            }
        }
    }

    /// Per-pollutant sub-indices. Every field is optional; stations report
    /// different pollutant sets.
    #[derive(Debug, Default, Deserialize)]
    pub struct Iaqi {
        pub pm25: Option<Metric>,
        pub pm10: Option<Metric>,
        pub o3: Option<Metric>,
        pub no2: Option<Metric>,
        pub no: Option<Metric>,
        pub so2: Option<Metric>,
        pub co: Option<Metric>,
        #[serde(rename = "w")]
        pub wind: Option<Metric>,
        #[serde(rename = "h")]
        pub humidity: Option<Metric>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Metric {
        pub v: f64,
    }

    impl Iaqi {
        pub fn value_of(metric: &Option<Metric>) -> f32 {
            metric.as_ref().map(|m| m.v as f32).unwrap_or(0.0)
        }
    }
}

impl From<waqi::Payload> for AqiReading {
    fn from(payload: waqi::Payload) -> Self {
        let iaqi = &payload.iaqi;
        AqiReading {
            aqi: payload.aqi.as_u32(),
            pm25: waqi::Iaqi::value_of(&iaqi.pm25),
            pm10: waqi::Iaqi::value_of(&iaqi.pm10),
            o3: waqi::Iaqi::value_of(&iaqi.o3),
            no2: waqi::Iaqi::value_of(&iaqi.no2),
            no: waqi::Iaqi::value_of(&iaqi.no),
            so2: waqi::Iaqi::value_of(&iaqi.so2),
            co: waqi::Iaqi::value_of(&iaqi.co),
            wind_speed: waqi::Iaqi::value_of(&iaqi.wind),
            humidity: waqi::Iaqi::value_of(&iaqi.humidity),
            origin: DataOrigin::Live,
            recorded_at: Utc::now(),
        }
    }
}
