//! Synthetic data derivation.
//!
//! When the upstream service cannot be reached, readings and forecasts are
//! fabricated from a per-location baseline. Pollutant concentrations are
//! derived from the AQI with fixed empirical ratios so the fabricated data
//! stays internally consistent. Everything produced here is tagged
//! [`DataOrigin::Synthetic`].

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::RngExt;

use crate::classification::AqiCategory;
use crate::locations::MonitoredLocation;
use crate::models::{AqiReading, DataOrigin, ForecastPoint};

// Pollutant-to-AQI ratios observed in the monitored region.
const PM25_RATIO: f32 = 0.56;
const PM10_RATIO: f32 = 0.79;
const O3_RATIO: f32 = 0.30;
const NO2_RATIO: f32 = 0.25;
const NO_RATIO: f32 = 0.12;
const SO2_RATIO: f32 = 0.08;
const CO_RATIO: f32 = 0.005;

// Meteorology placeholders for fabricated readings.
const WIND_PLACEHOLDER: f32 = 10.0;
const HUMIDITY_PLACEHOLDER: f32 = 60.0;

/// Derive a full pollutant breakdown from a bare AQI value.
///
/// An AQI of 0 is the "no data" sentinel and yields an all-zero reading,
/// placeholders included.
#[must_use]
pub fn derive_reading(aqi: u32, origin: DataOrigin) -> AqiReading {
    if aqi == 0 {
        return AqiReading::empty(origin);
    }
    let aqi_f = aqi as f32;
    AqiReading {
        aqi,
        pm25: aqi_f * PM25_RATIO,
        pm10: aqi_f * PM10_RATIO,
        o3: aqi_f * O3_RATIO,
        no2: aqi_f * NO2_RATIO,
        no: aqi_f * NO_RATIO,
        so2: aqi_f * SO2_RATIO,
        co: aqi_f * CO_RATIO,
        wind_speed: WIND_PLACEHOLDER,
        humidity: HUMIDITY_PLACEHOLDER,
        origin,
        recorded_at: Utc::now(),
    }
}

/// Fabricate a current reading for a location from its static baseline,
/// jittered by up to ±10% so repeated fallbacks don't look frozen.
#[must_use]
pub fn fallback_reading(location: MonitoredLocation) -> AqiReading {
    let jitter: f32 = rand::rng().random_range(0.9..1.1);
    let aqi = ((location.base_aqi() as f32) * jitter).round().max(1.0) as u32;
    derive_reading(aqi, DataOrigin::Synthetic)
}

/// Traffic-hour multiplier for the given UTC hour of day.
///
/// Morning and evening rush raise the baseline, the small hours lower it.
#[must_use]
pub fn diurnal_factor(hour: u32) -> f32 {
    match hour {
        7..=9 | 17..=19 => 1.2,
        22..=23 | 0..=5 => 0.8,
        _ => 1.0,
    }
}

/// Confidence for a forecast `h` hours out: 95% now, dropping 5 points per
/// hour, floored at 50%.
#[must_use]
pub fn forecast_confidence(hour_offset: u32) -> u32 {
    95u32.saturating_sub(5 * hour_offset).max(50)
}

/// Fabricate an hourly forecast from a base AQI.
///
/// Each hour applies random jitter in [0.85, 1.15] and the diurnal factor
/// for its wall-clock hour, then clamps into [20, 300].
#[must_use]
pub fn forecast(base_aqi: u32, hours: u32, now: DateTime<Utc>) -> Vec<ForecastPoint> {
    let mut rng = rand::rng();
    (1..=hours)
        .map(|offset| {
            let forecast_for = now + Duration::hours(i64::from(offset));
            let jitter: f32 = rng.random_range(0.85..=1.15);
            let raw = base_aqi as f32 * jitter * diurnal_factor(forecast_for.hour());
            let aqi = raw.round().clamp(20.0, 300.0) as u32;
            let category = AqiCategory::from_aqi(aqi);
            ForecastPoint {
                hour_offset: offset,
                forecast_for,
                aqi,
                category: category.label(),
                color: category.color(),
                confidence: forecast_confidence(offset),
            }
        })
        .collect()
}
