//! Spatial AQI summaries.
//!
//! Each monitored city has a fixed table of named sub-areas with baseline
//! AQI values. Sampling a city jitters each area by up to ±5 to simulate
//! live variation, clamps into the valid AQI range and computes dispersion
//! statistics across the areas.

use rand::RngExt;
use serde::Serialize;

use crate::classification::AqiCategory;
use crate::locations::MonitoredLocation;

/// A fixed sub-area baseline: name, latitude, longitude, typical AQI.
type AreaBaseline = (&'static str, f64, f64, i32);

const CBD_BELAPUR_AREAS: &[AreaBaseline] = &[
    ("CBD Belapur Central", 19.0158, 73.0295, 104),
    ("Belapur Railway Station", 19.0165, 73.0288, 112),
    ("CBD Belapur Market", 19.0148, 73.0302, 98),
    ("NMMT Bus Stand", 19.0172, 73.0279, 118),
    ("Belapur Creek", 19.0135, 73.0311, 89),
    ("Sector 15", 19.0189, 73.0267, 95),
    ("Sector 11", 19.0123, 73.0328, 102),
    ("Palm Beach Road", 19.0198, 73.0254, 108),
];

const VASHI_AREAS: &[AreaBaseline] = &[
    ("Vashi Railway Station", 19.0748, 72.9976, 109),
    ("Vashi Plaza", 19.0735, 72.9989, 115),
    ("Sector 17", 19.0762, 72.9954, 103),
    ("Vashi Beach", 19.0721, 72.9998, 87),
    ("Vashi Fort", 19.0756, 72.9962, 96),
    ("Sector 29", 19.0718, 73.0012, 112),
    ("Turbhe Naka", 19.0789, 72.9934, 121),
    ("Vashi Highway", 19.0774, 72.9948, 105),
];

const SANPADA_AREAS: &[AreaBaseline] = &[
    ("Sanpada Railway Station", 19.0209, 73.0069, 78),
    ("Sanpada Market", 19.0198, 73.0081, 82),
    ("Sector 6", 19.0221, 73.0056, 75),
    ("Sector 8", 19.0187, 73.0078, 80),
    ("Sanpada Lake", 19.0215, 73.0049, 71),
    ("Turbhe Station", 19.0234, 73.0038, 85),
    ("Sector 15A", 19.0176, 73.0092, 79),
    ("Sanpada Gaon", 19.0192, 73.0105, 76),
];

const MUMBAI_AREAS: &[AreaBaseline] = &[
    ("Gateway of India", 19.0218, 72.8646, 125),
    ("Marine Drive", 19.0004, 72.8268, 118),
    ("CST Railway Station", 19.0145, 72.8359, 132),
    ("Bandra-Worli Sea Link", 19.0300, 72.8170, 108),
    ("Juhu Beach", 19.1046, 72.8265, 95),
    ("Worli Sea Face", 19.0012, 72.8189, 112),
    ("Haji Ali", 18.9835, 72.8193, 105),
    ("Nariman Point", 18.9332, 72.8236, 120),
    ("Chhatrapati Shivaji Terminus", 19.0145, 72.8359, 135),
    ("Flora Fountain", 18.9315, 72.8266, 128),
];

/// The baseline area table of a city.
#[must_use]
pub fn area_table(location: MonitoredLocation) -> &'static [AreaBaseline] {
    match location {
        MonitoredLocation::CbdBelapur => CBD_BELAPUR_AREAS,
        MonitoredLocation::Vashi => VASHI_AREAS,
        MonitoredLocation::Sanpada => SANPADA_AREAS,
        MonitoredLocation::Mumbai => MUMBAI_AREAS,
    }
}

/// One sampled sub-area.
#[derive(Debug, Clone, Serialize)]
pub struct AreaSample {
    pub area: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub aqi: u32,
    pub category: &'static str,
    pub color: &'static str,
}

/// Dispersion statistics over a city's sampled areas.
#[derive(Debug, Clone, Serialize)]
pub struct SpatialStats {
    pub mean_aqi: f32,
    pub median_aqi: f32,
    pub std_aqi: f32,
    pub min_aqi: u32,
    pub max_aqi: u32,
    pub range_aqi: u32,
    pub coefficient_of_variation: f32,
    pub highest_area: &'static str,
    pub lowest_area: &'static str,
}

/// Full spatial summary response.
#[derive(Debug, Clone, Serialize)]
pub struct SpatialSummary {
    pub location: &'static str,
    pub total_areas: usize,
    pub areas: Vec<AreaSample>,
    pub stats: SpatialStats,
}

/// Sample every sub-area of a city with ±5 jitter, clamped to [0, 500].
#[must_use]
pub fn sample_areas(location: MonitoredLocation) -> Vec<AreaSample> {
    let mut rng = rand::rng();
    area_table(location)
        .iter()
        .map(|&(area, lat, lon, base)| {
            let jitter: i32 = rng.random_range(-5..=5);
            let aqi = (base + jitter).clamp(0, 500) as u32;
            let category = AqiCategory::from_aqi(aqi);
            AreaSample {
                area,
                lat,
                lon,
                aqi,
                category: category.label(),
                color: category.color(),
            }
        })
        .collect()
}

/// Compute dispersion statistics over a non-empty set of samples.
#[must_use]
pub fn compute_stats(samples: &[AreaSample]) -> SpatialStats {
    debug_assert!(!samples.is_empty());
    let n = samples.len() as f32;
    let mean = samples.iter().map(|s| s.aqi as f32).sum::<f32>() / n;

    let mut sorted: Vec<u32> = samples.iter().map(|s| s.aqi).collect();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f32 / 2.0
    } else {
        sorted[mid] as f32
    };

    // Sample standard deviation, matching the dispersion convention of the
    // statistics reported alongside it.
    let std = if samples.len() > 1 {
        let variance = samples
            .iter()
            .map(|s| (s.aqi as f32 - mean).powi(2))
            .sum::<f32>()
            / (n - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    let min = *sorted.first().unwrap_or(&0);
    let max = *sorted.last().unwrap_or(&0);
    let highest = samples.iter().max_by_key(|s| s.aqi).map_or("", |s| s.area);
    let lowest = samples.iter().min_by_key(|s| s.aqi).map_or("", |s| s.area);

    SpatialStats {
        mean_aqi: mean,
        median_aqi: median,
        std_aqi: std,
        min_aqi: min,
        max_aqi: max,
        range_aqi: max - min,
        coefficient_of_variation: if mean > 0.0 { std / mean } else { 0.0 },
        highest_area: highest,
        lowest_area: lowest,
    }
}

/// Sample a city and summarize it in one call.
#[must_use]
pub fn summarize(location: MonitoredLocation) -> SpatialSummary {
    let areas = sample_areas(location);
    let stats = compute_stats(&areas);
    SpatialSummary {
        location: location.name(),
        total_areas: areas.len(),
        areas,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_city_has_an_area_table() {
        for location in MonitoredLocation::ALL {
            assert!(!area_table(location).is_empty());
        }
        assert_eq!(area_table(MonitoredLocation::Mumbai).len(), 10);
        assert_eq!(area_table(MonitoredLocation::Vashi).len(), 8);
    }

    #[test]
    fn test_samples_stay_near_baseline() {
        for _ in 0..20 {
            let samples = sample_areas(MonitoredLocation::Sanpada);
            for (sample, &(name, _, _, base)) in
                samples.iter().zip(area_table(MonitoredLocation::Sanpada))
            {
                assert_eq!(sample.area, name);
                let delta = sample.aqi as i32 - base;
                assert!((-5..=5).contains(&delta), "delta {delta} out of range");
            }
        }
    }

    #[test]
    fn test_stats_on_known_samples() {
        let samples: Vec<AreaSample> = [("a", 80), ("b", 100), ("c", 120)]
            .iter()
            .map(|&(area, aqi)| AreaSample {
                area,
                lat: 0.0,
                lon: 0.0,
                aqi,
                category: AqiCategory::from_aqi(aqi).label(),
                color: AqiCategory::from_aqi(aqi).color(),
            })
            .collect();
        let stats = compute_stats(&samples);
        assert!((stats.mean_aqi - 100.0).abs() < 1e-4);
        assert!((stats.median_aqi - 100.0).abs() < 1e-4);
        assert_eq!(stats.min_aqi, 80);
        assert_eq!(stats.max_aqi, 120);
        assert_eq!(stats.range_aqi, 40);
        assert_eq!(stats.highest_area, "c");
        assert_eq!(stats.lowest_area, "a");
        // Sample std of {80, 100, 120} is 20.
        assert!((stats.std_aqi - 20.0).abs() < 1e-3);
        assert!((stats.coefficient_of_variation - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_even_count_median_averages_middle_pair() {
        let samples: Vec<AreaSample> = [("a", 70), ("b", 80), ("c", 90), ("d", 100)]
            .iter()
            .map(|&(area, aqi)| AreaSample {
                area,
                lat: 0.0,
                lon: 0.0,
                aqi,
                category: AqiCategory::from_aqi(aqi).label(),
                color: AqiCategory::from_aqi(aqi).color(),
            })
            .collect();
        let stats = compute_stats(&samples);
        assert!((stats.median_aqi - 85.0).abs() < 1e-4);
    }

    #[test]
    fn test_summary_shape() {
        let summary = summarize(MonitoredLocation::CbdBelapur);
        assert_eq!(summary.location, "CBD Belapur");
        assert_eq!(summary.total_areas, summary.areas.len());
        assert!(summary.stats.max_aqi >= summary.stats.min_aqi);
    }
}
