//! `AeroGuard` - Air quality monitoring and advisory service
//!
//! This library provides AQI classification, live and synthetic readings
//! for a fixed set of monitored locations, hourly forecasts, health risk
//! assessment and spatial summaries, served over an HTTP API.

pub mod api;
pub mod cache;
pub mod classification;
pub mod config;
pub mod error;
pub mod health_risk;
pub mod locations;
pub mod models;
pub mod session;
pub mod sources;
pub mod spatial;
pub mod synthetic;
pub mod uploads;
pub mod web;

// Re-export core types for public API
pub use api::AqiClient;
pub use classification::{AqiCategory, Classification, classify, gauge_angle};
pub use config::AeroGuardConfig;
pub use error::AeroGuardError;
pub use health_risk::{HealthRiskAssessment, HealthRiskRequest, Persona, RiskCategory};
pub use locations::MonitoredLocation;
pub use models::{AqiReading, DataOrigin, ForecastPoint};
pub use session::DashboardSession;
pub use sources::{ReadingSource, SourceChain};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AeroGuardError>;
