//! HTTP client for the World Air Quality Index service
//!
//! Fetches the current observation for a monitored location's coordinates.
//! One attempt per request; retry policy is the caller's concern (the source
//! chain falls through to cached or synthetic data on failure).

use crate::config::UpstreamConfig;
use crate::locations::MonitoredLocation;
use crate::models::{AqiReading, waqi};
use crate::{AeroGuardError, Result};
use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for the upstream AQI service
#[derive(Debug, Clone)]
pub struct AqiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl AqiClient {
    /// Create a new AQI service client
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("AeroGuard/0.1.0")
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Fetch the current reading for a location via the geo feed.
    ///
    /// Returns an [`AeroGuardError::Api`] on transport failures, non-2xx
    /// responses, or an upstream envelope whose status is not "ok".
    #[instrument(skip(self), fields(location = location.name()))]
    pub async fn fetch_current(&self, location: MonitoredLocation) -> Result<AqiReading> {
        let (lat, lon) = location.coordinates();
        let url = format!(
            "{}/feed/geo:{lat};{lon}/?token={}",
            self.base_url,
            urlencoding::encode(&self.token)
        );

        debug!("AQI service request for {}", location.name());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AeroGuardError::api(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("AQI service returned HTTP {status}");
            return Err(AeroGuardError::api(format!(
                "AQI service returned HTTP {status}"
            )));
        }

        let envelope: waqi::Envelope = response
            .json()
            .await
            .map_err(|e| AeroGuardError::api(format!("Failed to parse response: {e}")))?;

        if envelope.status != "ok" {
            return Err(AeroGuardError::api(format!(
                "AQI service rejected the request: status '{}'",
                envelope.status
            )));
        }

        let payload = envelope
            .data
            .ok_or_else(|| AeroGuardError::api("AQI service response had no data"))?;

        let reading: AqiReading = payload.into();
        info!(
            "Fetched live reading for {}: AQI {}",
            location.name(),
            reading.aqi
        );
        Ok(reading)
    }
}
