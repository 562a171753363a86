//! Reading acquisition strategies.
//!
//! A [`SourceChain`] holds an ordered list of [`ReadingSource`] strategies
//! and asks each in turn until one yields a reading. The default chain is
//! live service, then local cache, then the static baseline table; the last
//! link always succeeds, so a chain resolution cannot fail outright.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::AqiClient;
use crate::cache::{self, reading_key};
use crate::locations::MonitoredLocation;
use crate::models::{AqiReading, DataOrigin};
use crate::synthetic;

/// A strategy for obtaining the current reading of a location.
///
/// Returning `Ok(None)` means "this source has nothing for that location,
/// try the next one"; `Err` means the attempt itself failed and the chain
/// likewise moves on.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &'static str;

    async fn fetch(&self, location: MonitoredLocation) -> anyhow::Result<Option<AqiReading>>;
}

/// Fetches a fresh observation from the upstream service and refreshes the
/// cache with it.
pub struct LiveSource {
    client: AqiClient,
    cache_ttl: Duration,
}

impl LiveSource {
    #[must_use]
    pub fn new(client: AqiClient, cache_ttl: Duration) -> Self {
        Self { client, cache_ttl }
    }
}

#[async_trait]
impl ReadingSource for LiveSource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn fetch(&self, location: MonitoredLocation) -> anyhow::Result<Option<AqiReading>> {
        let reading = self.client.fetch_current(location).await?;
        if reading.is_empty() {
            // Station is up but reports no data; let the chain fall through.
            return Ok(None);
        }
        if let Err(e) = cache::put(&reading_key(location), reading.clone(), self.cache_ttl).await {
            warn!("Failed to cache live reading for {}: {e}", location.name());
        }
        Ok(Some(reading))
    }
}

/// Serves the most recent cached reading, re-tagged as cached data.
pub struct CachedSource;

#[async_trait]
impl ReadingSource for CachedSource {
    fn name(&self) -> &'static str {
        "cached"
    }

    async fn fetch(&self, location: MonitoredLocation) -> anyhow::Result<Option<AqiReading>> {
        let cached: Option<AqiReading> = cache::get(&reading_key(location)).await?;
        Ok(cached.map(|mut reading| {
            reading.origin = DataOrigin::Cached;
            reading
        }))
    }
}

/// Fabricates a reading from the per-location baseline table. Never fails
/// and never returns `None`.
pub struct StaticTableSource;

#[async_trait]
impl ReadingSource for StaticTableSource {
    fn name(&self) -> &'static str {
        "static-table"
    }

    async fn fetch(&self, location: MonitoredLocation) -> anyhow::Result<Option<AqiReading>> {
        Ok(Some(synthetic::fallback_reading(location)))
    }
}

/// Ordered list of sources, tried front to back.
pub struct SourceChain {
    sources: Vec<Box<dyn ReadingSource>>,
}

impl SourceChain {
    #[must_use]
    pub fn new(sources: Vec<Box<dyn ReadingSource>>) -> Self {
        Self { sources }
    }

    /// The standard chain: live service, then cache, then baseline table.
    #[must_use]
    pub fn standard(client: AqiClient, cache_ttl: Duration) -> Self {
        Self::new(vec![
            Box::new(LiveSource::new(client, cache_ttl)),
            Box::new(CachedSource),
            Box::new(StaticTableSource),
        ])
    }

    /// Resolve a reading for the location by trying each source in order.
    ///
    /// Always produces a reading as long as the chain ends in a source that
    /// cannot fail; an exhausted chain yields the all-zero sentinel.
    pub async fn resolve(&self, location: MonitoredLocation) -> AqiReading {
        for source in &self.sources {
            match source.fetch(location).await {
                Ok(Some(reading)) => {
                    info!(
                        "Resolved {} from source '{}' (AQI {})",
                        location.name(),
                        source.name(),
                        reading.aqi
                    );
                    return reading;
                }
                Ok(None) => {
                    debug!(
                        "Source '{}' had nothing for {}",
                        source.name(),
                        location.name()
                    );
                }
                Err(e) => {
                    warn!(
                        "Source '{}' failed for {}: {e}",
                        source.name(),
                        location.name()
                    );
                }
            }
        }
        warn!("All sources exhausted for {}", location.name());
        AqiReading::empty(DataOrigin::Synthetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl ReadingSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self, _: MonitoredLocation) -> anyhow::Result<Option<AqiReading>> {
            anyhow::bail!("connection refused")
        }
    }

    struct EmptySource;

    #[async_trait]
    impl ReadingSource for EmptySource {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn fetch(&self, _: MonitoredLocation) -> anyhow::Result<Option<AqiReading>> {
            Ok(None)
        }
    }

    struct FixedSource(u32);

    #[async_trait]
    impl ReadingSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch(&self, _: MonitoredLocation) -> anyhow::Result<Option<AqiReading>> {
            Ok(Some(crate::synthetic::derive_reading(
                self.0,
                DataOrigin::Live,
            )))
        }
    }

    #[tokio::test]
    async fn test_chain_falls_through_failures() {
        let chain = SourceChain::new(vec![
            Box::new(FailingSource),
            Box::new(EmptySource),
            Box::new(FixedSource(108)),
        ]);
        let reading = chain.resolve(MonitoredLocation::Vashi).await;
        assert_eq!(reading.aqi, 108);
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain = SourceChain::new(vec![Box::new(FixedSource(55)), Box::new(FixedSource(200))]);
        let reading = chain.resolve(MonitoredLocation::Sanpada).await;
        assert_eq!(reading.aqi, 55);
    }

    #[tokio::test]
    async fn test_exhausted_chain_yields_sentinel() {
        let chain = SourceChain::new(vec![Box::new(FailingSource), Box::new(EmptySource)]);
        let reading = chain.resolve(MonitoredLocation::Mumbai).await;
        assert!(reading.is_empty());
        assert_eq!(reading.origin, DataOrigin::Synthetic);
    }

    #[tokio::test]
    async fn test_static_table_always_produces() {
        let chain = SourceChain::new(vec![Box::new(StaticTableSource)]);
        for location in MonitoredLocation::ALL {
            let reading = chain.resolve(location).await;
            assert!(!reading.is_empty());
            assert_eq!(reading.origin, DataOrigin::Synthetic);
        }
    }
}
