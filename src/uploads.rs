//! Startup consumption of uploaded reading files.
//!
//! Operators can drop JSON files into the uploads directory to seed the
//! cache with manual observations (for stations the service cannot reach,
//! or for testing). Each file holds an array of readings; files are
//! consumed once at startup and deleted afterwards. A malformed file is
//! logged and skipped, never fatal.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::cache::{self, reading_key};
use crate::locations::MonitoredLocation;
use crate::models::DataOrigin;
use crate::synthetic::derive_reading;

/// On-disk format of one uploaded reading.
#[derive(Debug, Deserialize)]
struct UploadedReading {
    location: String,
    aqi: u32,
}

/// Outcome of one consumption pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Readings seeded into the cache
    pub consumed: usize,
    /// Files that could not be parsed or applied
    pub skipped: usize,
}

/// Consume every `.json` file in the uploads directory into the cache.
///
/// A missing directory is not an error; there is simply nothing to consume.
pub async fn consume_uploads(dir: &Path, cache_ttl: Duration) -> anyhow::Result<UploadSummary> {
    let mut summary = UploadSummary::default();

    if !dir.is_dir() {
        info!("No uploads directory at {}, skipping", dir.display());
        return Ok(summary);
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match consume_file(&path, cache_ttl).await {
            Ok(count) => {
                summary.consumed += count;
                info!("Consumed {} reading(s) from {}", count, path.display());
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    warn!("Could not remove consumed upload {}: {e}", path.display());
                }
            }
            Err(e) => {
                summary.skipped += 1;
                warn!("Skipping upload {}: {e}", path.display());
            }
        }
    }

    info!(
        "Upload pass done: {} reading(s) consumed, {} file(s) skipped",
        summary.consumed, summary.skipped
    );
    Ok(summary)
}

/// Parse one file (a JSON array of readings) and seed each into the cache.
/// Any invalid entry fails the whole file so partial uploads don't go
/// unnoticed.
async fn consume_file(path: &Path, cache_ttl: Duration) -> anyhow::Result<usize> {
    let raw = tokio::fs::read_to_string(path).await?;
    let uploads: Vec<UploadedReading> = serde_json::from_str(&raw)?;

    let mut parsed = Vec::with_capacity(uploads.len());
    for upload in &uploads {
        let location = MonitoredLocation::parse(&upload.location)?;
        if upload.aqi == 0 || upload.aqi > 500 {
            anyhow::bail!("AQI {} out of range (1-500)", upload.aqi);
        }
        parsed.push((location, upload.aqi));
    }

    for (location, aqi) in &parsed {
        let reading = derive_reading(*aqi, DataOrigin::Cached);
        cache::put(&reading_key(*location), reading, cache_ttl).await?;
    }
    Ok(parsed.len())
}
