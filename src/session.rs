//! Dashboard session state.
//!
//! A session tracks which location the user is looking at. Location switches
//! are debounced: a switch only becomes a fetch after the debounce window
//! passes with no further switch. Every switch bumps a generation counter,
//! and a resolved reading is only applied if its generation is still the
//! current one, so a slow fetch for an abandoned selection can never
//! overwrite data for the location the user actually settled on.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::locations::MonitoredLocation;
use crate::models::AqiReading;
use crate::sources::SourceChain;
use crate::Result;

/// Per-viewer selection state with debounce and staleness protection.
#[derive(Debug)]
pub struct DashboardSession {
    current: MonitoredLocation,
    generation: u64,
    pending: Option<u64>,
    debounce: Duration,
    last_reading: Option<AqiReading>,
}

impl DashboardSession {
    #[must_use]
    pub fn new(initial: MonitoredLocation, debounce: Duration) -> Self {
        Self {
            current: initial,
            generation: 0,
            pending: Some(0),
            debounce,
            last_reading: None,
        }
    }

    /// The location currently selected.
    #[must_use]
    pub fn current_location(&self) -> MonitoredLocation {
        self.current
    }

    /// The reading currently shown, if any has been applied yet.
    #[must_use]
    pub fn last_reading(&self) -> Option<&AqiReading> {
        self.last_reading.as_ref()
    }

    /// The generation stamp of the current selection.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch to a new location by user input.
    ///
    /// Rejects input not on the whitelist without touching the current
    /// selection. A successful switch discards the displayed reading,
    /// bumps the generation, marks a fetch pending and returns the new
    /// generation stamp.
    pub fn select_location(&mut self, input: &str) -> Result<u64> {
        let location = MonitoredLocation::parse(input)?;
        self.current = location;
        self.generation += 1;
        self.pending = Some(self.generation);
        self.last_reading = None;
        debug!(
            "Selection switched to {} (generation {})",
            location.name(),
            self.generation
        );
        Ok(self.generation)
    }

    /// Schedule a refresh of the current selection, leaving the displayed
    /// reading in place until the new one arrives.
    ///
    /// Bumps the generation, so a still-running fetch from before the
    /// refresh is discarded rather than applied late. Intended to be driven
    /// by a fixed-interval timer in the embedding UI.
    pub fn schedule_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.pending = Some(self.generation);
        debug!(
            "Refresh scheduled for {} (generation {})",
            self.current.name(),
            self.generation
        );
        self.generation
    }

    /// Apply a reading resolved for the given generation.
    ///
    /// Returns `false` and discards the reading if the selection has moved
    /// on since that generation was issued.
    pub fn apply_reading(&mut self, generation: u64, reading: AqiReading) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding stale reading for generation {generation} (current is {})",
                self.generation
            );
            return false;
        }
        self.pending = None;
        self.last_reading = Some(reading);
        true
    }

    /// Wait out the debounce window, then resolve and apply a reading for
    /// the pending selection.
    ///
    /// If a further switch happens while waiting (observable because the
    /// caller re-enters with a newer generation), the older settle call
    /// finds its generation stale and applies nothing. Returns the applied
    /// reading, or `None` when nothing was pending or the selection moved on.
    pub async fn settle(&mut self, chain: &SourceChain) -> Option<AqiReading> {
        let pending = self.pending?;
        sleep(self.debounce).await;
        if pending != self.generation {
            debug!("Debounce window superseded (generation {pending})");
            return None;
        }
        let location = self.current;
        let reading = chain.resolve(location).await;
        if self.apply_reading(pending, reading.clone()) {
            info!(
                "Settled on {} with AQI {} ({})",
                location.name(),
                reading.aqi,
                reading.origin
            );
            Some(reading)
        } else {
            None
        }
    }
}

/// Convenience for one-shot endpoints with no standing session: parse the
/// location and resolve it through the chain immediately, no debounce.
pub async fn resolve_once(chain: &SourceChain, input: &str) -> Result<(MonitoredLocation, AqiReading)> {
    let location = MonitoredLocation::parse(input)?;
    let reading = chain.resolve(location).await;
    Ok((location, reading))
}
