use chrono::{DateTime, Utc};
use lookout_core::{CoverageHub, SignalStatus, default_coverage_hubs};
use serde::Deserialize;

static SECONDS_PER_MINUTE: f64 = 60.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverageSettings {
    /// Planar distance in degrees (~110km at the equator), not a great-circle buffer.
    pub radius_degrees: f64,
    /// Vessels silent for longer than this are considered dark.
    pub dark_threshold_minutes: i64,
    pub hubs: Vec<CoverageHub>,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            radius_degrees: 1.0,
            dark_threshold_minutes: 15,
            hubs: default_coverage_hubs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoverageClassifier {
    hubs: Vec<CoverageHub>,
    radius_degrees: f64,
    dark_threshold_minutes: i64,
}

impl CoverageClassifier {
    pub fn new(settings: &CoverageSettings) -> Self {
        Self {
            hubs: settings.hubs.clone(),
            radius_degrees: settings.radius_degrees,
            dark_threshold_minutes: settings.dark_threshold_minutes,
        }
    }

    pub fn classify(
        &self,
        latitude: f64,
        longitude: f64,
        last_seen: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> SignalStatus {
        let gap_minutes = gap_minutes(last_seen, now);

        SignalStatus {
            is_dark: self.is_dark(gap_minutes),
            in_coverage: self.in_coverage(latitude, longitude),
            gap_minutes,
        }
    }

    pub fn is_dark(&self, gap_minutes: i64) -> bool {
        gap_minutes > self.dark_threshold_minutes
    }

    /// Whether the fix lies within the radius of any hub, the boundary counts as covered.
    pub fn in_coverage(&self, latitude: f64, longitude: f64) -> bool {
        self.hubs.iter().any(|hub| {
            let delta = hub.point() - geo::point!(x: longitude, y: latitude);
            delta.x().hypot(delta.y()) <= self.radius_degrees
        })
    }
}

/// Elapsed silence rounded to the nearest minute.
pub fn gap_minutes(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (now - last_seen).num_milliseconds() as f64 / 1000.0;
    (seconds / SECONDS_PER_MINUTE).round() as i64
}
