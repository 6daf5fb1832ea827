use std::time::Duration;

use chrono::{DateTime, Utc};
use geo::{Point, point};
use lookout_core::destination;
use serde::Deserialize;

static SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Fixes older than this are not extrapolated.
    #[serde(with = "humantime_serde")]
    pub max_horizon: Duration,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            max_horizon: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Dead reckoning from the last known fix.
#[derive(Debug, Clone)]
pub struct PositionEstimator {
    max_horizon: Duration,
}

impl PositionEstimator {
    pub fn new(settings: &EstimatorSettings) -> Self {
        Self {
            max_horizon: settings.max_horizon,
        }
    }

    /// Predicts where a vessel is at `now` assuming it kept its speed and course since
    /// `last_seen`.
    ///
    /// Negative elapsed time (clock skew) and fixes older than the horizon return the input
    /// position unchanged.
    pub fn estimate(
        &self,
        latitude: f64,
        longitude: f64,
        speed_knots: f64,
        course_degrees: f64,
        last_seen: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Point<f64> {
        let origin = point!(x: longitude, y: latitude);

        let elapsed = match (now - last_seen).to_std() {
            Ok(elapsed) if elapsed <= self.max_horizon => elapsed,
            _ => return origin,
        };

        let hours = elapsed.as_secs_f64() / SECONDS_PER_HOUR;

        destination(origin, course_degrees, speed_knots * hours)
    }
}
