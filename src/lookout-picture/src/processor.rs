use chrono::{DateTime, Utc};
use lookout_core::{CoreResult, ShipType, Vessel, VesselSnapshot};
use tracing::{debug, warn};

use crate::{CoverageClassifier, PositionEstimator};

/// Derives the per-cycle fields of every vessel in a snapshot.
#[derive(Debug, Clone)]
pub struct VesselProcessor {
    estimator: PositionEstimator,
    classifier: CoverageClassifier,
}

impl VesselProcessor {
    pub fn new(estimator: PositionEstimator, classifier: CoverageClassifier) -> Self {
        Self {
            estimator,
            classifier,
        }
    }

    /// Processes the snapshot in input order, records with unusable coordinates are dropped.
    pub fn process(&self, snapshots: Vec<VesselSnapshot>, now: DateTime<Utc>) -> Vec<Vessel> {
        let num_snapshots = snapshots.len();

        let vessels: Vec<Vessel> = snapshots
            .into_iter()
            .filter_map(|s| match self.process_snapshot(s, now) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("dropping vessel record: {e}");
                    None
                }
            })
            .collect();

        debug!(
            "processed {} of {num_snapshots} vessel records",
            vessels.len()
        );

        vessels
    }

    pub fn process_snapshot(
        &self,
        snapshot: VesselSnapshot,
        now: DateTime<Utc>,
    ) -> CoreResult<Vessel> {
        let position = snapshot.position()?;
        let (latitude, longitude) = (position.y(), position.x());

        let VesselSnapshot {
            mmsi,
            name,
            latitude: _,
            longitude: _,
            speed,
            course,
            timestamp,
            is_dark,
            in_coverage,
            gap_minutes,
            ship_type,
        } = snapshot;

        let speed = speed.filter(|s| s.is_finite() && *s >= 0.0).unwrap_or(0.0);
        let course = course
            .filter(|c| c.is_finite())
            .map(|c| c.rem_euclid(360.0))
            .unwrap_or(0.0);

        let gap_minutes = match gap_minutes.filter(|g| g.is_finite()) {
            Some(gap) => gap.round() as i64,
            None => crate::coverage::gap_minutes(timestamp, now),
        };
        let is_dark = is_dark.unwrap_or_else(|| self.classifier.is_dark(gap_minutes));
        let in_coverage =
            in_coverage.unwrap_or_else(|| self.classifier.in_coverage(latitude, longitude));

        let ship_type = ShipType::resolve(ship_type.as_deref(), name.as_deref());

        let estimated = self
            .estimator
            .estimate(latitude, longitude, speed, course, timestamp, now);

        Ok(Vessel {
            mmsi,
            name,
            latitude,
            longitude,
            speed,
            course,
            timestamp,
            estimated_latitude: estimated.y(),
            estimated_longitude: estimated.x(),
            is_dark,
            in_coverage,
            gap_minutes,
            ship_type,
        })
    }
}
