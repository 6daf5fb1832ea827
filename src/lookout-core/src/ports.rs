use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Alert, ClusterRequest, CoreResult, RenderRecord, VesselPicture, VesselSnapshot};

/// Delivers the latest known state of every tracked vessel.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self) -> CoreResult<Vec<VesselSnapshot>>;

    /// Alerts the source raises itself for the picture built from its latest snapshot.
    fn alerts(&self, _picture: &VesselPicture, _now: DateTime<Utc>) -> Vec<Alert> {
        Vec::new()
    }
}

/// Turns a vessel set and a viewport into a bounded, styled render set.
///
/// Implementations may run the computation on another thread but must produce the same
/// output as an inline computation for the same input.
#[async_trait]
pub trait ClusterExecutor: Send + Sync {
    async fn compute(&self, request: ClusterRequest) -> CoreResult<Vec<RenderRecord>>;
}
