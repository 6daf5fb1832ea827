use std::sync::Arc;

use chrono::{DateTime, Utc};
use lookout_core::{Alert, AlertFeed, VesselPicture, VesselSnapshot};
use tracing::debug;

use crate::{AlertManager, VesselProcessor};

/// Owns the vessel and alert state between ingest cycles.
#[derive(Debug, Clone)]
pub struct Picture {
    processor: VesselProcessor,
    alerts: AlertManager,
}

impl Picture {
    pub fn new(processor: VesselProcessor, alerts: AlertManager) -> Self {
        Self { processor, alerts }
    }

    pub fn alerts(&self) -> &AlertManager {
        &self.alerts
    }

    /// Records alerts raised outside the dark vessel check and returns the updated feed.
    pub fn add_alerts(&mut self, alerts: Vec<Alert>) -> Arc<AlertFeed> {
        for alert in alerts {
            self.alerts.add_alert(alert);
        }
        Arc::new(self.alerts.feed())
    }

    /// Replaces the vessel set with `snapshots` and raises alerts for it.
    pub fn ingest(
        &mut self,
        snapshots: Vec<VesselSnapshot>,
        now: DateTime<Utc>,
    ) -> (Arc<VesselPicture>, Arc<AlertFeed>) {
        let vessels = self.processor.process(snapshots, now);
        let raised = self.alerts.observe(&vessels, now);

        debug!(
            "ingested {} vessels, raised {raised} alerts",
            vessels.len()
        );

        (
            Arc::new(VesselPicture::new(vessels, now)),
            Arc::new(self.alerts.feed()),
        )
    }
}
