use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lookout_core::{CoreResult, SnapshotSource, VesselSnapshot};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{
    Error, Result,
    error::{FailedRequestSnafu, UnsuccessfulSnapshotSnafu},
};

/// Fetches snapshots from an HTTP endpoint serving the `{ success, data }` envelope.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    success: bool,
    // Records are decoded one at a time so a malformed record cannot fail the whole batch.
    #[serde(default)]
    data: Vec<Value>,
    count: Option<usize>,
    timestamp: Option<DateTime<Utc>>,
}

impl HttpSnapshotSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    #[instrument(skip_all, fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<VesselSnapshot>> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return FailedRequestSnafu {
                url: response.url().to_string(),
                status,
                body: response.text().await?,
            }
            .fail();
        }

        let body: SnapshotResponse = response.json().await?;
        if !body.success {
            return UnsuccessfulSnapshotSnafu {
                url: self.url.to_string(),
            }
            .fail();
        }

        debug!(
            "received {} vessel records, reported count: {:?}, generated at: {:?}",
            body.data.len(),
            body.count,
            body.timestamp
        );

        Ok(decode_records(body.data))
    }
}

fn decode_records(records: Vec<Value>) -> Vec<VesselSnapshot> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("skipping malformed vessel record: {e}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn snapshot(&self) -> CoreResult<Vec<VesselSnapshot>> {
        self.fetch()
            .await
            .map_err(|e: Error| lookout_core::Error::snapshot_source(e))
    }
}
