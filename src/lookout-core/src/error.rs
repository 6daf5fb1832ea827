use snafu::{Location, Snafu};

use crate::Mmsi;

pub type CoreResult<T> = std::result::Result<T, Error>;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Snafu)]
#[snafu(module(core_error), visibility(pub))]
pub enum Error {
    #[snafu(display(
        "Invalid position for vessel '{mmsi}', latitude: '{latitude:?}', longitude: '{longitude:?}'"
    ))]
    InvalidCoordinates {
        #[snafu(implicit)]
        location: Location,
        mmsi: Mmsi,
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    #[snafu(display("Snapshot source failed: {error}"))]
    SnapshotSource {
        #[snafu(implicit)]
        location: Location,
        error: BoxedError,
    },
    #[snafu(display("Cluster worker is no longer running"))]
    ClusterWorkerClosed {
        #[snafu(implicit)]
        location: Location,
    },
}

impl Error {
    #[track_caller]
    pub fn invalid_coordinates(mmsi: Mmsi, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        core_error::InvalidCoordinatesSnafu {
            mmsi,
            latitude,
            longitude,
        }
        .build()
    }

    #[track_caller]
    pub fn snapshot_source(error: impl Into<BoxedError>) -> Self {
        core_error::SnapshotSourceSnafu {
            error: error.into(),
        }
        .build()
    }

    #[track_caller]
    pub fn cluster_worker_closed() -> Self {
        core_error::ClusterWorkerClosedSnafu.build()
    }
}
