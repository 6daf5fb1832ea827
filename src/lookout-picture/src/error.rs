use reqwest::StatusCode;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to load settings"))]
    Config {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: config::ConfigError,
    },
    #[snafu(display("HTTP reqwest error"))]
    #[snafu(context(false))]
    Http {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest::Error,
    },
    #[snafu(display("HTTP request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("Invalid snapshot source url: '{url}'"))]
    InvalidUrl {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
    #[snafu(display("Snapshot source at '{url}' reported an unsuccessful response"))]
    UnsuccessfulSnapshot {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
    #[snafu(display("Failed to spawn the cluster worker thread"))]
    WorkerSpawn {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Core error"))]
    #[snafu(context(false))]
    Core {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: lookout_core::Error,
    },
    #[snafu(display("Failed to listen for the shutdown signal"))]
    Signal {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
}
