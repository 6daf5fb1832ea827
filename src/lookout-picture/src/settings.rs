use std::time::Duration;

use config::{Config, ConfigError, File};
use lookout_core::Viewport;
use serde::Deserialize;
use snafu::ResultExt;
use strum::{AsRefStr, EnumString};

use crate::{
    AlertSettings, ClusterSettings, CoverageSettings, DEFAULT_DEMO_ALERT_PROBABILITY,
    EstimatorSettings,
    error::{Result, error::ConfigSnafu},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub estimator: EstimatorSettings,
    #[serde(default)]
    pub coverage: CoverageSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
    #[serde(default)]
    pub cluster: ClusterSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Snapshot endpoint, the demo source is used when absent.
    pub source_url: Option<String>,
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
    /// Chance per cycle that the demo source raises a synthetic alert.
    pub demo_alert_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub target_fps: u32,
    /// Run clustering on a dedicated worker thread instead of the render task.
    pub use_worker: bool,
    pub initial_viewport: Viewport,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            source_url: None,
            fetch_timeout: Duration::from_secs(5),
            demo_alert_probability: DEFAULT_DEMO_ALERT_PROBABILITY,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            use_worker: true,
            initial_viewport: Viewport::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self> {
        let environment = std::env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse::<Environment>().ok())
            .unwrap_or_default();

        Self::load(environment).context(ConfigSnafu)
    }

    fn load(environment: Environment) -> std::result::Result<Self, ConfigError> {
        let environment = environment.as_ref();

        Config::builder()
            .add_source(File::with_name(&format!("config/{environment}")).required(true))
            .add_source(File::with_name(&format!("config/{environment}.secret")).required(false))
            .add_source(config::Environment::with_prefix("LOOKOUT").separator("__"))
            .set_override("environment", environment)?
            .build()?
            .try_deserialize()
    }
}
