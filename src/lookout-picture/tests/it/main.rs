#![deny(rust_2018_idioms)]

use config::{Config, File};
use lookout_picture::settings::Settings;

pub mod helper;
pub mod ingest;
pub mod render;

fn load(file: &str, environment: &str) -> Settings {
    Config::builder()
        .add_source(File::with_name(file).required(true))
        .set_override("environment", environment)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap()
}

#[test]
fn test_local_settings_are_valid() {
    let settings = load("config/local.yml", "local");
    assert!(settings.ingest.source_url.is_none());
}

#[test]
fn test_development_settings_are_valid() {
    load("config/development.yml", "development");
}

#[test]
fn test_production_settings_are_valid() {
    let settings = load("config/production.yml", "production");
    assert_eq!(settings.alerts.max_alerts, 50);
    assert_eq!(settings.cluster.max_vessels, 200);
}

#[test]
fn test_test_settings_are_valid() {
    let settings = load("config/test.yml", "test");
    assert!(!settings.render.use_worker);
}
