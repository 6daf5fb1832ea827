use geo::{Point, point};
use serde::{Deserialize, Serialize};

/// A coastal receiver station approximating where AIS reception is expected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CoverageHub {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of classifying a vessel against the coverage hubs and the silence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalStatus {
    pub is_dark: bool,
    pub in_coverage: bool,
    pub gap_minutes: i64,
}

impl CoverageHub {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    pub fn point(&self) -> Point<f64> {
        point!(x: self.longitude, y: self.latitude)
    }
}

pub fn default_coverage_hubs() -> Vec<CoverageHub> {
    vec![
        CoverageHub::new("Suez", 29.9, 32.5),
        CoverageHub::new("Bab-el-Mandeb", 12.6, 43.4),
        CoverageHub::new("Singapore", 1.3, 103.8),
        CoverageHub::new("Gulf of Thailand", 12.7, 100.9),
        CoverageHub::new("Hormuz", 26.6, 56.5),
        CoverageHub::new("Colombo", 6.9, 79.8),
    ]
}
