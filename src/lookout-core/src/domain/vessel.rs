use std::{fmt::Display, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use geo::{Point, point};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{CoreResult, Error};

pub const MILITARY_PRIORITY: u32 = 100;
pub const DARK_PRIORITY: u32 = 50;

/// Name prefix used by the Royal Thai Navy.
static MILITARY_NAME_PREFIX: &str = "HTMS";
static MILITARY_NAME_MARKER: &str = "naval";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Mmsi(i32);

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, AsRefStr, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ShipType {
    Military,
    Commercial,
    #[default]
    Unknown,
}

/// A single record as delivered by the snapshot source.
///
/// The signal fields may be precomputed upstream, absent values are derived during ingest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselSnapshot {
    pub mmsi: Mmsi,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub is_dark: Option<bool>,
    pub in_coverage: Option<bool>,
    pub gap_minutes: Option<f64>,
    pub ship_type: Option<String>,
}

/// A vessel with all derived fields computed for the current ingest cycle.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub mmsi: Mmsi,
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub course: f64,
    pub timestamp: DateTime<Utc>,
    pub estimated_latitude: f64,
    pub estimated_longitude: f64,
    pub is_dark: bool,
    pub in_coverage: bool,
    pub gap_minutes: i64,
    pub ship_type: ShipType,
}

impl Mmsi {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FromStr for Mmsi {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i32> for Mmsi {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Mmsi> for i32 {
    fn from(value: Mmsi) -> Self {
        value.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ShipType {
    /// Classifies a vessel by naming convention, this is not an authoritative source.
    pub fn from_name(name: Option<&str>) -> ShipType {
        match name {
            None => ShipType::Unknown,
            Some(name)
                if name.starts_with(MILITARY_NAME_PREFIX)
                    || name.to_lowercase().contains(MILITARY_NAME_MARKER) =>
            {
                ShipType::Military
            }
            Some(_) => ShipType::Commercial,
        }
    }

    /// Prefers a recognised upstream value and falls back to the naming heuristic.
    pub fn resolve(reported: Option<&str>, name: Option<&str>) -> ShipType {
        reported
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| ShipType::from_name(name))
    }
}

impl VesselSnapshot {
    /// Returns the reported fix, rejecting missing, non-finite and out of range coordinates.
    pub fn position(&self) -> CoreResult<Point<f64>> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude))
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Ok(point!(x: longitude, y: latitude))
            }
            _ => Err(Error::invalid_coordinates(
                self.mmsi,
                self.latitude,
                self.longitude,
            )),
        }
    }
}

impl Vessel {
    pub fn id(&self) -> String {
        self.mmsi.to_string()
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.mmsi.to_string(),
        }
    }

    pub fn is_military(&self) -> bool {
        self.ship_type == ShipType::Military
    }

    pub fn has_finite_position(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn priority_score(&self) -> u32 {
        let military = if self.is_military() {
            MILITARY_PRIORITY
        } else {
            0
        };
        let dark = if self.is_dark { DARK_PRIORITY } else { 0 };
        military + dark
    }

    pub fn position(&self) -> Point<f64> {
        point!(x: self.longitude, y: self.latitude)
    }

    pub fn estimated_position(&self) -> Point<f64> {
        point!(x: self.estimated_longitude, y: self.estimated_latitude)
    }
}

#[cfg(feature = "test")]
mod test {
    use rand::random_range;

    use super::*;

    impl Mmsi {
        pub fn test_new(mmsi: i32) -> Self {
            Self(mmsi)
        }
    }

    impl VesselSnapshot {
        pub fn test_default(mmsi: Option<Mmsi>) -> VesselSnapshot {
            VesselSnapshot {
                mmsi: mmsi
                    .unwrap_or_else(|| Mmsi::test_new(random_range(100_000_000..999_999_999))),
                name: Some("MV Bangkok Express".to_string()),
                latitude: Some(13.72),
                longitude: Some(100.55),
                speed: Some(8.2),
                course: Some(90.0),
                timestamp: Utc::now(),
                is_dark: None,
                in_coverage: None,
                gap_minutes: None,
                ship_type: None,
            }
        }
    }

    impl Vessel {
        pub fn test_default(mmsi: Option<Mmsi>) -> Vessel {
            Vessel {
                mmsi: mmsi
                    .unwrap_or_else(|| Mmsi::test_new(random_range(100_000_000..999_999_999))),
                name: Some("MV Bangkok Express".to_string()),
                latitude: 13.72,
                longitude: 100.55,
                speed: 8.2,
                course: 90.0,
                timestamp: Utc::now(),
                estimated_latitude: 13.72,
                estimated_longitude: 100.55,
                is_dark: false,
                in_coverage: true,
                gap_minutes: 0,
                ship_type: ShipType::Commercial,
            }
        }
    }
}
