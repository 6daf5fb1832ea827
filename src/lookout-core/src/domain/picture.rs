use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ShipType, Vessel};

/// The vessel set published after every ingest cycle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselPicture {
    pub vessels: Vec<Vessel>,
    pub last_update: Option<DateTime<Utc>>,
}

impl VesselPicture {
    pub fn new(vessels: Vec<Vessel>, last_update: DateTime<Utc>) -> Self {
        Self {
            vessels,
            last_update: Some(last_update),
        }
    }

    pub fn of_type(&self, ship_type: ShipType) -> impl Iterator<Item = &Vessel> {
        self.vessels.iter().filter(move |v| v.ship_type == ship_type)
    }

    pub fn military(&self) -> impl Iterator<Item = &Vessel> {
        self.of_type(ShipType::Military)
    }

    pub fn commercial(&self) -> impl Iterator<Item = &Vessel> {
        self.of_type(ShipType::Commercial)
    }

    pub fn unknown(&self) -> impl Iterator<Item = &Vessel> {
        self.of_type(ShipType::Unknown)
    }

    pub fn dark(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.iter().filter(|v| v.is_dark)
    }
}
