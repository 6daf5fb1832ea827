use std::{fmt::Display, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use uuid::Uuid;

use crate::Vessel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AlertId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertType {
    Military,
    ZoneBreach,
    Suspicious,
    DarkVessel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityType {
    Alert,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Copy of the vessel at the time the alert was raised.
    pub vessel: Option<Vessel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActivityEntry {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Published copy of the alert and activity histories, both newest first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AlertFeed {
    pub alerts: Vec<Alert>,
    pub activity: Vec<ActivityEntry>,
}

impl AlertId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Alert {
    pub fn new(
        alert_type: AlertType,
        message: String,
        timestamp: DateTime<Utc>,
        vessel: Option<Vessel>,
    ) -> Self {
        Self {
            id: AlertId::new(),
            alert_type,
            message,
            timestamp,
            vessel,
        }
    }

    pub fn references(&self, vessel: &Vessel) -> bool {
        self.vessel.as_ref().is_some_and(|v| v.mmsi == vessel.mmsi)
    }

    /// An alert is active while it is younger than `window`, future timestamps count as active.
    pub fn is_active(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match (now - self.timestamp).to_std() {
            Ok(age) => age < window,
            Err(_) => true,
        }
    }
}

impl From<&Alert> for ActivityEntry {
    fn from(value: &Alert) -> Self {
        ActivityEntry {
            id: value.id,
            activity_type: ActivityType::Alert,
            message: value.message.clone(),
            timestamp: value.timestamp,
        }
    }
}

impl AlertFeed {
    pub fn active(&self, now: DateTime<Utc>, window: Duration) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.is_active(now, window))
    }
}
