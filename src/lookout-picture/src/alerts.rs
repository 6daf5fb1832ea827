use std::{collections::VecDeque, time::Duration};

use chrono::{DateTime, Utc};
use lookout_core::{ActivityEntry, Alert, AlertFeed, AlertType, Vessel};
use serde::Deserialize;
use tracing::info;

static CRITICAL_BLACKOUT_LABEL: &str = "CRITICAL BLACKOUT";
static SIGNAL_LOST_LABEL: &str = "SIGNAL LOST";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    /// Lower bound of the dark gap that triggers an alert, exclusive.
    pub emission_window_start_minutes: i64,
    /// Upper bound of the dark gap that triggers an alert, exclusive.
    pub emission_window_end_minutes: i64,
    pub max_alerts: usize,
    pub max_activity: usize,
    #[serde(with = "humantime_serde")]
    pub active_window: Duration,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            emission_window_start_minutes: 15,
            emission_window_end_minutes: 20,
            max_alerts: 50,
            max_activity: 20,
            active_window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Bounded alert and activity history, newest first.
#[derive(Debug, Clone)]
pub struct AlertManager {
    settings: AlertSettings,
    alerts: VecDeque<Alert>,
    activity: VecDeque<ActivityEntry>,
}

impl AlertManager {
    pub fn new(settings: AlertSettings) -> Self {
        Self {
            alerts: VecDeque::with_capacity(settings.max_alerts),
            activity: VecDeque::with_capacity(settings.max_activity),
            settings,
        }
    }

    pub fn add_alert(&mut self, alert: Alert) {
        info!("alert raised: {}", alert.message);

        self.activity.push_front(ActivityEntry::from(&alert));
        self.activity.truncate(self.settings.max_activity);

        self.alerts.push_front(alert);
        self.alerts.truncate(self.settings.max_alerts);
    }

    /// Raises dark vessel alerts for the given vessels in order, returns the number raised.
    pub fn observe(&mut self, vessels: &[Vessel], now: DateTime<Utc>) -> usize {
        let mut raised = 0;

        for vessel in vessels {
            if !self.in_emission_window(vessel) || self.is_already_reported(vessel) {
                continue;
            }

            let (label, alert_type) = if vessel.in_coverage {
                (CRITICAL_BLACKOUT_LABEL, AlertType::Suspicious)
            } else {
                (SIGNAL_LOST_LABEL, AlertType::DarkVessel)
            };

            let message = format!(
                "{label}: {} ({}m gap)",
                vessel.display_name(),
                vessel.gap_minutes
            );

            self.add_alert(Alert::new(alert_type, message, now, Some(vessel.clone())));
            raised += 1;
        }

        raised
    }

    fn in_emission_window(&self, vessel: &Vessel) -> bool {
        vessel.is_dark
            && vessel.gap_minutes > self.settings.emission_window_start_minutes
            && vessel.gap_minutes < self.settings.emission_window_end_minutes
    }

    // Only `dark_vessel` alerts suppress a new alert, a vessel reported as suspicious
    // is reported again on the next cycle while it stays inside the window.
    fn is_already_reported(&self, vessel: &Vessel) -> bool {
        self.alerts
            .iter()
            .any(|a| a.alert_type == AlertType::DarkVessel && a.references(vessel))
    }

    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn activity(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.activity.iter()
    }

    pub fn active_alerts(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Alert> {
        let window = self.settings.active_window;
        self.alerts.iter().filter(move |a| a.is_active(now, window))
    }

    pub fn feed(&self) -> AlertFeed {
        AlertFeed {
            alerts: self.alerts.iter().cloned().collect(),
            activity: self.activity.iter().cloned().collect(),
        }
    }
}
