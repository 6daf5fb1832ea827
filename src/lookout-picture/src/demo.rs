use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lookout_core::{
    Alert, AlertType, CoreResult, Mmsi, ShipType, SnapshotSource, VesselPicture, VesselSnapshot,
    normalize_longitude,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

static MAX_POSITION_STEP_DEGREES: f64 = 0.0005;
static MAX_SPEED_STEP_KNOTS: f64 = 1.0;
static MAX_COURSE_STEP_DEGREES: f64 = 5.0;

pub static DEFAULT_DEMO_ALERT_PROBABILITY: f64 = 0.1;

static DEMO_ALERTS: [(AlertType, &str); 3] = [
    (
        AlertType::Military,
        "Military vessel detected in monitored zone",
    ),
    (AlertType::ZoneBreach, "Vessel approaching restricted area"),
    (
        AlertType::Suspicious,
        "Suspicious vessel movement pattern detected",
    ),
];

/// A small simulated fleet in the Gulf of Thailand and the Red Sea.
///
/// Every snapshot moves each vessel a random step and stamps it with the current time.
/// Each picture built from it may carry one synthetic alert.
#[derive(Debug)]
pub struct DemoSource {
    fleet: Mutex<Vec<VesselSnapshot>>,
    alerts: Mutex<DemoAlerts>,
}

/// Raises one randomly chosen synthetic alert with the given probability per cycle.
#[derive(Debug)]
pub struct DemoAlerts {
    probability: f64,
    rng: StdRng,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::with_alerts(DemoAlerts::new(DEFAULT_DEMO_ALERT_PROBABILITY))
    }

    pub fn with_alerts(alerts: DemoAlerts) -> Self {
        Self {
            fleet: Mutex::new(demo_fleet()),
            alerts: Mutex::new(alerts),
        }
    }

    fn advance(&self) -> Vec<VesselSnapshot> {
        let mut fleet = self.fleet.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rng = rand::rng();
        let now = Utc::now();

        for vessel in fleet.iter_mut() {
            random_walk(vessel, &mut rng);
            vessel.timestamp = now;
        }

        fleet.clone()
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSource for DemoSource {
    async fn snapshot(&self) -> CoreResult<Vec<VesselSnapshot>> {
        Ok(self.advance())
    }

    fn alerts(&self, picture: &VesselPicture, now: DateTime<Utc>) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generate(picture, now)
            .into_iter()
            .collect()
    }
}

impl DemoAlerts {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self {
            probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The alert references the first military vessel of the picture, if any.
    pub fn generate(&mut self, picture: &VesselPicture, now: DateTime<Utc>) -> Option<Alert> {
        if self.rng.random::<f64>() >= self.probability {
            return None;
        }

        let (alert_type, message) = DEMO_ALERTS[self.rng.random_range(0..DEMO_ALERTS.len())];

        Some(Alert::new(
            alert_type,
            message.to_string(),
            now,
            picture.military().next().cloned(),
        ))
    }
}

fn random_walk(vessel: &mut VesselSnapshot, rng: &mut impl Rng) {
    let step = MAX_POSITION_STEP_DEGREES;

    if let Some(latitude) = vessel.latitude.as_mut() {
        *latitude = (*latitude + rng.random_range(-step..=step)).clamp(-90.0, 90.0);
    }
    if let Some(longitude) = vessel.longitude.as_mut() {
        *longitude = normalize_longitude(*longitude + rng.random_range(-step..=step));
    }
    if let Some(speed) = vessel.speed.as_mut() {
        let step = MAX_SPEED_STEP_KNOTS;
        *speed = (*speed + rng.random_range(-step..=step)).max(0.0);
    }
    if let Some(course) = vessel.course.as_mut() {
        let step = MAX_COURSE_STEP_DEGREES;
        *course = (*course + rng.random_range(-step..=step)).rem_euclid(360.0);
    }
}

fn demo_fleet() -> Vec<VesselSnapshot> {
    [
        (567000123, "HTMS Chakri Naruebet", 13.75, 100.58, 12.5, 135.0, ShipType::Military),
        (529000456, "MV Bangkok Express", 13.72, 100.55, 8.2, 90.0, ShipType::Commercial),
        (416001789, "Unknown Vessel", 13.78, 100.52, 15.8, 270.0, ShipType::Unknown),
        (567000234, "HTMS Naresuan", 13.68, 100.60, 10.3, 45.0, ShipType::Military),
        (477000999, "Red Sea Explorer", 15.5, 41.2, 14.2, 320.0, ShipType::Commercial),
        (477000888, "Naval Sentry Red Sea", 12.8, 43.1, 22.5, 180.0, ShipType::Military),
    ]
    .into_iter()
    .map(
        |(mmsi, name, latitude, longitude, speed, course, ship_type)| VesselSnapshot {
            mmsi: Mmsi::from(mmsi),
            name: Some(name.to_string()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            speed: Some(speed),
            course: Some(course),
            timestamp: Utc::now(),
            is_dark: None,
            in_coverage: None,
            gap_minutes: None,
            ship_type: Some(ship_type.as_ref().to_string()),
        },
    )
    .collect()
}
