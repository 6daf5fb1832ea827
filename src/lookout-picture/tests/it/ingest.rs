use std::time::Duration;

use chrono::Utc;
use lookout_core::{AlertType, Mmsi, ShipType, VesselSnapshot};
use serde_json::json;

use crate::helper::{next, test};

fn dark_snapshot(mmsi: i32, minutes_silent: i64) -> VesselSnapshot {
    let mut snapshot = VesselSnapshot::test_default(Some(Mmsi::test_new(mmsi)));
    snapshot.name = Some("HTMS Chakri Naruebet".to_string());
    snapshot.latitude = Some(12.9);
    snapshot.longitude = Some(100.9);
    snapshot.timestamp = Utc::now() - chrono::Duration::minutes(minutes_silent);
    snapshot
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_snapshot_is_published_with_derived_fields() {
    test(|helper| async move {
        let dark = dark_snapshot(567000123, 17);
        let live = VesselSnapshot::test_default(Some(Mmsi::test_new(529000456)));
        helper.mock_snapshot(&[dark, live]).await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let picture = next(&mut outputs.vessels).await;
        assert_eq!(picture.vessels.len(), 2);
        assert!(picture.last_update.is_some());

        let dark = &picture.vessels[0];
        assert!(dark.is_dark);
        assert!(dark.in_coverage);
        assert_eq!(dark.gap_minutes, 17);
        assert_eq!(dark.ship_type, ShipType::Military);
        assert!(!picture.vessels[1].is_dark);
        assert_eq!(picture.vessels[1].ship_type, ShipType::Commercial);

        let feed = next(&mut outputs.alerts).await;
        assert_eq!(feed.alerts.len(), 1);
        assert_eq!(feed.alerts[0].alert_type, AlertType::Suspicious);
        assert_eq!(
            feed.alerts[0].message,
            "CRITICAL BLACKOUT: HTMS Chakri Naruebet (17m gap)"
        );
        assert_eq!(feed.activity.len(), 1);

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_precomputed_flags_take_precedence() {
    test(|helper| async move {
        let mut snapshot = VesselSnapshot::test_default(Some(Mmsi::test_new(477000999)));
        snapshot.name = None;
        snapshot.is_dark = Some(true);
        snapshot.in_coverage = Some(false);
        snapshot.gap_minutes = Some(18.0);
        snapshot.ship_type = Some("Unknown".to_string());
        helper.mock_snapshot(&[snapshot]).await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let picture = next(&mut outputs.vessels).await;
        assert_eq!(picture.vessels[0].ship_type, ShipType::Unknown);
        assert!(!picture.vessels[0].in_coverage);

        let feed = next(&mut outputs.alerts).await;
        assert_eq!(feed.alerts[0].alert_type, AlertType::DarkVessel);
        assert_eq!(feed.alerts[0].message, "SIGNAL LOST: 477000999 (18m gap)");

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_records_never_reach_the_picture() {
    test(|helper| async move {
        let valid = VesselSnapshot::test_default(Some(Mmsi::test_new(1)));
        let mut out_of_range = VesselSnapshot::test_default(Some(Mmsi::test_new(2)));
        out_of_range.latitude = Some(95.0);
        let mut missing = VesselSnapshot::test_default(Some(Mmsi::test_new(3)));
        missing.longitude = None;
        helper.mock_snapshot(&[valid, out_of_range, missing]).await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let picture = next(&mut outputs.vessels).await;
        assert_eq!(picture.vessels.len(), 1);
        assert_eq!(picture.vessels[0].mmsi, Mmsi::test_new(1));

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_records_are_dropped_without_falling_back() {
    test(|helper| async move {
        let first = VesselSnapshot::test_default(Some(Mmsi::test_new(111)));
        let second = VesselSnapshot::test_default(Some(Mmsi::test_new(222)));
        helper
            .mock_records(vec![
                json!(first),
                json!({ "mmsi": 333, "latitude": 13.0, "longitude": 100.0 }),
                json!({ "mmsi": "444", "timestamp": Utc::now() }),
                json!(second),
            ])
            .await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let picture = next(&mut outputs.vessels).await;
        let mmsis: Vec<Mmsi> = picture.vessels.iter().map(|v| v.mmsi).collect();
        assert_eq!(mmsis, vec![Mmsi::test_new(111), Mmsi::test_new(222)]);

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_request_falls_back_to_demo_fleet() {
    test(|helper| async move {
        helper.mock_status(500).await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let picture = next(&mut outputs.vessels).await;
        assert_eq!(picture.vessels.len(), 6);
        assert_eq!(picture.military().count(), 3);
        assert!(
            picture
                .vessels
                .iter()
                .any(|v| v.display_name() == "Red Sea Explorer")
        );

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_demo_fallback_raises_synthetic_alerts() {
    test(|mut helper| async move {
        helper.settings.ingest.demo_alert_probability = 1.0;
        helper.mock_status(503).await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let feed = next(&mut outputs.alerts).await;
        assert_eq!(feed.alerts.len(), 1);
        assert!(matches!(
            feed.alerts[0].alert_type,
            AlertType::Military | AlertType::ZoneBreach | AlertType::Suspicious
        ));
        let vessel = feed.alerts[0].vessel.as_ref().unwrap();
        assert_eq!(vessel.mmsi, Mmsi::test_new(567000123));
        assert_eq!(feed.activity[0].id, feed.alerts[0].id);

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsuccessful_envelope_falls_back_to_demo_fleet() {
    test(|helper| async move {
        helper.mock_unsuccessful().await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let picture = next(&mut outputs.vessels).await;
        assert_eq!(picture.vessels.len(), 6);

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stopped_app_publishes_nothing_and_restarts_with_state() {
    test(|helper| async move {
        let mut dark = dark_snapshot(416001789, 18);
        dark.name = Some("Unknown Vessel".to_string());
        dark.latitude = Some(20.0);
        dark.longitude = Some(60.0);
        helper.mock_snapshot(&[dark]).await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        next(&mut outputs.vessels).await;
        let feed = next(&mut outputs.alerts).await;
        assert_eq!(feed.alerts.len(), 1);
        assert_eq!(feed.alerts[0].alert_type, AlertType::DarkVessel);

        let app = running.stop().await.unwrap();
        assert_eq!(app.picture().alerts().alerts().count(), 1);

        outputs.vessels.borrow_and_update();
        outputs.render.borrow_and_update();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!outputs.vessels.has_changed().unwrap());
        assert!(!outputs.render.has_changed().unwrap());

        let running = app.start();
        next(&mut outputs.vessels).await;
        let feed = next(&mut outputs.alerts).await;
        // Dark vessel alerts are not raised twice for the same vessel.
        assert_eq!(feed.alerts.len(), 1);

        running.stop().await.unwrap();
    })
    .await;
}
