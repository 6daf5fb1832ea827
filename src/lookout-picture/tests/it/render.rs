use lookout_core::{Mmsi, VesselSnapshot, Viewport};

use crate::helper::{test, wait_for};

fn snapshot(mmsi: i32, latitude: f64, longitude: f64) -> VesselSnapshot {
    let mut snapshot = VesselSnapshot::test_default(Some(Mmsi::test_new(mmsi)));
    snapshot.latitude = Some(latitude);
    snapshot.longitude = Some(longitude);
    snapshot.speed = Some(0.0);
    snapshot
}

#[tokio::test(flavor = "multi_thread")]
async fn test_render_set_is_clustered_for_the_viewport() {
    test(|helper| async move {
        helper
            .mock_snapshot(&[
                snapshot(1, 13.70, 100.50),
                snapshot(2, 13.71, 100.51),
                snapshot(3, 15.5, 41.2),
            ])
            .await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        let records = wait_for(&mut outputs.render, |r| !r.is_empty()).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cluster_size, Some(2));
        assert_eq!(records[0].icon, "📍2");
        assert_eq!(records[0].radius, 14000.0);
        assert!(records[0].visible);

        assert_eq!(records[1].id, "3");
        assert_eq!(records[1].cluster_size, None);
        assert!(!records[1].visible);

        running.stop().await.unwrap();
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_viewport_change_triggers_a_new_render_set() {
    test(|helper| async move {
        helper
            .mock_snapshot(&[snapshot(1, 13.70, 100.50), snapshot(2, 13.71, 100.51)])
            .await;

        let app = helper.app();
        let mut outputs = app.outputs();
        let running = app.start();

        wait_for(&mut outputs.render, |r| r.len() == 1).await;

        outputs.viewport.send_replace(Viewport {
            latitude: 13.7,
            longitude: 100.5,
            zoom: 9.0,
        });

        let records = wait_for(&mut outputs.render, |r| r.len() == 2).await;
        assert!(records.iter().all(|r| r.cluster_size.is_none()));
        assert!(records.iter().all(|r| r.visible));

        running.stop().await.unwrap();
    })
    .await;
}
