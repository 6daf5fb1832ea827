use std::{sync::Arc, time::Duration};

use chrono::Utc;
use lookout_core::{
    AlertFeed, ClusterExecutor, ClusterRequest, RenderRecord, SnapshotSource, Viewport,
    VesselPicture,
};
use tokio::{
    sync::{Notify, watch},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use crate::{ClusterEngine, Picture};

static MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a spawned loop, the loop is cancelled when the handle is dropped.
#[derive(Debug)]
pub struct LoopHandle<T> {
    cancel: CancellationToken,
    task: Option<JoinHandle<T>>,
}

impl<T> LoopHandle<T> {
    fn new(cancel: CancellationToken, task: JoinHandle<T>) -> Self {
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Cancels the loop and waits for it to exit, returning its final state.
    pub async fn stop(mut self) -> Option<T> {
        self.cancel.cancel();

        let task = self.task.take()?;
        match task.await {
            Ok(state) => Some(state),
            Err(e) => {
                error!("loop task exited abnormally: {e:?}");
                None
            }
        }
    }
}

impl<T> Drop for LoopHandle<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Periodically pulls a snapshot, updates the picture and publishes the results.
pub struct IngestLoop {
    picture: Picture,
    source: Arc<dyn SnapshotSource>,
    fallback: Arc<dyn SnapshotSource>,
    interval: Duration,
    vessels: watch::Sender<Arc<VesselPicture>>,
    alerts: watch::Sender<Arc<AlertFeed>>,
}

impl IngestLoop {
    pub fn new(
        picture: Picture,
        source: Arc<dyn SnapshotSource>,
        fallback: Arc<dyn SnapshotSource>,
        interval: Duration,
        vessels: watch::Sender<Arc<VesselPicture>>,
        alerts: watch::Sender<Arc<AlertFeed>>,
    ) -> Self {
        Self {
            picture,
            source,
            fallback,
            interval,
            vessels,
            alerts,
        }
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    /// Starts the loop, the first cycle runs immediately.
    pub fn start(self) -> LoopHandle<IngestLoop> {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run_continuous(cancel.clone()));
        LoopHandle::new(cancel, task)
    }

    async fn run_continuous(mut self, cancel: CancellationToken) -> Self {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => self.run_single().await,
            }
        }

        debug!("ingest loop stopped");
        self
    }

    #[instrument(skip_all)]
    pub async fn run_single(&mut self) {
        let (snapshots, source) = match self.source.snapshot().await {
            Ok(snapshots) => (snapshots, self.source.clone()),
            Err(e) => {
                warn!("failed to fetch vessel snapshot, using fallback source: {e:?}");
                match self.fallback.snapshot().await {
                    Ok(snapshots) => (snapshots, self.fallback.clone()),
                    Err(e) => {
                        error!("fallback source failed: {e:?}");
                        return;
                    }
                }
            }
        };

        let now = Utc::now();
        let (vessels, mut alerts) = self.picture.ingest(snapshots, now);

        let raised = source.alerts(&vessels, now);
        if !raised.is_empty() {
            alerts = self.picture.add_alerts(raised);
        }

        self.vessels.send_replace(vessels);
        self.alerts.send_replace(alerts);
    }
}

/// Fixed timestep accumulator, the remainder of a late frame is carried over so the long
/// run cadence is kept.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let interval = (Duration::from_secs(1) / target_fps.max(1)).max(MIN_FRAME_INTERVAL);
        Self {
            interval,
            last_frame: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_deadline(&self) -> Instant {
        self.last_frame + self.interval
    }

    /// Returns the time since the last frame if a frame is due.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let delta = now.saturating_duration_since(self.last_frame);
        if delta < self.interval {
            return None;
        }

        let remainder = delta.as_nanos() % self.interval.as_nanos();
        self.last_frame = now - Duration::from_nanos(remainder as u64);

        Some(delta)
    }
}

/// Invokes `on_frame` with the elapsed time at `target_fps` until stopped.
pub fn start_frames<F>(target_fps: u32, mut on_frame: F) -> LoopHandle<()>
where
    F: FnMut(Duration) + Send + 'static,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut clock = FrameClock::new(target_fps, Instant::now());

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = tokio::time::sleep_until(clock.next_deadline()) => {
                    if let Some(delta) = clock.tick(Instant::now()) {
                        on_frame(delta);
                    }
                }
            }
        }
    });

    LoopHandle::new(cancel, task)
}

/// Recomputes the render set on frame wake-ups when the picture or the viewport changed.
pub struct RenderLoop {
    engine: ClusterEngine,
    executor: Arc<dyn ClusterExecutor>,
    frames: Arc<Notify>,
    vessels: watch::Receiver<Arc<VesselPicture>>,
    viewport: watch::Receiver<Viewport>,
    output: watch::Sender<Arc<Vec<RenderRecord>>>,
    pending: bool,
}

impl RenderLoop {
    pub fn new(
        engine: ClusterEngine,
        executor: Arc<dyn ClusterExecutor>,
        frames: Arc<Notify>,
        vessels: watch::Receiver<Arc<VesselPicture>>,
        viewport: watch::Receiver<Viewport>,
        output: watch::Sender<Arc<Vec<RenderRecord>>>,
    ) -> Self {
        Self {
            engine,
            executor,
            frames,
            vessels,
            viewport,
            output,
            pending: true,
        }
    }

    /// Wake-up signal, one notification per frame.
    pub fn frames(&self) -> Arc<Notify> {
        self.frames.clone()
    }

    pub fn start(self) -> LoopHandle<RenderLoop> {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run_continuous(cancel.clone()));
        LoopHandle::new(cancel, task)
    }

    async fn run_continuous(mut self, cancel: CancellationToken) -> Self {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.frames.notified() => self.run_single().await,
            }
        }

        debug!("render loop stopped");
        self
    }

    pub async fn run_single(&mut self) {
        let changed = self.pending
            || self.vessels.has_changed().unwrap_or(false)
            || self.viewport.has_changed().unwrap_or(false);

        if !changed || !self.engine.should_update(Instant::now()) {
            return;
        }

        let picture = self.vessels.borrow_and_update().clone();
        let viewport = *self.viewport.borrow_and_update();
        self.engine.update_viewport(&viewport);
        self.pending = false;

        let request = ClusterRequest {
            vessels: picture.vessels.clone(),
            viewport,
        };

        match self.executor.compute(request).await {
            Ok(records) => {
                self.output.send_replace(Arc::new(records));
            }
            Err(e) => {
                error!("failed to compute render set: {e:?}");
                self.pending = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_frame_clock_carries_remainder() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        let interval = clock.interval();

        assert!(clock.tick(start + Duration::from_millis(10)).is_none());

        let delta = clock.tick(start + Duration::from_millis(20)).unwrap();
        assert_eq!(delta, Duration::from_millis(20));
        assert_eq!(clock.next_deadline(), start + interval * 2);

        // A very late wake-up fires a single frame and stays on the grid.
        let delta = clock.tick(start + Duration::from_millis(100)).unwrap();
        assert_eq!(delta, Duration::from_millis(100) - interval);
        assert_eq!(clock.next_deadline(), start + interval * 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_fire_at_target_rate_until_stopped() {
        let frames = Arc::new(AtomicUsize::new(0));
        let counter = frames.clone();

        let handle = start_frames(10, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(1050)).await;
        handle.stop().await;
        assert_eq!(frames.load(Ordering::SeqCst), 10);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(frames.load(Ordering::SeqCst), 10);
    }
}
