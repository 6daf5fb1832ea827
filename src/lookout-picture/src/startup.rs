use std::sync::Arc;

use lookout_core::{AlertFeed, RenderRecord, SnapshotSource, VesselPicture, Viewport};
use reqwest::Url;
use snafu::{OptionExt, ResultExt};
use tokio::sync::{Notify, watch};
use tracing::info;

use crate::{
    AlertManager, ClusterEngine, CoverageClassifier, DemoAlerts, DemoSource, HttpSnapshotSource,
    IngestLoop, LoopHandle, Picture, PositionEstimator, RenderLoop, VesselProcessor, cluster_executor,
    error::{
        Result,
        error::{InvalidUrlSnafu, SignalSnafu},
    },
    settings::Settings,
    start_frames,
};

pub struct App {
    ingest: IngestLoop,
    render: RenderLoop,
    target_fps: u32,
    outputs: Outputs,
}

/// Channels through which consumers observe the picture and steer the viewport.
#[derive(Clone)]
pub struct Outputs {
    pub vessels: watch::Receiver<Arc<VesselPicture>>,
    pub alerts: watch::Receiver<Arc<AlertFeed>>,
    pub render: watch::Receiver<Arc<Vec<RenderRecord>>>,
    pub viewport: Arc<watch::Sender<Viewport>>,
}

pub struct Running {
    ingest: LoopHandle<IngestLoop>,
    render: LoopHandle<RenderLoop>,
    frames: LoopHandle<()>,
    target_fps: u32,
    outputs: Outputs,
}

impl App {
    pub fn build(settings: &Settings) -> Result<App> {
        let demo: Arc<dyn SnapshotSource> = Arc::new(DemoSource::with_alerts(DemoAlerts::new(
            settings.ingest.demo_alert_probability,
        )));

        let source: Arc<dyn SnapshotSource> = match &settings.ingest.source_url {
            Some(url) => {
                let url = Url::parse(url).ok().context(InvalidUrlSnafu { url })?;
                info!("ingesting snapshots from '{url}'");
                Arc::new(HttpSnapshotSource::new(
                    url,
                    settings.ingest.fetch_timeout,
                )?)
            }
            None => {
                info!("no snapshot source configured, using demo fleet");
                demo.clone()
            }
        };

        let picture = Picture::new(
            VesselProcessor::new(
                PositionEstimator::new(&settings.estimator),
                CoverageClassifier::new(&settings.coverage),
            ),
            AlertManager::new(settings.alerts.clone()),
        );

        let (vessels_tx, vessels_rx) = watch::channel(Arc::new(VesselPicture::default()));
        let (alerts_tx, alerts_rx) = watch::channel(Arc::new(AlertFeed::default()));
        let (render_tx, render_rx) = watch::channel(Arc::new(Vec::new()));
        let (viewport_tx, viewport_rx) = watch::channel(settings.render.initial_viewport);

        let ingest = IngestLoop::new(
            picture,
            source,
            demo,
            settings.ingest.interval,
            vessels_tx,
            alerts_tx,
        );

        let render = RenderLoop::new(
            ClusterEngine::new(settings.cluster.clone()),
            cluster_executor(&settings.cluster, settings.render.use_worker),
            Arc::new(Notify::new()),
            vessels_rx.clone(),
            viewport_rx,
            render_tx,
        );

        Ok(App {
            ingest,
            render,
            target_fps: settings.render.target_fps,
            outputs: Outputs {
                vessels: vessels_rx,
                alerts: alerts_rx,
                render: render_rx,
                viewport: Arc::new(viewport_tx),
            },
        })
    }

    pub fn outputs(&self) -> Outputs {
        self.outputs.clone()
    }

    pub fn picture(&self) -> &Picture {
        self.ingest.picture()
    }

    pub fn start(self) -> Running {
        let App {
            ingest,
            render,
            target_fps,
            outputs,
        } = self;

        let frames_notify = render.frames();
        let frames = start_frames(target_fps, move |_| frames_notify.notify_one());

        Running {
            ingest: ingest.start(),
            render: render.start(),
            frames,
            target_fps,
            outputs,
        }
    }

    /// Runs until the process receives ctrl-c.
    pub async fn run(self) -> Result<()> {
        let running = self.start();

        tokio::signal::ctrl_c().await.context(SignalSnafu)?;
        info!("shutting down");

        running.stop().await;
        Ok(())
    }
}

impl Running {
    pub fn outputs(&self) -> Outputs {
        self.outputs.clone()
    }

    /// Stops every loop, no further frames or ingest cycles run once this returns.
    ///
    /// The stopped app keeps its vessel and alert state and can be started again.
    pub async fn stop(self) -> Option<App> {
        let Running {
            ingest,
            render,
            frames,
            target_fps,
            outputs,
        } = self;

        frames.stop().await;
        let render = render.stop().await;
        let ingest = ingest.stop().await;

        Some(App {
            ingest: ingest?,
            render: render?,
            target_fps,
            outputs,
        })
    }
}
