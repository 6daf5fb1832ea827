use std::sync::{Arc, Mutex, PoisonError};

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use lookout_core::{ClusterExecutor, ClusterRequest, CoreResult, Error, RenderRecord};
use snafu::ResultExt;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::{
    ClusterEngine, ClusterSettings,
    error::{Result, error::WorkerSpawnSnafu},
};

static WORKER_THREAD_NAME: &str = "cluster-worker";
static JOB_BUFFER_SIZE: usize = 4;

/// Computes render sets on the calling task.
pub struct InlineExecutor {
    engine: Mutex<ClusterEngine>,
}

/// Computes render sets on a dedicated OS thread.
pub struct WorkerExecutor {
    jobs: Sender<ClusterJob>,
}

struct ClusterJob {
    request: ClusterRequest,
    reply: oneshot::Sender<Vec<RenderRecord>>,
}

/// Picks the worker executor when enabled, falling back to inline execution if the worker
/// thread cannot be started.
pub fn cluster_executor(settings: &ClusterSettings, use_worker: bool) -> Arc<dyn ClusterExecutor> {
    if use_worker {
        match WorkerExecutor::spawn(settings.clone()) {
            Ok(worker) => return Arc::new(worker),
            Err(e) => warn!("failed to start cluster worker, clustering inline: {e:?}"),
        }
    }

    debug!("clustering inline");
    Arc::new(InlineExecutor::new(settings.clone()))
}

impl InlineExecutor {
    pub fn new(settings: ClusterSettings) -> Self {
        Self {
            engine: Mutex::new(ClusterEngine::new(settings)),
        }
    }
}

#[async_trait]
impl ClusterExecutor for InlineExecutor {
    async fn compute(&self, request: ClusterRequest) -> CoreResult<Vec<RenderRecord>> {
        let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(engine.reduce(&request.vessels, &request.viewport))
    }
}

impl WorkerExecutor {
    pub fn spawn(settings: ClusterSettings) -> Result<Self> {
        let (jobs, receiver) = async_channel::bounded(JOB_BUFFER_SIZE);
        let engine = ClusterEngine::new(settings);

        std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || run_worker(engine, receiver))
            .context(WorkerSpawnSnafu)?;

        Ok(Self { jobs })
    }

    /// Stops the worker thread once queued jobs are done, later requests fail.
    pub fn shutdown(&self) {
        self.jobs.close();
    }
}

#[async_trait]
impl ClusterExecutor for WorkerExecutor {
    async fn compute(&self, request: ClusterRequest) -> CoreResult<Vec<RenderRecord>> {
        let (reply, response) = oneshot::channel();

        self.jobs
            .send(ClusterJob { request, reply })
            .await
            .map_err(|_| Error::cluster_worker_closed())?;

        response.await.map_err(|_| Error::cluster_worker_closed())
    }
}

impl Drop for WorkerExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(mut engine: ClusterEngine, jobs: Receiver<ClusterJob>) {
    while let Ok(job) = jobs.recv_blocking() {
        let records = engine.reduce(&job.request.vessels, &job.request.viewport);
        // The requester may have been cancelled while waiting.
        let _ = job.reply.send(records);
    }

    debug!("cluster worker stopped");
}
