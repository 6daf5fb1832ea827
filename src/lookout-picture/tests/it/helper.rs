use std::{future::Future, time::Duration};

use chrono::Utc;
use lookout_core::{VesselSnapshot, Viewport};
use lookout_picture::{
    AlertSettings, ClusterSettings, CoverageSettings, EstimatorSettings,
    settings::{Environment, IngestSettings, LogLevel, RenderSettings, Settings},
    startup::App,
};
use serde_json::{Value, json};
use tokio::sync::watch;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

static VESSELS_PATH: &str = "/api/vessels";
static WAIT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestHelper {
    pub server: MockServer,
    pub settings: Settings,
}

pub async fn test<T, Fut>(test_closure: T)
where
    T: FnOnce(TestHelper) -> Fut,
    Fut: Future<Output = ()>,
{
    let server = MockServer::start().await;

    let settings = Settings {
        environment: Environment::Test,
        log_level: LogLevel::Debug,
        ingest: IngestSettings {
            // Long enough that only the initial cycle runs during a test.
            interval: Duration::from_secs(600),
            source_url: Some(format!("{}{VESSELS_PATH}", server.uri())),
            fetch_timeout: Duration::from_secs(2),
            demo_alert_probability: 0.0,
        },
        render: RenderSettings {
            target_fps: 60,
            use_worker: false,
            initial_viewport: Viewport::default(),
        },
        estimator: EstimatorSettings::default(),
        coverage: CoverageSettings::default(),
        alerts: AlertSettings::default(),
        cluster: ClusterSettings::default(),
    };

    test_closure(TestHelper { server, settings }).await;
}

impl TestHelper {
    pub fn app(&self) -> App {
        App::build(&self.settings).unwrap()
    }

    pub async fn mock_snapshot(&self, vessels: &[VesselSnapshot]) {
        self.mock_response(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": vessels,
            "count": vessels.len(),
            "timestamp": Utc::now(),
        })))
        .await;
    }

    pub async fn mock_records(&self, records: Vec<Value>) {
        self.mock_response(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "count": records.len(),
            "data": records,
            "timestamp": Utc::now(),
        })))
        .await;
    }

    pub async fn mock_unsuccessful(&self) {
        self.mock_response(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "upstream unavailable",
        })))
        .await;
    }

    pub async fn mock_status(&self, status: u16) {
        self.mock_response(ResponseTemplate::new(status).set_body_string("failure"))
            .await;
    }

    async fn mock_response(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(VESSELS_PATH))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

/// Waits for the next published value.
pub async fn next<T: Clone>(receiver: &mut watch::Receiver<T>) -> T {
    tokio::time::timeout(WAIT_TIMEOUT, receiver.changed())
        .await
        .unwrap()
        .unwrap();
    receiver.borrow_and_update().clone()
}

/// Waits until a published value satisfies `predicate`.
pub async fn wait_for<T: Clone>(
    receiver: &mut watch::Receiver<T>,
    predicate: impl Fn(&T) -> bool,
) -> T {
    tokio::time::timeout(WAIT_TIMEOUT, async {
        loop {
            {
                let value = receiver.borrow_and_update();
                if predicate(&value) {
                    return value.clone();
                }
            }
            receiver.changed().await.unwrap();
        }
    })
    .await
    .unwrap()
}
