use lookout_picture::{error::Result, settings::Settings, startup::App};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_ref())),
        )
        .init();

    let app = App::build(&settings)?;

    app.run().await
}
