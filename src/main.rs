use body_composition::feed::{DataSource, FeedClient};
use body_composition::sample::{SAMPLE_DAYS, generate_sample_data};
use body_composition::{AppState, Settings, load_data, router};
use chrono::Local;
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    if let Some(parent) = settings.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&settings.data_path).await;
    info!("loaded {} measurements from {}", data.records.len(), settings.data_path.display());

    let source = match &settings.source_url {
        Some(url) => {
            info!("reading body composition data from {url}");
            DataSource::Remote(FeedClient::new(url.as_str(), settings.feed_timeout)?)
        }
        None => DataSource::Local {
            sample: generate_sample_data(Local::now().date_naive(), SAMPLE_DAYS, settings.sample_seed),
        },
    };

    let state = AppState::new(settings.data_path.clone(), data, source);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
