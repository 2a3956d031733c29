use std::sync::Arc;

use smcheck::api::router::create_router;
use smcheck::config::{AppConfig, LogFormat};
use smcheck::intelligence::load_bundle;
use smcheck::metrics::{init_metrics, record_ensemble_size};
use smcheck::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let addr = config.bind_addr();
    let metrics_handle = init_metrics();

    tracing::info!(
        dir = %config.model_dir.display(),
        classifiers = config.classifier_files.len(),
        "Loading model artifacts..."
    );
    let bundle = load_bundle(&config.model_dir, &config.scaler_file, &config.classifier_files)
        .map_err(|e| anyhow::anyhow!("model artifacts failed to load: {e}"))?;
    record_ensemble_size(bundle.ensemble.len());
    tracing::info!(models = bundle.ensemble.len(), "Model bundle ready");

    let state = AppState {
        config,
        bundle: Arc::new(bundle),
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}
