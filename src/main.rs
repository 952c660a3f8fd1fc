use pokedex_sources::config::{Config, LogFormat};
use pokedex_sources::error::AppError;
use pokedex_sources::routes::{AppState, router};
use pokedex_sources::selector::SourceSelector;
use pokedex_sources::store::FileStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// axum logs rejections from built-in extractors with the `axum::rejection`
// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
fn default_filter() -> String {
    format!(
        "{}=debug,axum::rejection=trace",
        env!("CARGO_CRATE_NAME")
    )
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter().into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let preference_path = config.preference.resolved_path();
    let store = FileStore::open(preference_path);
    let selector = SourceSelector::new(Arc::new(store), &config.sources)?;
    tracing::info!("Active source: {}", selector.get_active());

    let app_state = Arc::new(AppState::new(selector, config.browse.page_size));
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .map_err(|e| {
            tracing::error!("Failed to bind to address {}: {}", config.server.bind, e);
            AppError::from(e)
        })?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

#[tokio::main]
async fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.logging.format);

    if let Err(e) = run(config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
