use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use food_ordering::infrastructure::{
    AppConfig, BackendClient, CliArgs, KeyringSessionStorage, StorageManager,
};
use food_ordering::presentation::{App, ViewSettings, alerts};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = food_ordering::VERSION, "Starting foodorder");

    let (url, anon_key) = config.backend_credentials()?;
    let backend = Arc::new(BackendClient::new(url, anon_key)?);
    let session_storage = Arc::new(KeyringSessionStorage::new());
    let settings = ViewSettings {
        currency_symbol: config.ui.currency_symbol.clone(),
        sales_preview: config.ui.sales_preview,
    };

    let app = App::new(
        backend.clone(),
        backend,
        session_storage,
        config.tables(),
        settings,
    );

    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout().lock();
    app.run(args.command, &mut input, &mut out).await
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(error) = run().await {
        alerts::alert(&error);
        std::process::exit(1);
    }

    Ok(())
}
