//! Call-recording migration worker binary.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use recmig_storage::S3Client;
use recmig_twilio::TwilioClient;
use recmig_worker::{MigrationConfig, MigrationDriver};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("recmig=info,aws_config=warn,aws_smithy_runtime=warn")
    });

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    // Install rustls crypto provider (required for TLS/HTTPS)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    info!("Starting recmig-worker");

    // Load configuration
    let config = match MigrationConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Migration config: {:?}", config);

    let source = match TwilioClient::new(config.provider.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create Twilio client: {}", e);
            std::process::exit(1);
        }
    };

    let store = match S3Client::new(config.storage.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create S3 client: {}", e);
            std::process::exit(1);
        }
    };

    let driver = MigrationDriver::new(&config.run, Arc::new(source), Arc::new(store));
    let summary = driver.run().await;

    // Partial failures are reported in the logs only; the exit status stays zero.
    if !summary.is_clean() {
        warn!(
            failed = summary.failed,
            skipped_dates = summary.skipped_dates.len(),
            "Migration finished with failures; affected recordings remain at Twilio"
        );
    }

    info!("Worker shutdown complete");
}
