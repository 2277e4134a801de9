//! Admissions prediction server binary.

use server::{run, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    let result = match ServerConfig::from_env() {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
