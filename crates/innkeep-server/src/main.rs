//! Innkeep Server: application entry point.

use innkeep_server::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    innkeep_server::init_tracing();

    tracing::info!("Starting Innkeep server...");

    let result = match AppConfig::from_env() {
        Ok(config) => innkeep_server::start_server(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        error!(error = %e, "Innkeep server failed");
        std::process::exit(1);
    }
}
