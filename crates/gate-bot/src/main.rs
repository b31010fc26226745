//! Gateway adapter entry point
//!
//! Run with:
//! ```bash
//! cargo run -p gate-bot
//! ```
//!
//! Configuration is loaded from environment variables (see gate-common).

use gate_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Run the bot
    if let Err(e) = run().await {
        error!(error = %e, "Service failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing per environment
    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        "Configuration loaded"
    );

    // Run the gateway adapter
    gate_bot::run(config).await?;

    Ok(())
}
