//! Chat room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lounge-server -- --port 5000
//! ```

use clap::Parser;
use lounge_server::ServerConfig;
use lounge_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = lounge_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
