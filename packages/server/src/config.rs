//! Server configuration from command-line arguments.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Upper bound for the sweep period and the idle timeout (one day)
pub const MAX_DURATION_SECS: u64 = 86_400;

/// Backing store for participants and messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Process memory; everything is lost on restart
    Memory,
    /// SQLite database at `--database-url`
    Sqlite,
}

/// Chat room server with inactivity expiry
#[derive(Debug, Clone, Parser)]
#[command(name = "lounge-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Backing store
    #[arg(long, value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// SQLite connection URL (used with `--store sqlite`)
    #[arg(long, default_value = "sqlite://lounge.db")]
    pub database_url: String,

    /// Maximum pooled SQLite connections
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds between two expiry passes
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECS))]
    pub sweep_interval_secs: u64,

    /// Seconds without heartbeat after which a participant expires
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECS))]
    pub idle_timeout_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::parse_from(["lounge-server"])
    }
}
