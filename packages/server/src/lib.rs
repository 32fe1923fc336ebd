//! Chat room server library.
//!
//! Participants register a name, post room or private messages, list the
//! messages visible to them and keep themselves alive with heartbeats.
//! Participants without a heartbeat for the idle timeout are removed by a
//! periodic expiry pass.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{create_router, run as run_server};
