pub mod api;
pub mod cache;
pub mod cli;
pub mod client;
pub mod connection;
pub mod errors;
pub mod logger;
pub mod models;
pub mod transform;
pub mod types;

pub use client::{BroodStats, GatewayLookup, LeaderboardLookup, MatchHistory, Rankings};
pub use errors::ApiError;

/// Initializes the logging system at the default level. Call once, before
/// any other operation, when the binary does not configure logging itself.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(log::LevelFilter::Warn)
}
