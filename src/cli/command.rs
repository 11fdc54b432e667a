use crate::types::GatewayId;
use std::path::PathBuf;

/// Programmatic form of the CLI subcommands.
pub enum Command {
    /// Stream the global 1v1 leaderboard as CSV.
    Rankings { limit: Option<u64> },
    /// All rankings on the account owning the toon.
    PlayerRankings { toon: String, gateway: GatewayId },
    /// The toons on the account.
    PlayerProfiles { toon: String, gateway: GatewayId },
    AccountInfo { toon: String, gateway: GatewayId },
    /// Per-map win rates for the current season.
    PlayerStats { toon: String, gateway: GatewayId },
    MatchHistory { toon: String, gateway: GatewayId, limit: Option<u64> },
    PlayerSearch { query: String },
    OnlineUsers,
    /// Download every available replay for the account to a local directory.
    DumpReplays { toon: String, gateway: GatewayId, out: Option<PathBuf> },
}
