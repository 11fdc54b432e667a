use crate::types::{GameMode, GatewayId, LeaderboardId, SeasonNumber};
use chrono::{DateTime, Utc};

/// The gateway block embedded in a leaderboard record. Region stays a raw
/// string because the synthetic global leaderboard reports "global", which
/// is not a real region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardGateway {
    pub is_official: bool,
    pub name: String,
    pub region: String,
    pub id: GatewayId,
}

/// One leaderboard: the combination of game mode, gateway, and season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub benefactor_id: u64,
    pub game_mode: GameMode,
    pub gateway: LeaderboardGateway,
    pub id: LeaderboardId,
    pub name: String,
    pub last_update_time: DateTime<Utc>,
    pub next_update_time: DateTime<Utc>,
    pub program_id: String,
    pub season_id: SeasonNumber,
    pub season_name: String,
}

impl Leaderboard {
    #[must_use]
    pub fn game_mode_id(&self) -> u32 {
        self.game_mode.id()
    }
}
