//! Serde shapes for the upstream responses, kept as close to the wire as
//! practical. Domain mapping and validation live in `transform`; the shapes
//! here only pin down what serde can check mechanically. Numeric fields the
//! API sends as strings stay strings here and are parsed by the
//! transformers, which own the error reporting.

use crate::types::GatewayId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gateway listing, keyed by the gateway id's decimal string.
pub type GatewayResponse = BTreeMap<String, GatewayInfo>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub is_official: bool,
    #[serde(default)]
    pub online_users: u64,
}

pub type MapsResponse = Vec<MapFileEntry>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFileEntry {
    pub attribute: MapAttributes,
    pub content_size: u64,
    pub content_type: String,
    pub md5: String,
    pub modified_epoch: i64,
    pub name: String,
    pub url: String,
}

/// Map attributes arrive entirely as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapAttributes {
    pub map_candidate: String,
    pub map_description: String,
    pub map_era: String,
    pub map_height: String,
    pub map_width: String,
    pub map_name: String,
    pub map_path: String,
    pub map_version: String,
    pub replay_humans: String,
    pub replay_max_players: String,
    pub replay_min_players: String,
    pub replay_opponents: String,
    pub season_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub gamemodes: BTreeMap<String, GameModeEntry>,
    pub gateways: BTreeMap<String, LeaderboardGatewayEntry>,
    pub leaderboards: BTreeMap<String, LeaderboardEntry>,
    pub matchmaked_current_season: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModeEntry {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardGatewayEntry {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub is_official: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub benefactor_id: String,
    pub gamemode_id: u32,
    pub gateway_id: GatewayId,
    pub id: u32,
    pub name: String,
    pub last_update_time: String,
    pub next_update_time: String,
    pub program_id: String,
    pub season_id: u32,
    pub season_name: String,
}

/// One ranking page: a column-name header plus rows of mixed-type cells.
/// The column layout is validated against the expected order before any cell
/// is read; see `transform::rankings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntityResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

pub type NameSearchResponse = Vec<NameSearchEntry>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameSearchEntry {
    pub avatar: String,
    pub battletag: String,
    pub gateway_id: GatewayId,
    pub last_rank: u32,
    pub name: String,
    pub points: i64,
    pub rank: u32,
}

/// Rank lookup for one toon's account. A zero `aurora_id` or empty `toons`
/// set is the API's way of saying the player is unranked there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankByToonResponse {
    #[serde(default)]
    pub aurora_id: u64,
    #[serde(default)]
    pub leaderboard_id: u32,
    #[serde(default)]
    pub toons: Vec<RankedToon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedToon {
    pub rank: u32,
    pub last_rank: u32,
    pub gateway_id: GatewayId,
    pub wins: u32,
    pub losses: u32,
    pub disconnects: u32,
    pub name: String,
    pub battletag: String,
    pub avatar: String,
    pub feature_stat: String,
    pub points: i64,
    pub bucket: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapStatsResponse {
    /// game mode id -> season -> map md5 -> per-race stats
    #[serde(default)]
    pub map_stat: BTreeMap<String, BTreeMap<String, BTreeMap<String, RaceMapStats>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceMapStats {
    #[serde(rename = "Protoss")]
    pub protoss: StatLine,
    #[serde(rename = "Terran")]
    pub terran: StatLine,
    #[serde(rename = "Zerg")]
    pub zerg: StatLine,
    #[serde(rename = "Random")]
    pub random: StatLine,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatLine {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_global_games: u32,
    pub total_global_wins: u32,
}

/// Match history page. Each element is an object with a single dynamic key
/// (the match id), so records stay as raw JSON for the transformer, which
/// owns the correlation rules and the skip-vs-abort decisions.
pub type MatchHistoryResponse = Vec<serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPlayerInfoResponse {
    #[serde(default)]
    pub replays: Vec<ReplayEntry>,
}

/// Replay slots can be empty objects when a player never uploaded; only
/// entries carrying a url are usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayEntry {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub create_time: Option<i64>,
}

/// Profile-by-toon, shape selected by the request's field mask. The masks
/// form a closed enum, so every response decodes through one of four known
/// shapes; fields absent under a given mask default to empty and the
/// per-mask transformers only read what their mask guarantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub aurora_id: u64,
    #[serde(default)]
    pub battle_tag: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub toons: Vec<ProfileToonEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileToonEntry {
    pub name: String,
    pub gateway_id: GatewayId,
    #[serde(default)]
    pub games_last_week: Option<u32>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
