use crate::types::SeasonNumber;
use chrono::{DateTime, Utc};

/// One ladder map file from the season listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInfo {
    pub description: String,
    pub era: u32,
    /// In-game units.
    pub height: u32,
    pub width: u32,
    pub version: u32,
    pub replay_humans: u32,
    pub replay_max_players: u32,
    pub replay_min_players: u32,
    pub season_id: SeasonNumber,
    /// Map file size in bytes.
    pub content_size: u64,
    pub content_type: String,
    pub md5: String,
    pub modified: DateTime<Utc>,
    pub file_name: String,
    pub display_name: String,
    /// Blizzard's download link.
    pub url: String,
}
