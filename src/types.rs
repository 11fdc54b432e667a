//! Shared identifiers and closed enumerations for the ladder API.
//!
//! Numeric codes come from the wire; conversions reject values outside the
//! known sets as `UnexpectedResponse` so defects surface at the decode
//! boundary instead of corrupting downstream data.

use crate::errors::ApiError;
use serde::{Deserialize, Serialize};

pub type GatewayId = u16;
pub type LeaderboardId = u32;
pub type SeasonNumber = u32;
pub type AuroraId = u64;

/// Synthetic aggregate gateway; not a real server cluster.
pub const GLOBAL_GATEWAY_ID: GatewayId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    UsWest,
    UsEast,
    Europe,
    Korea,
    Asia,
}

impl Region {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::UsWest => "usw",
            Region::UsEast => "use",
            Region::Europe => "eu",
            Region::Korea => "kr",
            Region::Asia => "asia",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s {
            "usw" => Ok(Region::UsWest),
            "use" => Ok(Region::UsEast),
            "eu" => Ok(Region::Europe),
            "kr" => Ok(Region::Korea),
            "asia" => Ok(Region::Asia),
            other => Err(ApiError::InvalidInput(format!("unknown region: {other}"))),
        }
    }
}

/// Ladder game modes. Only 1v1 exists on the matchmaking ladder today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    OneVsOne,
}

impl GameMode {
    #[must_use]
    pub fn id(&self) -> u32 {
        match self {
            GameMode::OneVsOne => 1,
        }
    }

    pub fn from_id(id: u32) -> Result<Self, ApiError> {
        match id {
            1 => Ok(GameMode::OneVsOne),
            other => Err(ApiError::UnexpectedResponse(format!("unknown game mode id: {other}"))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::OneVsOne => "1v1",
        }
    }
}

/// Coarse skill classification, decoded from the API's bucket code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
    Unranked,
}

impl Tier {
    pub fn from_bucket(bucket: u64) -> Result<Self, ApiError> {
        match bucket {
            7 => Ok(Tier::S),
            6 => Ok(Tier::A),
            5 => Ok(Tier::B),
            4 => Ok(Tier::C),
            3 => Ok(Tier::D),
            2 => Ok(Tier::E),
            1 => Ok(Tier::F),
            0 => Ok(Tier::Unranked),
            other => Err(ApiError::UnexpectedResponse(format!("unknown bucket: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Terran,
    Protoss,
    Zerg,
    Random,
}

impl Race {
    /// The API spells races inconsistently; only the first letter is stable.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('t') => Ok(Race::Terran),
            Some('p') => Ok(Race::Protoss),
            Some('z') => Ok(Race::Zerg),
            Some('r') => Ok(Race::Random),
            _ => Err(ApiError::UnexpectedResponse(format!("invalid race from API: {s:?}"))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Terran => "terran",
            Race::Protoss => "protoss",
            Race::Zerg => "zerg",
            Race::Random => "random",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
    Undecided,
}

impl GameResult {
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('w') => Ok(GameResult::Win),
            Some('l') => Ok(GameResult::Loss),
            Some('d') => Ok(GameResult::Draw),
            Some('u') => Ok(GameResult::Undecided),
            _ => Err(ApiError::UnexpectedResponse(format!("invalid game result from API: {s:?}"))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::Win => "win",
            GameResult::Loss => "loss",
            GameResult::Draw => "draw",
            GameResult::Undecided => "undecided",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSpeed {
    Fastest,
    Faster,
    Fast,
    Normal,
    Slow,
    Slower,
    Slowest,
    Unknown,
}

impl GameSpeed {
    /// UMS maps carry speed codes outside the documented set, so unknown
    /// codes degrade to `Unknown` rather than failing the whole record.
    #[must_use]
    pub fn from_code(code: u64) -> Self {
        match code {
            6 => GameSpeed::Fastest,
            5 => GameSpeed::Faster,
            4 => GameSpeed::Fast,
            3 => GameSpeed::Normal,
            2 => GameSpeed::Slow,
            1 => GameSpeed::Slower,
            0 => GameSpeed::Slowest,
            other => {
                log::error!("unknown game speed code {other}, defaulting to unknown");
                GameSpeed::Unknown
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GameSpeed::Fastest => "fastest",
            GameSpeed::Faster => "faster",
            GameSpeed::Fast => "fast",
            GameSpeed::Normal => "normal",
            GameSpeed::Slow => "slow",
            GameSpeed::Slower => "slower",
            GameSpeed::Slowest => "slowest",
            GameSpeed::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapTileset {
    Badlands,
    SpacePlatform,
    Installation,
    Ashworld,
    Jungle,
    Desert,
    Arctic,
    Twilight,
}

impl MapTileset {
    pub fn from_code(code: u64) -> Result<Self, ApiError> {
        match code {
            0 => Ok(MapTileset::Badlands),
            1 => Ok(MapTileset::SpacePlatform),
            2 => Ok(MapTileset::Installation),
            3 => Ok(MapTileset::Ashworld),
            4 => Ok(MapTileset::Jungle),
            5 => Ok(MapTileset::Desert),
            6 => Ok(MapTileset::Arctic),
            7 => Ok(MapTileset::Twilight),
            other => Err(ApiError::UnexpectedResponse(format!("unknown tileset id: {other}"))),
        }
    }
}

/// Field mask selecting the shape of the profile-by-toon response.
/// A closed set: unknown masks are unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileFieldMask {
    ScrMmGameLoading,
    ScrMmToonInfo,
    ScrToonInfo,
    ScrProfile,
}

impl ProfileFieldMask {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileFieldMask::ScrMmGameLoading => "scr_mmgameloading",
            ProfileFieldMask::ScrMmToonInfo => "scr_mmtooninfo",
            ProfileFieldMask::ScrToonInfo => "scr_tooninfo",
            ProfileFieldMask::ScrProfile => "scr_profile",
        }
    }
}
