use std::time::Duration;

pub const MINUTE: Duration = Duration::from_secs(60);
pub const HOUR: Duration = Duration::from_secs(60 * 60);
pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

pub const MIB: usize = 1024 * 1024;

/// Per-endpoint cache policy. `ttl` is per entry; `max_bytes` bounds the
/// aggregate serialized size of the whole endpoint cache, not one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSpec {
    pub ttl: Duration,
    pub max_bytes: usize,
}

impl CacheSpec {
    #[must_use]
    pub const fn new(ttl: Duration, max_bytes: usize) -> Self {
        Self { ttl, max_bytes }
    }
}

/// One independently tunable spec per endpoint. `None` disables caching for
/// that endpoint entirely (every call passes through to the network).
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub gateways: Option<CacheSpec>,
    pub maps: Option<CacheSpec>,
    pub leaderboards: Option<CacheSpec>,
    pub leaderboard_rankings: Option<CacheSpec>,
    pub name_search: Option<CacheSpec>,
    pub rank_by_toon: Option<CacheSpec>,
    pub profile: Option<CacheSpec>,
    pub match_history: Option<CacheSpec>,
    pub match_replays: Option<CacheSpec>,
    pub map_stats: Option<CacheSpec>,
}

impl Default for CacheConfig {
    /// TTLs follow each endpoint's real-world update cadence.
    fn default() -> Self {
        Self {
            // Gateway and map listings change rarely, at most per season.
            gateways: Some(CacheSpec::new(HOUR, MIB)),
            maps: Some(CacheSpec::new(HOUR, MIB)),
            // The catalog refreshes every 5 minutes but only its update
            // timestamps actually move.
            leaderboards: Some(CacheSpec::new(HOUR, MIB)),
            // Ranking pages, searches and per-toon ranks update on the
            // 5-minute ladder cycle.
            leaderboard_rankings: Some(CacheSpec::new(Duration::from_secs(5 * 60), MIB)),
            name_search: Some(CacheSpec::new(Duration::from_secs(5 * 60), MIB)),
            rank_by_toon: Some(CacheSpec::new(Duration::from_secs(5 * 60), MIB)),
            // Profiles, match history and map stats move within a minute of a
            // finished game.
            profile: Some(CacheSpec::new(MINUTE, MIB)),
            match_history: Some(CacheSpec::new(MINUTE, MIB)),
            map_stats: Some(CacheSpec::new(MINUTE, MIB)),
            // A played match's replay listing is immutable once recorded.
            match_replays: Some(CacheSpec::new(DAY, MIB)),
        }
    }
}

impl CacheConfig {
    /// All caching off; every endpoint passes through. Useful in tests.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            gateways: None,
            maps: None,
            leaderboards: None,
            leaderboard_rankings: None,
            name_search: None,
            rank_by_toon: None,
            profile: None,
            match_history: None,
            match_replays: None,
            map_stats: None,
        }
    }
}
