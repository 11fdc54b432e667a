use crate::types::{GameMode, Race, SeasonNumber};
use std::collections::HashMap;

/// Win/loss record for one race on one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStats {
    pub games: u32,
    pub wins: u32,
    pub global_games: u32,
    pub global_wins: u32,
}

impl MapStats {
    /// `None` when no games were played (ratio undefined).
    #[must_use]
    pub fn win_ratio(&self) -> Option<f64> {
        (self.games > 0).then(|| f64::from(self.wins) / f64::from(self.games))
    }

    #[must_use]
    pub fn global_win_ratio(&self) -> Option<f64> {
        (self.global_games > 0).then(|| f64::from(self.global_wins) / f64::from(self.global_games))
    }
}

/// game mode -> season -> map md5 -> race -> stats
pub type MapStatsTree =
    HashMap<GameMode, HashMap<SeasonNumber, HashMap<String, HashMap<Race, MapStats>>>>;
