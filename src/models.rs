pub mod account;
pub mod gateway;
pub mod leaderboard;
pub mod map;
pub mod map_stats;
pub mod matches;
pub mod ranking;
pub mod replay;
pub mod search;

pub use account::{
    AccountProfile, FullAccount, FullAccountMinusGameHistory, MinimalAccount,
    MinimalAccountWithGamesPlayedLastWeek,
};
pub use gateway::{Gateway, known_gateways};
pub use leaderboard::{Leaderboard, LeaderboardGateway};
pub use map::MapInfo;
pub use map_stats::{MapStats, MapStatsTree};
pub use matches::{Match, MatchMap, MatchPlayer, MatchPlayerProfileInfo, MatchPoints};
pub use ranking::{AccountRankings, Ranking};
pub use replay::{Replay, Replays};
pub use search::PlayerSearchResult;
