//! Raw API surface: one async method per upstream endpoint, returning the
//! decoded wire shape. `BwApi` performs the network round trip through a
//! `Connection`; `CachingApi` wraps any `RawApi` with per-endpoint caches.

pub mod cached;
pub mod client;
pub mod wire;

pub use cached::CachingApi;
pub use client::BwApi;

use crate::errors::ApiError;
use crate::types::{GatewayId, LeaderboardId, ProfileFieldMask, SeasonNumber};
use async_trait::async_trait;

#[async_trait]
pub trait RawApi: Send + Sync {
    async fn gateway(&self) -> Result<wire::GatewayResponse, ApiError>;

    async fn classic_files_global_maps_1v1(&self) -> Result<wire::MapsResponse, ApiError>;

    async fn leaderboard(&self) -> Result<wire::LeaderboardResponse, ApiError>;

    async fn leaderboard_entity(
        &self,
        leaderboard_id: LeaderboardId,
        offset: u64,
        length: u64,
    ) -> Result<wire::LeaderboardEntityResponse, ApiError>;

    async fn leaderboard_name_search(
        &self,
        leaderboard_id: LeaderboardId,
        search: &str,
    ) -> Result<wire::NameSearchResponse, ApiError>;

    async fn leaderboard_rank_by_toon(
        &self,
        leaderboard_id: LeaderboardId,
        toon: &str,
        gateway: GatewayId,
    ) -> Result<wire::RankByToonResponse, ApiError>;

    async fn map_stats_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
    ) -> Result<wire::MapStatsResponse, ApiError>;

    #[allow(clippy::too_many_arguments)]
    async fn match_maker_game_info_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
        game_mode_id: u32,
        season: SeasonNumber,
        offset: u64,
        limit: u64,
    ) -> Result<wire::MatchHistoryResponse, ApiError>;

    async fn match_maker_game_info_player_info(
        &self,
        match_id: &str,
    ) -> Result<wire::MatchPlayerInfoResponse, ApiError>;

    async fn aurora_profile_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
        mask: ProfileFieldMask,
    ) -> Result<wire::ProfileResponse, ApiError>;
}
