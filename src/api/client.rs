use crate::api::{RawApi, wire};
use crate::connection::{ApiPath, Connection};
use crate::errors::ApiError;
use crate::types::{GatewayId, LeaderboardId, ProfileFieldMask, SeasonNumber};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// The raw ladder API client: renders the endpoint path, fetches the body
/// text through the (typically resilient) connection, and decodes JSON.
pub struct BwApi<C> {
    connection: C,
}

impl<C> BwApi<C> {
    #[must_use]
    pub fn new(connection: C) -> Self {
        Self { connection }
    }
}

impl<C: Connection> BwApi<C> {
    async fn fetch_json<T: DeserializeOwned>(&self, path: ApiPath) -> Result<T, ApiError> {
        let text = self.connection.fetch(&path).await?;
        decode(&path, &text)
    }
}

/// A body that survives the transient-error check but fails to decode is a
/// structural defect, not a retry candidate. Keep the offending head of the
/// body for diagnosis.
fn decode<T: DeserializeOwned>(path: &ApiPath, text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| {
        let head: String = text.chars().take(120).collect();
        ApiError::UnexpectedResponse(format!("{path}: {e}; body starts with {head:?}"))
    })
}

#[async_trait]
impl<C: Connection> RawApi for BwApi<C> {
    async fn gateway(&self) -> Result<wire::GatewayResponse, ApiError> {
        self.fetch_json(ApiPath::Gateway).await
    }

    async fn classic_files_global_maps_1v1(&self) -> Result<wire::MapsResponse, ApiError> {
        self.fetch_json(ApiPath::ClassicFilesGlobalMaps1v1).await
    }

    async fn leaderboard(&self) -> Result<wire::LeaderboardResponse, ApiError> {
        self.fetch_json(ApiPath::Leaderboard).await
    }

    async fn leaderboard_entity(
        &self,
        leaderboard_id: LeaderboardId,
        offset: u64,
        length: u64,
    ) -> Result<wire::LeaderboardEntityResponse, ApiError> {
        self.fetch_json(ApiPath::LeaderboardEntity { leaderboard_id, offset, length }).await
    }

    async fn leaderboard_name_search(
        &self,
        leaderboard_id: LeaderboardId,
        search: &str,
    ) -> Result<wire::NameSearchResponse, ApiError> {
        self.fetch_json(ApiPath::LeaderboardNameSearch {
            leaderboard_id,
            search: search.to_string(),
        })
        .await
    }

    async fn leaderboard_rank_by_toon(
        &self,
        leaderboard_id: LeaderboardId,
        toon: &str,
        gateway: GatewayId,
    ) -> Result<wire::RankByToonResponse, ApiError> {
        self.fetch_json(ApiPath::LeaderboardRankByToon {
            leaderboard_id,
            toon: toon.to_string(),
            gateway,
        })
        .await
    }

    async fn map_stats_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
    ) -> Result<wire::MapStatsResponse, ApiError> {
        self.fetch_json(ApiPath::MapStatsByToon { toon: toon.to_string(), gateway }).await
    }

    async fn match_maker_game_info_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
        game_mode_id: u32,
        season: SeasonNumber,
        offset: u64,
        limit: u64,
    ) -> Result<wire::MatchHistoryResponse, ApiError> {
        self.fetch_json(ApiPath::MatchMakerGameInfoByToon {
            toon: toon.to_string(),
            gateway,
            game_mode_id,
            season,
            offset,
            limit,
        })
        .await
    }

    async fn match_maker_game_info_player_info(
        &self,
        match_id: &str,
    ) -> Result<wire::MatchPlayerInfoResponse, ApiError> {
        self.fetch_json(ApiPath::MatchMakerGameInfoPlayerInfo { match_id: match_id.to_string() })
            .await
    }

    async fn aurora_profile_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
        mask: ProfileFieldMask,
    ) -> Result<wire::ProfileResponse, ApiError> {
        self.fetch_json(ApiPath::AuroraProfileByToon { toon: toon.to_string(), gateway, mask })
            .await
    }
}
