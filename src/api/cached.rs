use crate::api::{RawApi, wire};
use crate::cache::{Cache, CacheConfig, key};
use crate::errors::ApiError;
use crate::types::{GatewayId, LeaderboardId, ProfileFieldMask, SeasonNumber};
use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;

/// Memoizing decorator over any `RawApi`: one independently configured cache
/// per endpoint, keyed by the call's argument tuple.
///
/// There is no de-duplication of concurrent misses for one key. Overlapping
/// callers each reach the network and the cache keeps whichever response
/// lands last; responses for a key are equivalent within the TTL window, so
/// this race is accepted rather than coalesced.
pub struct CachingApi<A> {
    inner: A,
    gateways: Option<Cache<wire::GatewayResponse>>,
    maps: Option<Cache<wire::MapsResponse>>,
    leaderboards: Option<Cache<wire::LeaderboardResponse>>,
    leaderboard_rankings: Option<Cache<wire::LeaderboardEntityResponse>>,
    name_search: Option<Cache<wire::NameSearchResponse>>,
    rank_by_toon: Option<Cache<wire::RankByToonResponse>>,
    profile: Option<Cache<wire::ProfileResponse>>,
    match_history: Option<Cache<wire::MatchHistoryResponse>>,
    match_replays: Option<Cache<wire::MatchPlayerInfoResponse>>,
    map_stats: Option<Cache<wire::MapStatsResponse>>,
}

impl<A> CachingApi<A> {
    #[must_use]
    pub fn new(inner: A, config: CacheConfig) -> Self {
        Self {
            inner,
            gateways: config.gateways.map(Cache::new),
            maps: config.maps.map(Cache::new),
            leaderboards: config.leaderboards.map(Cache::new),
            leaderboard_rankings: config.leaderboard_rankings.map(Cache::new),
            name_search: config.name_search.map(Cache::new),
            rank_by_toon: config.rank_by_toon.map(Cache::new),
            profile: config.profile.map(Cache::new),
            match_history: config.match_history.map(Cache::new),
            match_replays: config.match_replays.map(Cache::new),
            map_stats: config.map_stats.map(Cache::new),
        }
    }
}

/// Serve from `cache` on a fresh hit; otherwise run `producer`, store the
/// result under `key`, and return it. With no cache configured this is a
/// pass-through.
async fn cache_or<V, F, Fut>(
    name: &str,
    cache: Option<&Cache<V>>,
    cache_key: String,
    producer: F,
) -> Result<V, ApiError>
where
    V: Clone + Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, ApiError>>,
{
    if let Some(cache) = cache {
        if let Some(value) = cache.get(&cache_key) {
            log::trace!("{name}({cache_key}) - cache hit");
            return Ok(value);
        }
    }
    log::trace!("{name}({cache_key}) - cache miss");

    let value = producer().await?;
    if let Some(cache) = cache {
        cache.insert(cache_key, value.clone());
    }
    Ok(value)
}

#[async_trait]
impl<A: RawApi> RawApi for CachingApi<A> {
    async fn gateway(&self) -> Result<wire::GatewayResponse, ApiError> {
        cache_or("gateway", self.gateways.as_ref(), key::SINGULAR.to_string(), || {
            self.inner.gateway()
        })
        .await
    }

    async fn classic_files_global_maps_1v1(&self) -> Result<wire::MapsResponse, ApiError> {
        cache_or("classic_files_global_maps_1v1", self.maps.as_ref(), key::SINGULAR.to_string(), || {
            self.inner.classic_files_global_maps_1v1()
        })
        .await
    }

    async fn leaderboard(&self) -> Result<wire::LeaderboardResponse, ApiError> {
        cache_or("leaderboard", self.leaderboards.as_ref(), key::SINGULAR.to_string(), || {
            self.inner.leaderboard()
        })
        .await
    }

    async fn leaderboard_entity(
        &self,
        leaderboard_id: LeaderboardId,
        offset: u64,
        length: u64,
    ) -> Result<wire::LeaderboardEntityResponse, ApiError> {
        cache_or(
            "leaderboard_entity",
            self.leaderboard_rankings.as_ref(),
            key::composite(&(leaderboard_id, offset, length)),
            || self.inner.leaderboard_entity(leaderboard_id, offset, length),
        )
        .await
    }

    async fn leaderboard_name_search(
        &self,
        leaderboard_id: LeaderboardId,
        search: &str,
    ) -> Result<wire::NameSearchResponse, ApiError> {
        cache_or(
            "leaderboard_name_search",
            self.name_search.as_ref(),
            key::composite(&(leaderboard_id, search)),
            || self.inner.leaderboard_name_search(leaderboard_id, search),
        )
        .await
    }

    async fn leaderboard_rank_by_toon(
        &self,
        leaderboard_id: LeaderboardId,
        toon: &str,
        gateway: GatewayId,
    ) -> Result<wire::RankByToonResponse, ApiError> {
        cache_or(
            "leaderboard_rank_by_toon",
            self.rank_by_toon.as_ref(),
            key::composite(&(leaderboard_id, toon, gateway)),
            || self.inner.leaderboard_rank_by_toon(leaderboard_id, toon, gateway),
        )
        .await
    }

    async fn map_stats_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
    ) -> Result<wire::MapStatsResponse, ApiError> {
        cache_or(
            "map_stats_by_toon",
            self.map_stats.as_ref(),
            key::composite(&(toon, gateway)),
            || self.inner.map_stats_by_toon(toon, gateway),
        )
        .await
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
        cache_or(
            "match_maker_game_info_by_toon",
            self.match_history.as_ref(),
            key::composite(&(toon, gateway, game_mode_id, season, offset, limit)),
            || {
                self.inner
                    .match_maker_game_info_by_toon(toon, gateway, game_mode_id, season, offset, limit)
            },
        )
        .await
    }

    async fn match_maker_game_info_player_info(
        &self,
        match_id: &str,
    ) -> Result<wire::MatchPlayerInfoResponse, ApiError> {
        cache_or(
            "match_maker_game_info_player_info",
            self.match_replays.as_ref(),
            key::composite(&(match_id,)),
            || self.inner.match_maker_game_info_player_info(match_id),
        )
        .await
    }

    async fn aurora_profile_by_toon(
        &self,
        toon: &str,
        gateway: GatewayId,
        mask: ProfileFieldMask,
    ) -> Result<wire::ProfileResponse, ApiError> {
        cache_or(
            "aurora_profile_by_toon",
            self.profile.as_ref(),
            key::composite(&(toon, gateway, mask.as_str())),
            || self.inner.aurora_profile_by_toon(toon, gateway, mask),
        )
        .await
    }
}
