//! High-level client surface and the two paginated enumerators.
//!
//! Both enumerators are pull-driven: nothing touches the network until the
//! consumer asks for an element beyond what is buffered, and dropping an
//! enumerator mid-stream releases everything it holds. Neither is
//! restartable; a fresh call re-enumerates from the start.

use crate::api::{BwApi, CachingApi, RawApi};
use crate::cache::CacheConfig;
use crate::connection::{HttpConnection, ResilientConnection};
use crate::errors::ApiError;
use crate::models::{
    AccountRankings, FullAccount, FullAccountMinusGameHistory, Gateway, Leaderboard, MapInfo,
    MapStatsTree, Match, MinimalAccount, MinimalAccountWithGamesPlayedLastWeek,
    PlayerSearchResult, Ranking, Replays, known_gateways,
};
use crate::transform;
use crate::types::{
    GLOBAL_GATEWAY_ID, GameMode, GatewayId, LeaderboardId, ProfileFieldMask, Region, SeasonNumber,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Protocol maximum page size for ranking pages.
pub const RANKINGS_PAGE_SIZE: u64 = 100;

/// Protocol maximum page size for match history pages. Deliberately not tied
/// to the caller's limit: a small requested page is more likely to come back
/// fully empty even when data remains.
pub const MATCH_HISTORY_PAGE_SIZE: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayLookup {
    Id(GatewayId),
    Region(Region),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardLookup {
    Id(LeaderboardId),
    /// Unset fields default to 1v1, the global gateway, and the current
    /// season.
    Props {
        game_mode: Option<GameMode>,
        gateway: Option<GatewayId>,
        season: Option<SeasonNumber>,
    },
}

impl Default for LeaderboardLookup {
    fn default() -> Self {
        LeaderboardLookup::Props { game_mode: None, gateway: None, season: None }
    }
}

/// The resilient, cached read layer over the ladder API. Construct once per
/// session and pass around; all state lives in the configured cache and
/// transport instances.
pub struct BroodStats {
    api: Arc<dyn RawApi>,
}

impl BroodStats {
    #[must_use]
    pub fn new(api: impl RawApi + 'static) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Wires the default stack: HTTP transport with an optional bearer
    /// credential, the bounded retry policy, and per-endpoint caching.
    #[must_use]
    pub fn connect(base_url: impl Into<String>, token: Option<String>, cache: CacheConfig) -> Self {
        let connection = ResilientConnection::new(HttpConnection::new(base_url, token));
        Self::new(CachingApi::new(BwApi::new(connection), cache))
    }

    /// All known gateways. A static listing; the set changes at most with
    /// game patches. Live per-gateway data comes from `online_users`.
    #[must_use]
    pub fn gateways(&self) -> &'static [Gateway] {
        known_gateways()
    }

    pub fn gateway(&self, lookup: GatewayLookup) -> Result<Gateway, ApiError> {
        let found = match lookup {
            GatewayLookup::Id(id) => known_gateways().iter().find(|g| g.id == id),
            GatewayLookup::Region(region) => known_gateways().iter().find(|g| g.region == region),
        };
        found
            .copied()
            .ok_or_else(|| ApiError::EntityNotFound(format!("no gateway matches {lookup:?}")))
    }

    pub async fn online_users(&self, lookup: GatewayLookup) -> Result<u64, ApiError> {
        let response = self.api.gateway().await?;
        let info = match lookup {
            GatewayLookup::Id(id) => response.get(&id.to_string()),
            GatewayLookup::Region(region) => {
                response.values().find(|g| g.region == region.as_str())
            }
        };
        info.map(|g| g.online_users)
            .ok_or_else(|| ApiError::EntityNotFound(format!("no gateway matches {lookup:?}")))
    }

    /// The 1v1 ladder map listing for the current season.
    pub async fn maps(&self) -> Result<Vec<MapInfo>, ApiError> {
        transform::maps::maps_from_response(&self.api.classic_files_global_maps_1v1().await?)
    }

    pub async fn current_season(&self) -> Result<SeasonNumber, ApiError> {
        Ok(self.api.leaderboard().await?.matchmaked_current_season)
    }

    pub async fn leaderboards(&self) -> Result<Vec<Leaderboard>, ApiError> {
        transform::leaderboards::leaderboards_from_response(&self.api.leaderboard().await?)
    }

    pub async fn leaderboard(&self, lookup: LeaderboardLookup) -> Result<Leaderboard, ApiError> {
        let boards = self.leaderboards().await?;
        let found = match lookup {
            LeaderboardLookup::Id(id) => boards.into_iter().find(|b| b.id == id),
            LeaderboardLookup::Props { game_mode, gateway, season } => {
                let game_mode = game_mode.unwrap_or(GameMode::OneVsOne);
                let gateway = gateway.unwrap_or(GLOBAL_GATEWAY_ID);
                let season = match season {
                    Some(season) => season,
                    None => self.current_season().await?,
                };
                boards.into_iter().find(|b| {
                    b.game_mode == game_mode && b.gateway.id == gateway && b.season_id == season
                })
            }
        };
        found.ok_or_else(|| ApiError::EntityNotFound(format!("no leaderboard matches {lookup:?}")))
    }

    /// Cheapest profile lookup (`scr_mmgameloading` mask).
    pub async fn minimal_account(
        &self,
        toon: &str,
        gateway: GatewayLookup,
    ) -> Result<MinimalAccount, ApiError> {
        let gw = self.gateway(gateway)?;
        let response =
            self.api.aurora_profile_by_toon(toon, gw.id, ProfileFieldMask::ScrMmGameLoading).await?;
        transform::profile::minimal_account_from_response(&response)
            .ok_or_else(|| account_not_found(toon, gw.id))
    }

    /// Minimal profile plus per-toon weekly game counts (`scr_mmtooninfo`).
    pub async fn minimal_account_with_games_played_last_week(
        &self,
        toon: &str,
        gateway: GatewayLookup,
    ) -> Result<MinimalAccountWithGamesPlayedLastWeek, ApiError> {
        let gw = self.gateway(gateway)?;
        let response =
            self.api.aurora_profile_by_toon(toon, gw.id, ProfileFieldMask::ScrMmToonInfo).await?;
        transform::profile::minimal_account_with_week_from_response(&response)
            .ok_or_else(|| account_not_found(toon, gw.id))
    }

    /// Full account except game history (`scr_tooninfo`); cheaper than
    /// `full_account`.
    pub async fn full_account_minus_game_history(
        &self,
        toon: &str,
        gateway: GatewayLookup,
    ) -> Result<FullAccountMinusGameHistory, ApiError> {
        let gw = self.gateway(gateway)?;
        let response =
            self.api.aurora_profile_by_toon(toon, gw.id, ProfileFieldMask::ScrToonInfo).await?;
        transform::profile::full_account_minus_history_from_response(&response)
            .ok_or_else(|| account_not_found(toon, gw.id))
    }

    /// Full account information (`scr_profile`); the slowest profile call.
    pub async fn full_account(
        &self,
        toon: &str,
        gateway: GatewayLookup,
    ) -> Result<FullAccount, ApiError> {
        let gw = self.gateway(gateway)?;
        let response =
            self.api.aurora_profile_by_toon(toon, gw.id, ProfileFieldMask::ScrProfile).await?;
        transform::profile::full_account_from_response(&response)
            .ok_or_else(|| account_not_found(toon, gw.id))
    }

    /// Every ranking on the account owning `toon`, not just the requested
    /// toon's.
    pub async fn account_rankings_by_toon(
        &self,
        toon: &str,
        gateway: GatewayLookup,
        leaderboard: LeaderboardLookup,
    ) -> Result<AccountRankings, ApiError> {
        let gw = self.gateway(gateway)?;
        let board = self.leaderboard(leaderboard).await?;
        let response = self.api.leaderboard_rank_by_toon(board.id, toon, gw.id).await?;
        transform::rankings::account_rankings_from_response(&response, toon, gw.id)?
            .ok_or_else(|| account_not_found(toon, gw.id))
    }

    /// Per-map, per-race stats for the toon.
    pub async fn map_stats_by_toon(
        &self,
        toon: &str,
        gateway: GatewayLookup,
    ) -> Result<MapStatsTree, ApiError> {
        let gw = self.gateway(gateway)?;
        transform::map_stats::map_stats_from_response(
            &self.api.map_stats_by_toon(toon, gw.id).await?,
        )
    }

    /// The replays uploaded for a match. Match detail is immutable once
    /// recorded, which is why its cache defaults close to a day.
    pub async fn replays(&self, match_id: &str) -> Result<Replays, ApiError> {
        transform::replay::replays_from_response(
            &self.api.match_maker_game_info_player_info(match_id).await?,
        )
    }

    /// Name search over the current global leaderboard.
    pub async fn player_search(&self, query: &str) -> Result<Vec<PlayerSearchResult>, ApiError> {
        if query.is_empty() {
            return Err(ApiError::InvalidInput("search query must not be empty".to_string()));
        }
        let board = self.leaderboard(LeaderboardLookup::default()).await?;
        Ok(transform::search::search_results_from_response(
            &self.api.leaderboard_name_search(board.id, query).await?,
        ))
    }

    /// The ranking at `index` (0-indexed) on the selected leaderboard.
    pub async fn ranking(
        &self,
        index: u64,
        lookup: LeaderboardLookup,
    ) -> Result<Ranking, ApiError> {
        let mut rankings = self.rankings(lookup, index, Some(1));
        rankings.next().await?.ok_or_else(|| {
            ApiError::EntityNotFound(format!("no ranking at index {index} for {lookup:?}"))
        })
    }

    /// Lazily enumerates the selected leaderboard's rankings from `begin`
    /// (inclusive, 0-indexed), at most `limit` entries.
    #[must_use]
    pub fn rankings(
        &self,
        lookup: LeaderboardLookup,
        begin: u64,
        limit: Option<u64>,
    ) -> Rankings<'_> {
        Rankings {
            gb: self,
            lookup,
            leaderboard_id: None,
            offset: begin,
            limit,
            yielded: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Lazily enumerates the player's match history on the selected
    /// leaderboard, newest first, at most `limit` distinct matches.
    #[must_use]
    pub fn match_history(
        &self,
        toon: impl Into<String>,
        gateway: GatewayLookup,
        leaderboard: LeaderboardLookup,
        limit: Option<u64>,
    ) -> MatchHistory<'_> {
        MatchHistory {
            gb: self,
            toon: toon.into(),
            gateway,
            lookup: leaderboard,
            limit,
            state: None,
            buffer: VecDeque::new(),
            done: false,
        }
    }
}

fn account_not_found(toon: &str, gateway_id: GatewayId) -> ApiError {
    ApiError::EntityNotFound(format!("no account for {toon} on gateway {gateway_id}"))
}

/// Forward-only enumeration of one leaderboard's ranking pages.
///
/// Fetches fixed 100-row pages, shrinking the final request to the remaining
/// limit, and ends as soon as a page comes back short of the full page size
/// regardless of the limit.
pub struct Rankings<'a> {
    gb: &'a BroodStats,
    lookup: LeaderboardLookup,
    leaderboard_id: Option<LeaderboardId>,
    offset: u64,
    limit: Option<u64>,
    yielded: u64,
    buffer: VecDeque<Ranking>,
    exhausted: bool,
}

impl Rankings<'_> {
    /// The next ranking, or `None` once the limit is reached or the source
    /// ran short. Performs a network round trip only when the buffered page
    /// is spent.
    pub async fn next(&mut self) -> Result<Option<Ranking>, ApiError> {
        loop {
            if let Some(limit) = self.limit {
                if self.yielded >= limit {
                    return Ok(None);
                }
            }

            if let Some(ranking) = self.buffer.pop_front() {
                self.yielded += 1;
                return Ok(Some(ranking));
            }

            if self.exhausted {
                return Ok(None);
            }

            let leaderboard_id = match self.leaderboard_id {
                Some(id) => id,
                None => {
                    let id = self.gb.leaderboard(self.lookup).await?.id;
                    self.leaderboard_id = Some(id);
                    id
                }
            };

            let request = match self.limit {
                Some(limit) => RANKINGS_PAGE_SIZE.min(limit - self.yielded),
                None => RANKINGS_PAGE_SIZE,
            };

            let response =
                self.gb.api.leaderboard_entity(leaderboard_id, self.offset, request).await?;

            // A page short of the protocol maximum is the end of the data.
            if (response.rows.len() as u64) < RANKINGS_PAGE_SIZE {
                self.exhausted = true;
            }
            self.offset += RANKINGS_PAGE_SIZE;

            self.buffer
                .extend(transform::rankings::rankings_from_entity(leaderboard_id, &response)?);
        }
    }

    /// Drains the rest of the enumeration into a vector.
    pub async fn to_vec(mut self) -> Result<Vec<Ranking>, ApiError> {
        let mut out = Vec::new();
        while let Some(ranking) = self.next().await? {
            out.push(ranking);
        }
        Ok(out)
    }
}

struct ReconcilerState {
    gateway_id: GatewayId,
    leaderboard: Leaderboard,
    /// Upper bound on distinct records, from the player's ranking; best
    /// effort, not a guarantee.
    expected_total: u64,
    seen: HashSet<String>,
    page: u64,
}

/// Reconciling enumeration of a player's match history.
///
/// The upstream pages are sparse and lossy: a full-size request may return
/// anywhere from zero to fifty usable records, records repeat across pages,
/// and rows within a page arrive unordered. Termination leans on an
/// independently fetched expected-total oracle instead of page math; a page
/// with zero raw records ends the enumeration early even short of the
/// oracle, a deliberate approximation that can under-return when a truly
/// sparse page precedes a non-empty one.
pub struct MatchHistory<'a> {
    gb: &'a BroodStats,
    toon: String,
    gateway: GatewayLookup,
    lookup: LeaderboardLookup,
    limit: Option<u64>,
    state: Option<ReconcilerState>,
    buffer: VecDeque<Match>,
    done: bool,
}

impl MatchHistory<'_> {
    /// The next distinct match in reverse-chronological order, or `None`
    /// when the history is exhausted.
    pub async fn next(&mut self) -> Result<Option<Match>, ApiError> {
        if self.done {
            return Ok(None);
        }

        if self.state.is_none() {
            self.state = Some(self.resolve().await?);
        }

        loop {
            let Some(state) = self.state.as_mut() else {
                return Ok(None);
            };

            // Duplicate identities across pages yield once, at first sight.
            while let Some(m) = self.buffer.pop_front() {
                if state.seen.contains(&m.id) {
                    continue;
                }
                state.seen.insert(m.id.clone());
                if let Some(limit) = self.limit {
                    if state.seen.len() as u64 >= limit {
                        // Stop without draining the rest of the page.
                        self.done = true;
                        self.buffer.clear();
                    }
                }
                return Ok(Some(m));
            }

            if self.done || state.seen.len() as u64 >= state.expected_total {
                self.done = true;
                return Ok(None);
            }

            let response = self
                .gb
                .api
                .match_maker_game_info_by_toon(
                    &self.toon,
                    state.gateway_id,
                    state.leaderboard.game_mode_id(),
                    state.leaderboard.season_id,
                    state.page * MATCH_HISTORY_PAGE_SIZE,
                    MATCH_HISTORY_PAGE_SIZE,
                )
                .await?;
            state.page += 1;

            // An entirely empty page is taken as proof there is nothing
            // left, even though the oracle has not been reached.
            if response.is_empty() {
                self.done = true;
                return Ok(None);
            }

            let mut matches = transform::match_history::matches_from_response(
                &self.toon,
                state.gateway_id,
                &response,
            )?;
            // Pages arrive in page-level chronological order but rows within
            // a page do not; impose the order here so the emitted sequence
            // is reverse-chronological.
            matches.sort_by(|a, b| b.game_id.cmp(&a.game_id));
            self.buffer.extend(matches);
        }
    }

    /// Drains the rest of the enumeration into a vector.
    pub async fn to_vec(mut self) -> Result<Vec<Match>, ApiError> {
        let mut out = Vec::new();
        while let Some(m) = self.next().await? {
            out.push(m);
        }
        Ok(out)
    }

    /// Resolves the leaderboard and the player's ranking on it. The
    /// ranking's total games played is the only reliable record count and
    /// becomes the termination oracle.
    async fn resolve(&self) -> Result<ReconcilerState, ApiError> {
        if self.toon.is_empty() {
            return Err(ApiError::InvalidInput("toon must not be empty".to_string()));
        }

        let gateway = self.gb.gateway(self.gateway)?;
        let leaderboard = self.gb.leaderboard(self.lookup).await?;
        let account = self
            .gb
            .account_rankings_by_toon(
                &self.toon,
                self.gateway,
                LeaderboardLookup::Id(leaderboard.id),
            )
            .await?;
        let ranking = account.requested_ranking().ok_or_else(|| {
            ApiError::EntityNotFound(format!(
                "no ranking for {} on gateway {} in leaderboard {}",
                self.toon, gateway.id, leaderboard.id
            ))
        })?;

        log::info!(
            "expecting {} total games played for {} on gateway {} in leaderboard {}",
            ranking.total_games_played(),
            self.toon,
            gateway.id,
            leaderboard.id
        );

        let expected_total =
            u64::from(ranking.total_games_played()).min(self.limit.unwrap_or(u64::MAX));

        Ok(ReconcilerState {
            gateway_id: gateway.id,
            leaderboard,
            expected_total,
            seen: HashSet::new(),
            page: 0,
        })
    }
}
