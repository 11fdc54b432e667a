use async_trait::async_trait;
use broodstats::api::{RawApi, wire};
use broodstats::{ApiError, BroodStats, LeaderboardLookup};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn catalog() -> wire::LeaderboardResponse {
    let mut gamemodes = BTreeMap::new();
    gamemodes.insert("1".to_string(), wire::GameModeEntry { name: "1v1".to_string() });
    let mut leaderboards = BTreeMap::new();
    leaderboards.insert(
        "500".to_string(),
        wire::LeaderboardEntry {
            benefactor_id: "0".to_string(),
            gamemode_id: 1,
            gateway_id: 0,
            id: 500,
            name: "Global".to_string(),
            last_update_time: "1681000000".to_string(),
            next_update_time: "1681000300".to_string(),
            program_id: "S1".to_string(),
            season_id: 15,
            season_name: "2023 Season 1".to_string(),
        },
    );
    wire::LeaderboardResponse {
        gamemodes,
        gateways: BTreeMap::new(),
        leaderboards,
        matchmaked_current_season: 15,
    }
}

fn ranking_row(rank: u64) -> Vec<serde_json::Value> {
    serde_json::json!([
        rank,
        rank,
        30,
        2000,
        10,
        5,
        1,
        format!("player{rank}"),
        "tag#1",
        "avatar.jpg",
        "terran",
        2000,
        7
    ])
    .as_array()
    .expect("row literal")
    .clone()
}

/// Serves ranking pages out of a fixed-size dataset, so short pages emerge
/// exactly where the data ends.
struct PagedBackend {
    total: u64,
    requests: Arc<Mutex<Vec<(u64, u64)>>>,
    entity_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl RawApi for PagedBackend {
    async fn gateway(&self) -> Result<wire::GatewayResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn classic_files_global_maps_1v1(&self) -> Result<wire::MapsResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn leaderboard(&self) -> Result<wire::LeaderboardResponse, ApiError> {
        Ok(catalog())
    }

    async fn leaderboard_entity(
        &self,
        _leaderboard_id: u32,
        offset: u64,
        length: u64,
    ) -> Result<wire::LeaderboardEntityResponse, ApiError> {
        self.entity_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((offset, length));

        let end = (offset + length).min(self.total);
        let rows = (offset..end).map(ranking_row).collect();
        Ok(wire::LeaderboardEntityResponse {
            columns: [
                "rank",
                "last_rank",
                "gateway_id",
                "points",
                "wins",
                "losses",
                "disconnects",
                "toon",
                "battletag",
                "avatar",
                "feature_stat",
                "rating",
                "bucket",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            rows,
        })
    }

    async fn leaderboard_name_search(
        &self,
        _leaderboard_id: u32,
        _search: &str,
    ) -> Result<wire::NameSearchResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn leaderboard_rank_by_toon(
        &self,
        _leaderboard_id: u32,
        _toon: &str,
        _gateway: u16,
    ) -> Result<wire::RankByToonResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn map_stats_by_toon(
        &self,
        _toon: &str,
        _gateway: u16,
    ) -> Result<wire::MapStatsResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn match_maker_game_info_by_toon(
        &self,
        _toon: &str,
        _gateway: u16,
        _game_mode_id: u32,
        _season: u32,
        _offset: u64,
        _limit: u64,
    ) -> Result<wire::MatchHistoryResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn match_maker_game_info_player_info(
        &self,
        _match_id: &str,
    ) -> Result<wire::MatchPlayerInfoResponse, ApiError> {
        unimplemented!("not exercised")
    }

    async fn aurora_profile_by_toon(
        &self,
        _toon: &str,
        _gateway: u16,
        _mask: broodstats::types::ProfileFieldMask,
    ) -> Result<wire::ProfileResponse, ApiError> {
        unimplemented!("not exercised")
    }
}

struct Harness {
    gb: BroodStats,
    requests: Arc<Mutex<Vec<(u64, u64)>>>,
    entity_calls: Arc<AtomicUsize>,
}

fn harness(total: u64) -> Harness {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let entity_calls = Arc::new(AtomicUsize::new(0));
    let gb = BroodStats::new(PagedBackend {
        total,
        requests: requests.clone(),
        entity_calls: entity_calls.clone(),
    });
    Harness { gb, requests, entity_calls }
}

#[tokio::test]
async fn a_short_page_ends_an_unlimited_enumeration() {
    let h = harness(140);
    let rankings = h.gb.rankings(LeaderboardLookup::default(), 0, None).to_vec().await.unwrap();

    assert_eq!(rankings.len(), 140);
    assert_eq!(h.entity_calls.load(Ordering::SeqCst), 2, "page 2 was short, so no page 3");
    assert_eq!(*h.requests.lock(), vec![(0, 100), (100, 100)]);
}

#[tokio::test]
async fn the_final_request_shrinks_to_the_remaining_limit() {
    let h = harness(100_000);
    let rankings =
        h.gb.rankings(LeaderboardLookup::default(), 0, Some(150)).to_vec().await.unwrap();

    assert_eq!(rankings.len(), 150);
    assert_eq!(*h.requests.lock(), vec![(0, 100), (100, 50)]);
}

#[tokio::test]
async fn enumeration_starts_at_the_requested_index() {
    let h = harness(100_000);
    let mut rankings = h.gb.rankings(LeaderboardLookup::default(), 5, Some(1));

    let first = rankings.next().await.unwrap().expect("one ranking");
    assert_eq!(first.toon, "player5");
    assert_eq!(*h.requests.lock(), vec![(5, 1)]);
}

#[tokio::test]
async fn no_network_call_happens_before_the_first_pull() {
    let h = harness(100);
    let _rankings = h.gb.rankings(LeaderboardLookup::default(), 0, None);
    assert_eq!(h.entity_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn an_empty_first_page_yields_nothing() {
    let h = harness(0);
    let mut rankings = h.gb.rankings(LeaderboardLookup::default(), 0, None);
    assert!(rankings.next().await.unwrap().is_none());
    assert_eq!(h.entity_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ranking_by_index_returns_the_single_entry() {
    let h = harness(10);
    let ranking = h.gb.ranking(3, LeaderboardLookup::default()).await.unwrap();
    assert_eq!(ranking.toon, "player3");
}

#[tokio::test]
async fn ranking_past_the_end_is_not_found() {
    let h = harness(2);
    let err = h.gb.ranking(7, LeaderboardLookup::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::EntityNotFound(_)));
}

#[tokio::test]
async fn unknown_leaderboards_are_not_found() {
    let h = harness(10);
    let err = h
        .gb
        .rankings(LeaderboardLookup::Id(999), 0, None)
        .next()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EntityNotFound(_)));
}
