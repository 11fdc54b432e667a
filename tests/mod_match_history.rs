use async_trait::async_trait;
use broodstats::api::{RawApi, wire};
use broodstats::{ApiError, BroodStats, GatewayLookup, LeaderboardLookup};
use parking_lot::Mutex;
use serde_json::{Value, json};
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

fn ranked_toon(toon: &str, gateway: u16, wins: u32) -> wire::RankedToon {
    wire::RankedToon {
        rank: 1,
        last_rank: 1,
        gateway_id: gateway,
        wins,
        losses: 0,
        disconnects: 0,
        name: toon.to_string(),
        battletag: "tag#1".to_string(),
        avatar: "avatar.jpg".to_string(),
        feature_stat: "terran".to_string(),
        points: 2000,
        bucket: 7,
    }
}

fn game_result_entry(result: &str) -> Value {
    json!({
        "attributes": { "race": "terran", "team": "1", "gPlayerData_idx": "0" },
        "is_computer": false,
        "result": result,
    })
}

/// A healthy single-player-record match. `game_id` doubles as the
/// chronological sequence number used for ordering.
fn match_record(match_id: &str, game_id: u64) -> Value {
    json!({
        match_id: {
            "match_created": "1681000000",
            "players": [
                {
                    "1234": {
                        "name": "dex9",
                        "aurora_id": 99,
                        "avatar_url": "avatar.jpg",
                        "gateway_id": 30,
                        "info_attributes": {},
                        "score": {
                            "base": 2000, "delta": 10,
                            "bucket_old": 7, "bucket_new": 7, "win_streak": 1
                        },
                        "game_info": {
                            "name": "ladder game",
                            "attributes": {
                                "closed_slots": "6",
                                "flags": "0",
                                "game_speed": "6",
                                "host_name": "dex9",
                                "net_turn_rate": "24",
                                "map_crc": "123",
                                "map_file_name": "polypoid.scx",
                                "map_file_size": "120000",
                                "map_height": "128",
                                "map_width": "128",
                                "map_md5": "abc",
                                "map_name": "Polypoid",
                                "map_tile_set": "4",
                                "players_max": "2",
                                "game_id": game_id.to_string(),
                            }
                        },
                        "game_result": {
                            "dex9": game_result_entry("win"),
                            "Flash": game_result_entry("loss"),
                        }
                    }
                }
            ]
        }
    })
}

/// A record whose players carry no usable game_info: the known
/// unreconcilable anomaly.
fn broken_record(match_id: &str) -> Value {
    json!({ match_id: { "match_created": "1681000000", "players": [ { "1234": { "name": "dex9" } } ] } })
}

struct SparseBackend {
    total_games: u32,
    pages: Vec<wire::MatchHistoryResponse>,
    history_calls: Arc<AtomicUsize>,
    history_requests: Arc<Mutex<Vec<(u64, u64)>>>,
    rank_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl RawApi for SparseBackend {
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
        _offset: u64,
        _length: u64,
    ) -> Result<wire::LeaderboardEntityResponse, ApiError> {
        unimplemented!("not exercised")
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
        leaderboard_id: u32,
        toon: &str,
        gateway: u16,
    ) -> Result<wire::RankByToonResponse, ApiError> {
        self.rank_calls.fetch_add(1, Ordering::SeqCst);
        if self.total_games == 0 {
            // The API's "no such account" shape.
            return Ok(wire::RankByToonResponse { aurora_id: 0, leaderboard_id: 0, toons: vec![] });
        }
        Ok(wire::RankByToonResponse {
            aurora_id: 99,
            leaderboard_id,
            toons: vec![ranked_toon(toon, gateway, self.total_games)],
        })
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
        offset: u64,
        limit: u64,
    ) -> Result<wire::MatchHistoryResponse, ApiError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_requests.lock().push((offset, limit));
        let page = (offset / limit.max(1)) as usize;
        Ok(self.pages.get(page).cloned().unwrap_or_default())
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
    history_calls: Arc<AtomicUsize>,
    history_requests: Arc<Mutex<Vec<(u64, u64)>>>,
    rank_calls: Arc<AtomicUsize>,
}

fn harness(total_games: u32, pages: Vec<wire::MatchHistoryResponse>) -> Harness {
    let history_calls = Arc::new(AtomicUsize::new(0));
    let history_requests = Arc::new(Mutex::new(Vec::new()));
    let rank_calls = Arc::new(AtomicUsize::new(0));
    let gb = BroodStats::new(SparseBackend {
        total_games,
        pages,
        history_calls: history_calls.clone(),
        history_requests: history_requests.clone(),
        rank_calls: rank_calls.clone(),
    });
    Harness { gb, history_calls, history_requests, rank_calls }
}

fn history(h: &Harness, limit: Option<u64>) -> broodstats::MatchHistory<'_> {
    h.gb.match_history("dex9", GatewayLookup::Id(30), LeaderboardLookup::default(), limit)
}

#[tokio::test]
async fn stops_at_the_limit_across_sparse_pages() {
    // Each page returns 2 new distinct matches out of a full-size request.
    let h = harness(
        100,
        vec![
            vec![match_record("m1", 10), match_record("m2", 9)],
            vec![match_record("m3", 8), match_record("m4", 7)],
            vec![match_record("m5", 6), match_record("m6", 5)],
        ],
    );

    let matches = history(&h, Some(5)).to_vec().await.unwrap();
    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2", "m3", "m4", "m5"], "m6 is never yielded");
    assert_eq!(h.history_calls.load(Ordering::SeqCst), 3);
    assert_eq!(*h.history_requests.lock(), vec![(0, 50), (50, 50), (100, 50)]);
}

#[tokio::test]
async fn an_entirely_empty_page_ends_the_enumeration_early() {
    // The oracle says 10 games, but page 2 comes back with zero records.
    let h = harness(
        10,
        vec![
            vec![match_record("m1", 3), match_record("m2", 2), match_record("m3", 1)],
            vec![],
        ],
    );

    let matches = history(&h, None).to_vec().await.unwrap();
    assert_eq!(matches.len(), 3, "whatever page 1 produced is kept");
    assert_eq!(h.history_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn duplicates_across_pages_are_yielded_once_at_first_occurrence() {
    let h = harness(
        3,
        vec![
            vec![match_record("m1", 10), match_record("m2", 9)],
            vec![match_record("m2", 9), match_record("m3", 8)],
        ],
    );

    let matches = history(&h, None).to_vec().await.unwrap();
    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2", "m3"]);
}

#[tokio::test]
async fn a_known_unreconcilable_record_is_skipped_without_aborting() {
    let h = harness(
        2,
        vec![vec![match_record("m1", 10), broken_record("m-bad"), match_record("m2", 9)]],
    );

    let matches = history(&h, None).to_vec().await.unwrap();
    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"], "the other records of the page still come through");
}

#[tokio::test]
async fn records_within_a_page_are_reordered_newest_first() {
    // The API does not order rows inside a page.
    let h = harness(
        3,
        vec![vec![match_record("m1", 3), match_record("m2", 7), match_record("m3", 5)]],
    );

    let matches = history(&h, None).to_vec().await.unwrap();
    let game_ids: Vec<u64> = matches.iter().map(|m| m.game_id).collect();
    assert_eq!(game_ids, [7, 5, 3]);
}

#[tokio::test]
async fn a_player_without_a_ranking_has_nothing_to_reconcile() {
    let h = harness(0, vec![]);
    let err = history(&h, None).next().await.unwrap_err();
    assert!(matches!(err, ApiError::EntityNotFound(_)));
    assert_eq!(h.history_calls.load(Ordering::SeqCst), 0, "no history page was requested");
}

#[tokio::test]
async fn nothing_is_fetched_until_the_first_pull() {
    let h = harness(5, vec![vec![match_record("m1", 1)]]);
    let _history = history(&h, None);
    assert_eq!(h.rank_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.history_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn an_empty_toon_fails_before_any_network_call() {
    let h = harness(5, vec![]);
    let err = h
        .gb
        .match_history("", GatewayLookup::Id(30), LeaderboardLookup::default(), None)
        .next()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(h.rank_calls.load(Ordering::SeqCst), 0);
}
