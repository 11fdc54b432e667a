//! Match history page decoding.
//!
//! The page format is hostile: every match is an object with a single
//! dynamic key (the match id), players are single-key objects too, and the
//! per-player detail lives in a `game_result` object keyed by toon name with
//! no reliable link back to the player records. Two anomalies are known to
//! occur in otherwise healthy pages and are skipped at record granularity by
//! the caller: a match with no usable `game_info`, and a match with no
//! `game_result` on either player. Everything else unexpected aborts the
//! page.

use crate::errors::ApiError;
use crate::models::{Match, MatchMap, MatchPlayer, MatchPlayerProfileInfo, MatchPoints};
use crate::transform::parse_field;
use crate::types::{GameResult, GameSpeed, GatewayId, MapTileset, Race, Tier};
use chrono::DateTime;
use serde_json::{Map, Value};

fn unexpected(context: &str, value: &Value) -> ApiError {
    let head: String = value.to_string().chars().take(120).collect();
    ApiError::UnexpectedResponse(format!("{context}: {head}"))
}

fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>, ApiError> {
    value.as_object().ok_or_else(|| unexpected(context, value))
}

/// Unwraps the `{ "<dynamic key>": value }` envelopes this endpoint loves.
fn single_entry<'a>(
    value: &'a Value,
    context: &str,
) -> Result<(&'a str, &'a Value), ApiError> {
    let object = as_object(value, context)?;
    if object.len() != 1 {
        return Err(ApiError::UnexpectedResponse(format!(
            "{context}: expected exactly one key, found {}",
            object.len()
        )));
    }
    object
        .iter()
        .next()
        .map(|(k, v)| (k.as_str(), v))
        .ok_or_else(|| unexpected(context, value))
}

fn str_field<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<&'a str, ApiError> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("{context}: missing string {key}")))
}

fn u64_field(object: &Map<String, Value>, key: &str, context: &str) -> Result<u64, ApiError> {
    object
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("{context}: missing integer {key}")))
}

fn i64_field(object: &Map<String, Value>, key: &str, context: &str) -> Result<i64, ApiError> {
    object
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("{context}: missing integer {key}")))
}

/// Decodes a page. Records failing with a known-unreconcilable anomaly are
/// skipped here, with a warning; any other failure aborts the page.
pub fn matches_from_response(
    requested_toon: &str,
    requested_gateway_id: GatewayId,
    response: &[Value],
) -> Result<Vec<Match>, ApiError> {
    let mut matches = Vec::new();

    for record in response {
        let (match_id, info) = single_entry(record, "match record")?;
        match match_from_record(requested_toon, requested_gateway_id, match_id, info) {
            Ok(Some(m)) => matches.push(m),
            Ok(None) => {} // not a 1v1, skipped with a warning already logged
            Err(ApiError::UnreconcilableRecord(reason)) => {
                log::warn!("known data issue in match {match_id}, skipping: {reason}");
            }
            Err(e) => {
                log::error!("failed to decode match {match_id}: {e}");
                return Err(e);
            }
        }
    }

    Ok(matches)
}

/// `Ok(None)` means a decodable but non-1v1 match; the ladder has none
/// today, so tolerate-and-skip beats breaking when they appear.
fn match_from_record(
    requested_toon: &str,
    requested_gateway_id: GatewayId,
    match_id: &str,
    info: &Value,
) -> Result<Option<Match>, ApiError> {
    let info = as_object(info, "match info")?;
    let players = info
        .get("players")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("match {match_id} has no players")))?;
    if players.is_empty() {
        return Err(ApiError::UnexpectedResponse(format!(
            "match {match_id} has an empty player list"
        )));
    }

    let game_info = game_info_from_players(players)?;
    let attributes = game_info.get("attributes").and_then(Value::as_object).ok_or_else(|| {
        ApiError::UnexpectedResponse(format!("match {match_id}: game_info has no attributes"))
    })?;

    if parse_field::<u64>(str_field(attributes, "players_max", "game_info")?, "players_max")? != 2 {
        log::warn!("match {match_id} is not a 1v1 match, skipping");
        return Ok(None);
    }

    let match_players = players_from_record(players)?;

    // Seconds since epoch as a string; absent or malformed becomes None
    // rather than losing the match.
    let timestamp = info
        .get("match_created")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    let map = MatchMap {
        crc: parse_field(str_field(attributes, "map_crc", "game_info")?, "map_crc")?,
        file_name: str_field(attributes, "map_file_name", "game_info")?.to_string(),
        file_size: parse_field(str_field(attributes, "map_file_size", "game_info")?, "map_file_size")?,
        height: parse_field(str_field(attributes, "map_height", "game_info")?, "map_height")?,
        width: parse_field(str_field(attributes, "map_width", "game_info")?, "map_width")?,
        md5: str_field(attributes, "map_md5", "game_info")?.to_string(),
        display_name: str_field(attributes, "map_name", "game_info")?.to_string(),
        tile_set: MapTileset::from_code(parse_field(
            str_field(attributes, "map_tile_set", "game_info")?,
            "map_tile_set",
        )?)?,
    };

    Ok(Some(Match::new(
        match_id.to_string(),
        parse_field(str_field(attributes, "game_id", "game_info")?, "game_id")?,
        timestamp,
        parse_field(str_field(attributes, "closed_slots", "game_info")?, "closed_slots")?,
        str_field(attributes, "flags", "game_info")?.to_string(),
        GameSpeed::from_code(parse_field(
            str_field(attributes, "game_speed", "game_info")?,
            "game_speed",
        )?),
        str_field(attributes, "host_name", "game_info")?.to_string(),
        parse_field(str_field(attributes, "net_turn_rate", "game_info")?, "net_turn_rate")?,
        map,
        str_field(as_object(game_info, "game_info")?, "name", "game_info")?.to_string(),
        match_players,
        requested_toon.to_string(),
        requested_gateway_id,
    )))
}

/// Game info is duplicated on both players; take whichever is present.
/// Missing on both is the first known-unreconcilable anomaly.
fn game_info_from_players(players: &[Value]) -> Result<&Value, ApiError> {
    for player in players {
        let (_, detail) = single_entry(player, "player record")?;
        if let Some(game_info) = as_object(detail, "player detail")?.get("game_info") {
            if !game_info.is_null() {
                return Ok(game_info);
            }
        }
    }
    Err(ApiError::UnreconcilableRecord("game info is missing".to_string()))
}

fn players_from_record(players: &[Value]) -> Result<Vec<MatchPlayer>, ApiError> {
    if players.len() > 2 {
        return Err(ApiError::UnexpectedResponse(format!(
            "more than two players in a match ({})",
            players.len()
        )));
    }

    let details: Vec<&Map<String, Value>> = players
        .iter()
        .map(|p| single_entry(p, "player record").and_then(|(_, d)| as_object(d, "player detail")))
        .collect::<Result<_, _>>()?;

    // The first defined game_result wins; it is keyed by toon name and
    // carries both players. Missing on both is the second
    // known-unreconcilable anomaly.
    let game_results = details
        .iter()
        .find_map(|d| d.get("game_result").filter(|v| !v.is_null()))
        .ok_or_else(|| ApiError::UnreconcilableRecord("game results are missing".to_string()))?;
    let game_results = as_object(game_results, "game_result")?;

    // An empty key shows up sometimes; drop it before counting.
    let entries: Vec<(&String, &Value)> =
        game_results.iter().filter(|(toon, _)| !toon.is_empty()).collect();
    if entries.len() != 2 {
        return Err(ApiError::UnexpectedResponse(format!(
            "game result has {} keys, expected 2",
            entries.len()
        )));
    }

    // Correlate each game result back to a player record by toon name. Two
    // same-named players cannot coexist in one result object anyway, since
    // JSON keys are unique.
    entries
        .into_iter()
        .map(|(toon, result)| {
            let player = details
                .iter()
                .find(|d| d.get("name").and_then(Value::as_str) == Some(toon.as_str()))
                .copied();
            player_from_game_result(player, toon, result)
        })
        .collect()
}

fn player_from_game_result(
    player: Option<&Map<String, Value>>,
    toon: &str,
    game_result: &Value,
) -> Result<MatchPlayer, ApiError> {
    let game_result = as_object(game_result, "game_result entry")?;
    let attributes = game_result.get("attributes").and_then(Value::as_object).ok_or_else(|| {
        ApiError::UnexpectedResponse("game_result has no attributes".to_string())
    })?;

    let race = Race::parse(str_field(attributes, "race", "game_result")?)?;
    let team = parse_field(str_field(attributes, "team", "game_result")?, "team")?;
    let player_index =
        parse_field(str_field(attributes, "gPlayerData_idx", "game_result")?, "gPlayerData_idx")?;

    let profile_info = player.map(profile_info_from_player).transpose()?;

    Ok(MatchPlayer {
        player_index,
        race,
        toon: toon.to_string(),
        team,
        is_computer: game_result.get("is_computer").and_then(Value::as_bool).unwrap_or(false),
        result: GameResult::parse(str_field(game_result, "result", "game_result")?)?,
        profile_info,
    })
}

fn profile_info_from_player(player: &Map<String, Value>) -> Result<MatchPlayerProfileInfo, ApiError> {
    let score = player
        .get("score")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::UnexpectedResponse("player record has no score".to_string()))?;
    let info_attributes = player.get("info_attributes").and_then(Value::as_object);

    Ok(MatchPlayerProfileInfo {
        aurora_id: u64_field(player, "aurora_id", "player")?,
        avatar_url: str_field(player, "avatar_url", "player")?.to_string(),
        gateway_id: u64_field(player, "gateway_id", "player")? as GatewayId,
        battle_tag: info_attributes
            .and_then(|a| a.get("player_battle_tag"))
            .and_then(Value::as_str)
            .map(String::from),
        region: info_attributes
            .and_then(|a| a.get("player_region"))
            .and_then(Value::as_str)
            .map(String::from),
        points: MatchPoints {
            previous: i64_field(score, "base", "score")?,
            delta: i64_field(score, "delta", "score")?,
            previous_tier: Tier::from_bucket(u64_field(score, "bucket_old", "score")?)?,
            new_tier: Tier::from_bucket(u64_field(score, "bucket_new", "score")?)?,
            win_streak: i64_field(score, "win_streak", "score")?,
        },
    })
}
