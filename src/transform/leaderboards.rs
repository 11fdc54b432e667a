use crate::api::wire;
use crate::errors::ApiError;
use crate::models::{Leaderboard, LeaderboardGateway};
use crate::transform::{epoch_secs_str, parse_field};
use crate::types::{GLOBAL_GATEWAY_ID, GameMode};

pub fn leaderboards_from_response(
    response: &wire::LeaderboardResponse,
) -> Result<Vec<Leaderboard>, ApiError> {
    response
        .leaderboards
        .values()
        .map(|entry| {
            // The global leaderboard's gateway is synthetic and absent from
            // the gateway table.
            let gateway = if entry.gateway_id == GLOBAL_GATEWAY_ID {
                LeaderboardGateway {
                    is_official: true,
                    name: "Global".to_string(),
                    region: "global".to_string(),
                    id: GLOBAL_GATEWAY_ID,
                }
            } else {
                let info = response.gateways.get(&entry.gateway_id.to_string()).ok_or_else(|| {
                    ApiError::UnexpectedResponse(format!(
                        "leaderboard {} references unknown gateway {}",
                        entry.id, entry.gateway_id
                    ))
                })?;
                LeaderboardGateway {
                    is_official: info.is_official,
                    name: info.name.clone(),
                    region: info.region.clone(),
                    id: entry.gateway_id,
                }
            };

            let mode = response.gamemodes.get(&entry.gamemode_id.to_string()).ok_or_else(|| {
                ApiError::UnexpectedResponse(format!(
                    "leaderboard {} references unknown game mode {}",
                    entry.id, entry.gamemode_id
                ))
            })?;
            let game_mode = GameMode::from_id(entry.gamemode_id)?;
            if mode.name != game_mode.as_str() {
                return Err(ApiError::UnexpectedResponse(format!(
                    "game mode {} is named {:?}",
                    entry.gamemode_id, mode.name
                )));
            }

            Ok(Leaderboard {
                benefactor_id: parse_field(&entry.benefactor_id, "benefactor_id")?,
                game_mode,
                gateway,
                id: entry.id,
                name: entry.name.clone(),
                last_update_time: epoch_secs_str(&entry.last_update_time, "last_update_time")?,
                next_update_time: epoch_secs_str(&entry.next_update_time, "next_update_time")?,
                program_id: entry.program_id.clone(),
                season_id: entry.season_id,
                season_name: entry.season_name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn response() -> wire::LeaderboardResponse {
        let mut gamemodes = BTreeMap::new();
        gamemodes.insert("1".to_string(), wire::GameModeEntry { name: "1v1".to_string() });
        let mut gateways = BTreeMap::new();
        gateways.insert(
            "30".to_string(),
            wire::LeaderboardGatewayEntry {
                name: "Korea".to_string(),
                region: "kr".to_string(),
                is_official: true,
            },
        );
        let mut leaderboards = BTreeMap::new();
        leaderboards.insert(
            "12960".to_string(),
            wire::LeaderboardEntry {
                benefactor_id: "0".to_string(),
                gamemode_id: 1,
                gateway_id: 30,
                id: 12960,
                name: "Korea".to_string(),
                last_update_time: "1681000000".to_string(),
                next_update_time: "1681000300".to_string(),
                program_id: "S1".to_string(),
                season_id: 15,
                season_name: "2023 Season 1".to_string(),
            },
        );
        wire::LeaderboardResponse {
            gamemodes,
            gateways,
            leaderboards,
            matchmaked_current_season: 15,
        }
    }

    #[test]
    fn decodes_a_leaderboard() {
        let boards = leaderboards_from_response(&response()).unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, 12960);
        assert_eq!(boards[0].gateway.region, "kr");
        assert_eq!(boards[0].season_id, 15);
    }

    #[test]
    fn global_gateway_is_synthesized() {
        let mut r = response();
        let entry = r.leaderboards.get_mut("12960").unwrap();
        entry.gateway_id = 0;
        let boards = leaderboards_from_response(&r).unwrap();
        assert_eq!(boards[0].gateway.name, "Global");
        assert_eq!(boards[0].gateway.region, "global");
    }

    #[test]
    fn unknown_game_mode_is_a_defect() {
        let mut r = response();
        let entry = r.leaderboards.get_mut("12960").unwrap();
        entry.gamemode_id = 3;
        assert!(leaderboards_from_response(&r).is_err());
    }
}
