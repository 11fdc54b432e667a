use crate::api::wire;
use crate::errors::ApiError;
use crate::models::{MapStats, MapStatsTree};
use crate::transform::parse_field;
use crate::types::{GameMode, Race};
use std::collections::HashMap;

fn stats(line: &wire::StatLine) -> MapStats {
    MapStats {
        games: line.total_games,
        wins: line.total_wins,
        global_games: line.total_global_games,
        global_wins: line.total_global_wins,
    }
}

pub fn map_stats_from_response(response: &wire::MapStatsResponse) -> Result<MapStatsTree, ApiError> {
    let mut tree: MapStatsTree = HashMap::new();

    for (mode_key, seasons) in &response.map_stat {
        // New game modes may appear server-side before this client knows
        // them; skip rather than fail the whole profile.
        let game_mode = match mode_key.parse::<u32>().ok().and_then(|id| GameMode::from_id(id).ok())
        {
            Some(mode) => mode,
            None => {
                log::warn!("unknown game mode id in map stats: {mode_key}, skipping");
                continue;
            }
        };

        for (season_key, maps) in seasons {
            let season = parse_field(season_key, "map stats season")?;
            for (map_id, by_race) in maps {
                let races = tree
                    .entry(game_mode)
                    .or_default()
                    .entry(season)
                    .or_default()
                    .entry(map_id.clone())
                    .or_default();
                races.insert(Race::Protoss, stats(&by_race.protoss));
                races.insert(Race::Terran, stats(&by_race.terran));
                races.insert(Race::Zerg, stats(&by_race.zerg));
                races.insert(Race::Random, stats(&by_race.random));
            }
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn line(games: u32, wins: u32) -> wire::StatLine {
        wire::StatLine {
            total_games: games,
            total_wins: wins,
            total_global_games: games * 2,
            total_global_wins: wins * 2,
        }
    }

    #[test]
    fn unknown_game_modes_are_skipped() {
        let race_stats = wire::RaceMapStats {
            protoss: line(10, 6),
            terran: line(0, 0),
            zerg: line(3, 1),
            random: line(0, 0),
        };
        let mut maps = BTreeMap::new();
        maps.insert("abc123".to_string(), race_stats);
        let mut seasons = BTreeMap::new();
        seasons.insert("15".to_string(), maps);
        let mut map_stat = BTreeMap::new();
        map_stat.insert("1".to_string(), seasons.clone());
        map_stat.insert("7".to_string(), seasons);

        let tree = map_stats_from_response(&wire::MapStatsResponse { map_stat }).unwrap();
        assert_eq!(tree.len(), 1);
        let by_race = &tree[&GameMode::OneVsOne][&15]["abc123"];
        assert_eq!(by_race[&Race::Protoss].games, 10);
        assert_eq!(by_race[&Race::Protoss].win_ratio(), Some(0.6));
        assert_eq!(by_race[&Race::Terran].win_ratio(), None);
    }
}
