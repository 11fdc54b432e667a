use crate::api::wire;
use crate::errors::ApiError;
use crate::models::MapInfo;
use crate::transform::{epoch_secs, parse_field};

pub fn maps_from_response(response: &wire::MapsResponse) -> Result<Vec<MapInfo>, ApiError> {
    response
        .iter()
        .map(|entry| {
            let a = &entry.attribute;
            Ok(MapInfo {
                description: a.map_description.clone(),
                era: parse_field(&a.map_era, "map_era")?,
                height: parse_field(&a.map_height, "map_height")?,
                width: parse_field(&a.map_width, "map_width")?,
                version: parse_field(&a.map_version, "map_version")?,
                replay_humans: parse_field(&a.replay_humans, "replay_humans")?,
                replay_max_players: parse_field(&a.replay_max_players, "replay_max_players")?,
                replay_min_players: parse_field(&a.replay_min_players, "replay_min_players")?,
                season_id: parse_field(&a.season_id, "season_id")?,
                content_size: entry.content_size,
                content_type: entry.content_type.clone(),
                md5: entry.md5.clone(),
                modified: epoch_secs(entry.modified_epoch, "modified_epoch")?,
                file_name: entry.name.clone(),
                display_name: a.map_name.clone(),
                url: entry.url.clone(),
            })
        })
        .collect()
}
