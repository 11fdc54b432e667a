use crate::api::wire;
use crate::models::PlayerSearchResult;

pub fn search_results_from_response(response: &wire::NameSearchResponse) -> Vec<PlayerSearchResult> {
    response
        .iter()
        .map(|entry| PlayerSearchResult {
            avatar: entry.avatar.clone(),
            battletag: entry.battletag.clone(),
            gateway_id: entry.gateway_id,
            last_rank: entry.last_rank,
            name: entry.name.clone(),
            points: entry.points,
            rank: entry.rank,
        })
        .collect()
}
