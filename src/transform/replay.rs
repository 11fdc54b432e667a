use crate::api::wire;
use crate::errors::ApiError;
use crate::models::{Replay, Replays};
use crate::transform::epoch_secs;

/// Replay slots without a url are players who never uploaded; they are
/// dropped rather than reported.
pub fn replays_from_response(response: &wire::MatchPlayerInfoResponse) -> Result<Replays, ApiError> {
    let mut replays = Vec::new();
    for entry in &response.replays {
        let (Some(url), Some(create_time)) = (&entry.url, entry.create_time) else {
            continue;
        };
        replays.push(Replay {
            url: url.clone(),
            timestamp: epoch_secs(create_time, "replay create_time")?,
        });
    }
    Ok(Replays { replays })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_without_urls_are_dropped() {
        let response = wire::MatchPlayerInfoResponse {
            replays: vec![
                wire::ReplayEntry { url: None, create_time: None },
                wire::ReplayEntry {
                    url: Some("https://example.com/a.rep".to_string()),
                    create_time: Some(1_681_000_000),
                },
            ],
        };
        let replays = replays_from_response(&response).unwrap();
        assert_eq!(replays.replays.len(), 1);
        assert!(replays.any().is_some());
        assert_eq!(replays.last_uploaded().unwrap().url, "https://example.com/a.rep");
    }
}
