//! Transport seam for the ladder web API.
//!
//! A `Connection` performs the literal network call and credential
//! attachment and returns the body as text, status aside. Response
//! interpretation happens above this layer, which is what lets the resilient
//! wrapper recognize false-error bodies that arrive with a 200 or 400.

pub mod http;
pub mod resilient;

pub use http::HttpConnection;
pub use resilient::{MAX_ATTEMPTS, ResilientConnection, is_transient_body, with_retry};

use crate::errors::ApiError;
use crate::types::{GatewayId, LeaderboardId, ProfileFieldMask, SeasonNumber};
use async_trait::async_trait;
use std::fmt;
use urlencoding::encode;

#[async_trait]
pub trait Connection: Send + Sync {
    async fn fetch(&self, path: &ApiPath) -> Result<String, ApiError>;
}

/// One variant per upstream endpoint; renders to the request path + query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPath {
    Gateway,
    ClassicFilesGlobalMaps1v1,
    Leaderboard,
    LeaderboardEntity {
        leaderboard_id: LeaderboardId,
        offset: u64,
        length: u64,
    },
    LeaderboardNameSearch {
        leaderboard_id: LeaderboardId,
        search: String,
    },
    LeaderboardRankByToon {
        leaderboard_id: LeaderboardId,
        toon: String,
        gateway: GatewayId,
    },
    MapStatsByToon {
        toon: String,
        gateway: GatewayId,
    },
    MatchMakerGameInfoByToon {
        toon: String,
        gateway: GatewayId,
        game_mode_id: u32,
        season: SeasonNumber,
        offset: u64,
        limit: u64,
    },
    MatchMakerGameInfoPlayerInfo {
        match_id: String,
    },
    AuroraProfileByToon {
        toon: String,
        gateway: GatewayId,
        mask: ProfileFieldMask,
    },
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiPath::Gateway => write!(f, "web-api/v1/gateway"),
            ApiPath::ClassicFilesGlobalMaps1v1 => {
                write!(f, "web-api/v1/file-set/classic.files.global.maps-1v1")
            }
            ApiPath::Leaderboard => write!(f, "web-api/v1/leaderboard"),
            ApiPath::LeaderboardEntity { leaderboard_id, offset, length } => {
                write!(f, "web-api/v1/leaderboard/{leaderboard_id}?offset={offset}&length={length}")
            }
            ApiPath::LeaderboardNameSearch { leaderboard_id, search } => write!(
                f,
                "web-api/v1/leaderboard-name-search/{leaderboard_id}/{}",
                encode(search)
            ),
            ApiPath::LeaderboardRankByToon { leaderboard_id, toon, gateway } => write!(
                f,
                "web-api/v1/leaderboard-rank-by-toon/{leaderboard_id}/{}/{gateway}",
                encode(toon)
            ),
            ApiPath::MapStatsByToon { toon, gateway } => {
                write!(f, "web-api/v1/map-stats-by-toon/{}/{gateway}", encode(toon))
            }
            ApiPath::MatchMakerGameInfoByToon {
                toon,
                gateway,
                game_mode_id,
                season,
                offset,
                limit,
            } => write!(
                f,
                "web-api/v1/matchmaker-gameinfo-by-toon/{}/{gateway}/{game_mode_id}/{season}?offset={offset}&limit={limit}",
                encode(toon)
            ),
            ApiPath::MatchMakerGameInfoPlayerInfo { match_id } => {
                write!(f, "web-api/v1/matchmaker-gameinfo-playerinfo/{}", encode(match_id))
            }
            ApiPath::AuroraProfileByToon { toon, gateway, mask } => write!(
                f,
                "web-api/v2/aurora-profile-by-toon/{}/{gateway}?request_flags={}",
                encode(toon),
                mask.as_str()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_render_with_arguments() {
        let p = ApiPath::LeaderboardEntity { leaderboard_id: 12941, offset: 100, length: 100 };
        assert_eq!(p.to_string(), "web-api/v1/leaderboard/12941?offset=100&length=100");
    }

    #[test]
    fn toons_are_url_encoded() {
        let p = ApiPath::MapStatsByToon { toon: "By.Sun]".to_string(), gateway: 30 };
        assert_eq!(p.to_string(), "web-api/v1/map-stats-by-toon/By.Sun%5D/30");
    }

    #[test]
    fn profile_path_carries_the_mask() {
        let p = ApiPath::AuroraProfileByToon {
            toon: "dex9".to_string(),
            gateway: 10,
            mask: ProfileFieldMask::ScrProfile,
        };
        assert_eq!(
            p.to_string(),
            "web-api/v2/aurora-profile-by-toon/dex9/10?request_flags=scr_profile"
        );
    }
}
