use crate::types::{AuroraId, GatewayId, LeaderboardId, Tier};

/// A player's position and record within one leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub leaderboard_id: LeaderboardId,
    pub rank: u32,
    pub last_rank: u32,
    pub gateway_id: GatewayId,
    pub wins: u32,
    pub losses: u32,
    pub disconnects: u32,
    pub toon: String,
    pub battletag: String,
    pub avatar: String,
    /// Raw feature_stat value from the API ("terran", "protoss", "zerg").
    pub feature_race: String,
    pub rating: i64,
    pub tier: Tier,
}

impl Ranking {
    /// Disconnects count as played games; this total is the oracle the match
    /// history reconciler pages against.
    #[must_use]
    pub fn total_games_played(&self) -> u32 {
        self.wins + self.losses + self.disconnects
    }
}

/// The rank lookup returns every toon on the owning account, not just the
/// requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRankings {
    pub aurora_id: AuroraId,
    pub leaderboard_id: LeaderboardId,
    pub rankings: Vec<Ranking>,
    requested_toon: String,
    requested_gateway_id: GatewayId,
}

impl AccountRankings {
    #[must_use]
    pub fn new(
        aurora_id: AuroraId,
        leaderboard_id: LeaderboardId,
        rankings: Vec<Ranking>,
        requested_toon: String,
        requested_gateway_id: GatewayId,
    ) -> Self {
        Self { aurora_id, leaderboard_id, rankings, requested_toon, requested_gateway_id }
    }

    /// The ranking for the originally requested toon/gateway combination.
    /// `None` when the player is unranked on that combination even though
    /// the account has rankings elsewhere.
    #[must_use]
    pub fn requested_ranking(&self) -> Option<&Ranking> {
        self.rankings.iter().find(|r| {
            r.toon == self.requested_toon && r.gateway_id == self.requested_gateway_id
        })
    }
}
