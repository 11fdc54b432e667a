use crate::types::{GameResult, GameSpeed, GatewayId, MapTileset, Race, Tier};
use chrono::{DateTime, Utc};

/// Ladder point movement for one player in one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPoints {
    pub previous: i64,
    pub delta: i64,
    pub previous_tier: Tier,
    pub new_tier: Tier,
    pub win_streak: i64,
}

/// Extra profile data for a match participant; present only when the API
/// returned a player record alongside the game result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlayerProfileInfo {
    pub aurora_id: u64,
    pub avatar_url: String,
    pub gateway_id: GatewayId,
    pub battle_tag: Option<String>,
    pub region: Option<String>,
    pub points: MatchPoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlayer {
    pub player_index: u32,
    pub race: Race,
    pub toon: String,
    pub team: u32,
    pub is_computer: bool,
    pub result: GameResult,
    pub profile_info: Option<MatchPlayerProfileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMap {
    pub crc: u64,
    pub file_name: String,
    pub file_size: u64,
    pub height: u32,
    pub width: u32,
    pub md5: String,
    pub display_name: String,
    pub tile_set: MapTileset,
}

/// One completed 1v1 ladder game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Stable identity; the basis for cross-page deduplication.
    pub id: String,
    /// Monotonic game sequence number, unlike the opaque match id. Pages are
    /// sorted by this, descending, before matches are yielded.
    pub game_id: u64,
    pub timestamp: Option<DateTime<Utc>>,
    pub closed_slots: u32,
    pub flags: String,
    pub game_speed: GameSpeed,
    pub host_name: String,
    pub net_turn_rate: u32,
    pub map: MatchMap,
    pub name: String,
    pub players: Vec<MatchPlayer>,
    requested_toon: String,
    requested_gateway_id: GatewayId,
}

impl Match {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: String,
        game_id: u64,
        timestamp: Option<DateTime<Utc>>,
        closed_slots: u32,
        flags: String,
        game_speed: GameSpeed,
        host_name: String,
        net_turn_rate: u32,
        map: MatchMap,
        name: String,
        players: Vec<MatchPlayer>,
        requested_toon: String,
        requested_gateway_id: GatewayId,
    ) -> Self {
        Self {
            id,
            game_id,
            timestamp,
            closed_slots,
            flags,
            game_speed,
            host_name,
            net_turn_rate,
            map,
            name,
            players,
            requested_toon,
            requested_gateway_id,
        }
    }

    /// The participant this history was requested for. Matched by toon and
    /// gateway when the gateway is known; by toon alone when it is absent
    /// and unambiguous.
    #[must_use]
    pub fn this_player(&self) -> Option<&MatchPlayer> {
        let exact = self.players.iter().find(|p| {
            p.toon == self.requested_toon
                && p.profile_info.as_ref().is_some_and(|i| i.gateway_id == self.requested_gateway_id)
        });
        if exact.is_some() {
            return exact;
        }

        let by_toon: Vec<&MatchPlayer> =
            self.players.iter().filter(|p| p.toon == self.requested_toon).collect();
        if by_toon.len() == 1 {
            return Some(by_toon[0]);
        }

        log::error!(
            "could not identify player {} (gateway {}) in match {}",
            self.requested_toon,
            self.requested_gateway_id,
            self.id
        );
        None
    }

    /// The other participant of a 1v1.
    #[must_use]
    pub fn opponent(&self) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| {
            p.toon != self.requested_toon
                || p.profile_info
                    .as_ref()
                    .is_some_and(|i| i.gateway_id != self.requested_gateway_id)
        })
    }
}
