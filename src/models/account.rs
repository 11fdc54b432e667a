use crate::types::{AuroraId, GatewayId};

/// One in-game identity owned by an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub toon: String,
    pub gateway_id: GatewayId,
    /// Present only under the masks that request weekly activity.
    pub games_last_week: Option<u32>,
    pub avatar_url: Option<String>,
}

/// Profile under the `scr_mmgameloading` mask: the cheapest lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalAccount {
    pub aurora_id: AuroraId,
    pub battle_tag: String,
    pub profiles: Vec<AccountProfile>,
}

/// Profile under the `scr_mmtooninfo` mask: minimal plus weekly game counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalAccountWithGamesPlayedLastWeek {
    pub aurora_id: AuroraId,
    pub battle_tag: String,
    pub profiles: Vec<AccountProfile>,
}

/// Profile under the `scr_tooninfo` mask: everything but game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullAccountMinusGameHistory {
    pub aurora_id: AuroraId,
    pub battle_tag: String,
    pub country_code: Option<String>,
    pub flags: Vec<String>,
    pub profiles: Vec<AccountProfile>,
}

/// Profile under the `scr_profile` mask: the most expensive lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullAccount {
    pub aurora_id: AuroraId,
    pub battle_tag: String,
    pub country_code: Option<String>,
    pub flags: Vec<String>,
    pub profiles: Vec<AccountProfile>,
}
