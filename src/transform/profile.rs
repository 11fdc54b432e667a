//! Per-mask mapping of the profile-by-toon response.
//!
//! Each field mask selects a different response shape, so each gets its own
//! mapping function into its own account type. All four agree on the
//! not-found shape: a zero aurora id or an empty toon set.

use crate::api::wire;
use crate::models::{
    AccountProfile, FullAccount, FullAccountMinusGameHistory, MinimalAccount,
    MinimalAccountWithGamesPlayedLastWeek,
};

fn is_not_found(response: &wire::ProfileResponse) -> bool {
    response.aurora_id == 0 || response.toons.is_empty()
}

fn profiles(response: &wire::ProfileResponse) -> Vec<AccountProfile> {
    response
        .toons
        .iter()
        .map(|t| AccountProfile {
            toon: t.name.clone(),
            gateway_id: t.gateway_id,
            games_last_week: t.games_last_week,
            avatar_url: t.avatar_url.clone(),
        })
        .collect()
}

pub fn minimal_account_from_response(response: &wire::ProfileResponse) -> Option<MinimalAccount> {
    if is_not_found(response) {
        return None;
    }
    Some(MinimalAccount {
        aurora_id: response.aurora_id,
        battle_tag: response.battle_tag.clone(),
        profiles: profiles(response),
    })
}

pub fn minimal_account_with_week_from_response(
    response: &wire::ProfileResponse,
) -> Option<MinimalAccountWithGamesPlayedLastWeek> {
    if is_not_found(response) {
        return None;
    }
    Some(MinimalAccountWithGamesPlayedLastWeek {
        aurora_id: response.aurora_id,
        battle_tag: response.battle_tag.clone(),
        profiles: profiles(response),
    })
}

pub fn full_account_minus_history_from_response(
    response: &wire::ProfileResponse,
) -> Option<FullAccountMinusGameHistory> {
    if is_not_found(response) {
        return None;
    }
    Some(FullAccountMinusGameHistory {
        aurora_id: response.aurora_id,
        battle_tag: response.battle_tag.clone(),
        country_code: response.country_code.clone(),
        flags: response.flags.clone(),
        profiles: profiles(response),
    })
}

pub fn full_account_from_response(response: &wire::ProfileResponse) -> Option<FullAccount> {
    if is_not_found(response) {
        return None;
    }
    Some(FullAccount {
        aurora_id: response.aurora_id,
        battle_tag: response.battle_tag.clone(),
        country_code: response.country_code.clone(),
        flags: response.flags.clone(),
        profiles: profiles(response),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found() -> wire::ProfileResponse {
        wire::ProfileResponse {
            aurora_id: 99,
            battle_tag: "dex#1234".to_string(),
            country_code: Some("KR".to_string()),
            flags: vec![],
            toons: vec![wire::ProfileToonEntry {
                name: "dex9".to_string(),
                gateway_id: 30,
                games_last_week: Some(12),
                avatar_url: None,
            }],
        }
    }

    #[test]
    fn zero_aurora_id_is_not_found() {
        let mut r = found();
        r.aurora_id = 0;
        assert!(minimal_account_from_response(&r).is_none());
        assert!(full_account_from_response(&r).is_none());
    }

    #[test]
    fn empty_toons_is_not_found() {
        let mut r = found();
        r.toons.clear();
        assert!(minimal_account_with_week_from_response(&r).is_none());
    }

    #[test]
    fn full_account_keeps_country_and_profiles() {
        let account = full_account_from_response(&found()).unwrap();
        assert_eq!(account.country_code.as_deref(), Some("KR"));
        assert_eq!(account.profiles.len(), 1);
        assert_eq!(account.profiles[0].games_last_week, Some(12));
    }
}
