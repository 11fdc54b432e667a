use crate::api::wire;
use crate::errors::ApiError;
use crate::models::{AccountRankings, Ranking};
use crate::types::{GatewayId, LeaderboardId, Tier};
use serde_json::Value;

/// The ranking table's column layout. Validated on every page; a drift here
/// means every cell read below it would be silently wrong.
const COLUMNS: [&str; 13] = [
    "rank",
    "last_rank",
    "gateway_id",
    "points",
    "wins",
    "losses",
    "disconnects",
    "toon",
    "battletag",
    "avatar",
    "feature_stat",
    "rating",
    "bucket",
];

const RANK: usize = 0;
const LAST_RANK: usize = 1;
const GATEWAY_ID: usize = 2;
const WINS: usize = 4;
const LOSSES: usize = 5;
const DISCONNECTS: usize = 6;
const TOON: usize = 7;
const BATTLETAG: usize = 8;
const AVATAR: usize = 9;
const FEATURE_STAT: usize = 10;
const RATING: usize = 11;
const BUCKET: usize = 12;

fn cell_u64(row: &[Value], index: usize) -> Result<u64, ApiError> {
    row.get(index).and_then(Value::as_u64).ok_or_else(|| {
        ApiError::UnexpectedResponse(format!(
            "ranking row: column {} is not an unsigned integer: {:?}",
            COLUMNS[index],
            row.get(index)
        ))
    })
}

fn cell_i64(row: &[Value], index: usize) -> Result<i64, ApiError> {
    row.get(index).and_then(Value::as_i64).ok_or_else(|| {
        ApiError::UnexpectedResponse(format!(
            "ranking row: column {} is not an integer: {:?}",
            COLUMNS[index],
            row.get(index)
        ))
    })
}

fn cell_str<'a>(row: &'a [Value], index: usize) -> Result<&'a str, ApiError> {
    row.get(index).and_then(Value::as_str).ok_or_else(|| {
        ApiError::UnexpectedResponse(format!(
            "ranking row: column {} is not a string: {:?}",
            COLUMNS[index],
            row.get(index)
        ))
    })
}

/// Decodes one ranking page, validating the column layout first.
pub fn rankings_from_entity(
    leaderboard_id: LeaderboardId,
    response: &wire::LeaderboardEntityResponse,
) -> Result<Vec<Ranking>, ApiError> {
    if !response.columns.iter().map(String::as_str).eq(COLUMNS) {
        return Err(ApiError::UnexpectedResponse(format!(
            "unexpected leaderboard ranking columns: {:?}",
            response.columns
        )));
    }

    response
        .rows
        .iter()
        .map(|row| {
            if row.len() != COLUMNS.len() {
                return Err(ApiError::UnexpectedResponse(format!(
                    "ranking row has {} cells, expected {}",
                    row.len(),
                    COLUMNS.len()
                )));
            }
            Ok(Ranking {
                leaderboard_id,
                rank: cell_u64(row, RANK)? as u32,
                last_rank: cell_u64(row, LAST_RANK)? as u32,
                gateway_id: cell_u64(row, GATEWAY_ID)? as GatewayId,
                wins: cell_u64(row, WINS)? as u32,
                losses: cell_u64(row, LOSSES)? as u32,
                disconnects: cell_u64(row, DISCONNECTS)? as u32,
                toon: cell_str(row, TOON)?.to_string(),
                battletag: cell_str(row, BATTLETAG)?.to_string(),
                avatar: cell_str(row, AVATAR)?.to_string(),
                feature_race: cell_str(row, FEATURE_STAT)?.to_string(),
                rating: cell_i64(row, RATING)?,
                tier: Tier::from_bucket(cell_u64(row, BUCKET)?)?,
            })
        })
        .collect()
}

/// Maps one account toon from the rank-by-toon lookup. That endpoint has no
/// rating column; points stand in for it, as they do upstream.
pub fn ranking_from_ranked_toon(
    leaderboard_id: LeaderboardId,
    toon: &wire::RankedToon,
) -> Result<Ranking, ApiError> {
    Ok(Ranking {
        leaderboard_id,
        rank: toon.rank,
        last_rank: toon.last_rank,
        gateway_id: toon.gateway_id,
        wins: toon.wins,
        losses: toon.losses,
        disconnects: toon.disconnects,
        toon: toon.name.clone(),
        battletag: toon.battletag.clone(),
        avatar: toon.avatar.clone(),
        feature_race: toon.feature_stat.clone(),
        rating: toon.points,
        tier: Tier::from_bucket(toon.bucket)?,
    })
}

/// `None` when the response is the API's "no such account" shape.
pub fn account_rankings_from_response(
    response: &wire::RankByToonResponse,
    requested_toon: &str,
    requested_gateway_id: GatewayId,
) -> Result<Option<AccountRankings>, ApiError> {
    if response.aurora_id == 0 || response.toons.is_empty() {
        return Ok(None);
    }

    let rankings = response
        .toons
        .iter()
        .map(|t| ranking_from_ranked_toon(response.leaderboard_id, t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(AccountRankings::new(
        response.aurora_id,
        response.leaderboard_id,
        rankings,
        requested_toon.to_string(),
        requested_gateway_id,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with_columns(columns: Vec<&str>) -> wire::LeaderboardEntityResponse {
        wire::LeaderboardEntityResponse {
            columns: columns.into_iter().map(String::from).collect(),
            rows: vec![],
        }
    }

    fn row() -> Vec<Value> {
        vec![
            json!(1),
            json!(2),
            json!(30),
            json!(2600),
            json!(100),
            json!(40),
            json!(3),
            json!("dex9"),
            json!("dex#1234"),
            json!("avatar.jpg"),
            json!("terran"),
            json!(2600),
            json!(7),
        ]
    }

    #[test]
    fn column_drift_is_rejected() {
        let mut cols: Vec<&str> = COLUMNS.to_vec();
        cols.swap(0, 1);
        let err = rankings_from_entity(5, &page_with_columns(cols)).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse(_)));
    }

    #[test]
    fn rows_decode_into_rankings() {
        let mut page = page_with_columns(COLUMNS.to_vec());
        page.rows.push(row());
        let rankings = rankings_from_entity(5, &page).unwrap();
        assert_eq!(rankings.len(), 1);
        let r = &rankings[0];
        assert_eq!(r.rank, 1);
        assert_eq!(r.toon, "dex9");
        assert_eq!(r.tier, Tier::S);
        assert_eq!(r.total_games_played(), 143);
    }

    #[test]
    fn short_row_is_rejected() {
        let mut page = page_with_columns(COLUMNS.to_vec());
        let mut r = row();
        r.pop();
        page.rows.push(r);
        assert!(rankings_from_entity(5, &page).is_err());
    }

    #[test]
    fn zero_aurora_id_means_not_found() {
        let response =
            wire::RankByToonResponse { aurora_id: 0, leaderboard_id: 5, toons: vec![] };
        assert!(account_rankings_from_response(&response, "dex9", 10).unwrap().is_none());
    }
}
