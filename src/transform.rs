//! Response-shape to domain-object mapping.
//!
//! One module per response family. Structural violations surface as
//! `UnexpectedResponse` carrying the offending value; the only swallowed
//! failure class is the match history reconciler's known single-record
//! anomalies, and that swallowing happens in `match_history`, nowhere else.

pub mod leaderboards;
pub mod map_stats;
pub mod maps;
pub mod match_history;
pub mod profile;
pub mod rankings;
pub mod replay;
pub mod search;

use crate::errors::ApiError;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Parses one of the API's stringly-typed numeric fields.
pub(crate) fn parse_field<T: FromStr>(value: &str, field: &str) -> Result<T, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::UnexpectedResponse(format!("{field}: cannot parse {value:?}")))
}

pub(crate) fn epoch_secs(secs: i64, field: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("{field}: timestamp out of range: {secs}")))
}

pub(crate) fn epoch_secs_str(value: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    epoch_secs(parse_field(value, field)?, field)
}
