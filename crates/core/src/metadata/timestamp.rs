//! `created_at` to a sortable epoch.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Format of `created_at`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("expected YYYY-MM-DD")]
    Shape,

    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Unix epoch of midnight UTC on `date` (`YYYY-MM-DD`).
///
/// Only the exact zero-padded form is accepted; `2021-1-1` is rejected.
pub fn epoch_from_date(date: &str) -> Result<i64, TimestampError> {
    if !is_iso_date_shape(date) {
        return Err(TimestampError::Shape);
    }
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)?;
    Ok(day.and_time(NaiveTime::MIN).and_utc().timestamp())
}

/// `dddd-dd-dd`: `NaiveDate` parsing alone tolerates missing padding and
/// leading whitespace.
fn is_iso_date_shape(date: &str) -> bool {
    let b = date.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// Set `timestamp` from `created_at`.
///
/// On parse failure the problem is logged and `timestamp` is left empty.
pub fn parse_timestamp(article: &mut crate::article::Article) {
    match epoch_from_date(&article.created_at) {
        Ok(epoch) => article.timestamp = epoch.to_string(),
        Err(e) => {
            tracing::warn!(
                "Invalid created-at '{}' for post {}: {}",
                article.created_at,
                article.file.path,
                e
            );
            article.timestamp.clear();
        }
    }
}
