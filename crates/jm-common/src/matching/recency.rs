use chrono::{DateTime, Utc};

/// Postings older than this many days carry no recency credit.
pub const RECENCY_WINDOW_DAYS: f64 = 30.0;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// 掲載直後 1.0 から 30 日で 0.0 まで線形に減衰する。
/// 未来日付の求人は経過 0 日として扱う
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = ((now - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY).max(0.0);
    (1.0 - age_days / RECENCY_WINDOW_DAYS).max(0.0)
}
