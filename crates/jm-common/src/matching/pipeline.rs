use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::scoring::{MatchResult, MatchingConfig, PreparedCandidate, ScoringEngine};
use crate::{CandidateProfile, JobPosting};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_MIN_SCORE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    pub config: MatchingConfig,
    pub min_score: f64,
    pub limit: usize,
    pub now: DateTime<Utc>,
}

impl RankOptions {
    pub fn new(config: MatchingConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            min_score: DEFAULT_MIN_SCORE,
            limit: DEFAULT_LIMIT,
            now,
        }
    }

    /// Negative or non-finite thresholds fall back to the default.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = if min_score.is_finite() && min_score >= 0.0 {
            min_score
        } else {
            DEFAULT_MIN_SCORE
        };
        self
    }

    /// A zero limit falls back to the default.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        self
    }
}

/// クエリ文字列 (`?limit=5&minScore=0.4`) の生値。
///
/// 不正な値や重複キーでリクエストを落とさず、既定値へフォールバックする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct RankQuery {
    pub limit: Option<String>,
    pub min_score: Option<String>,
}

impl From<Vec<(String, String)>> for RankQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl RankQuery {
    /// Repeated keys keep their first value. `min_score` and `minScore` name
    /// the same key; anything else is ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "limit" => &mut query.limit,
                "min_score" | "minScore" => &mut query.min_score,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// `limit` reads the leading integer like a browser `parseInt`, so
    /// `"1.5"` is 1 and `"12abc"` is 12.
    pub fn limit_or(&self, default: usize) -> usize {
        match self.limit.as_deref().map(str::trim) {
            None | Some("") => default,
            Some(raw) => match leading_integer(raw) {
                Some(value) if value > 0 => usize::try_from(value).unwrap_or(default),
                _ => {
                    debug!(raw, default, "invalid limit; using default");
                    default
                }
            },
        }
    }

    pub fn min_score_or(&self, default: f64) -> f64 {
        match self.min_score.as_deref().map(str::trim) {
            None | Some("") => default,
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => value,
                _ => {
                    debug!(raw, default, "invalid minScore; using default");
                    default
                }
            },
        }
    }

    pub fn apply(&self, options: RankOptions, default_limit: usize) -> RankOptions {
        options
            .with_limit(self.limit_or(default_limit))
            .with_min_score(self.min_score_or(DEFAULT_MIN_SCORE))
    }
}

// 符号 + 数字の先頭部分だけを読む
fn leading_integer(raw: &str) -> Option<i64> {
    let digits_start = usize::from(raw.starts_with(['+', '-']));
    let digits_end = raw[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw.len(), |idx| digits_start + idx);
    raw[..digits_end].parse().ok()
}

/// 全求人をスコアリングし、`min_score` 未満を除外、総合スコア降順に並べて
/// 先頭 `limit` 件を返す。
///
/// 同点は掲載日が新しい方を優先し、それも同じなら入力順を保つ。
pub fn rank<'a>(
    candidate: &CandidateProfile,
    jobs: &'a [JobPosting],
    options: &RankOptions,
) -> Vec<MatchResult<'a>> {
    let engine = ScoringEngine::new(options.config);
    let prepared = PreparedCandidate::new(candidate);

    let mut ranked: Vec<_> = jobs
        .iter()
        .map(|job| engine.score_prepared(&prepared, job, options.now))
        .filter(|result| result.total_score() >= options.min_score)
        .collect();

    let qualifying = ranked.len();
    ranked.sort_by(compare_ranked);
    ranked.truncate(options.limit);

    debug!(
        job_count = jobs.len(),
        qualifying,
        returned = ranked.len(),
        min_score = options.min_score,
        limit = options.limit,
        mode = ?options.config.mode,
        "ranked jobs"
    );

    ranked
}

fn compare_ranked(a: &MatchResult<'_>, b: &MatchResult<'_>) -> Ordering {
    b.total_score()
        .total_cmp(&a.total_score())
        .then_with(|| b.job().created_at.cmp(&a.job().created_at))
}
