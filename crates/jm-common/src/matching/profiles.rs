use thiserror::Error;

use super::{
    pipeline::DEFAULT_LIMIT,
    scoring::MatchingConfig,
    skills::SkillAffinityMode,
    weights::{RECOMMENDATION_WEIGHTS, RESUME_WEIGHTS, Weights, WeightsError},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {source}")]
    Weights {
        var: &'static str,
        #[source]
        source: WeightsError,
    },
    #[error("invalid {var}: expected a positive integer, got {value:?}")]
    Limit { var: &'static str, value: String },
}

/// Per-context matching profiles, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingProfiles {
    pub recommendations: MatchingConfig,
    pub resume: MatchingConfig,
    pub default_limit: usize,
}

impl Default for MatchingProfiles {
    fn default() -> Self {
        Self {
            recommendations: MatchingConfig::recommendations(),
            resume: MatchingConfig::resume(),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl MatchingProfiles {
    /// Reads `JM_RECOMMENDATION_WEIGHTS`, `JM_RESUME_WEIGHTS` and
    /// `JM_DEFAULT_LIMIT`. Unset variables keep their defaults; malformed
    /// ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let recommendations = weights_var(
            &lookup,
            "JM_RECOMMENDATION_WEIGHTS",
            RECOMMENDATION_WEIGHTS,
        )?;
        let resume = weights_var(&lookup, "JM_RESUME_WEIGHTS", RESUME_WEIGHTS)?;

        let default_limit = match lookup("JM_DEFAULT_LIMIT") {
            None => DEFAULT_LIMIT,
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::Limit {
                    var: "JM_DEFAULT_LIMIT",
                    value: raw,
                })?,
        };

        Ok(Self {
            recommendations: MatchingConfig::new(SkillAffinityMode::Coverage, recommendations),
            resume: MatchingConfig::new(SkillAffinityMode::Jaccard, resume),
            default_limit,
        })
    }
}

fn weights_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: Weights,
) -> Result<Weights, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|source| ConfigError::Weights { var, source }),
    }
}
