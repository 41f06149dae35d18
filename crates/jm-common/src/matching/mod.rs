pub mod location;
pub mod pipeline;
pub mod profiles;
pub mod recency;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use pipeline::{RankOptions, RankQuery, rank};
pub use profiles::{ConfigError, MatchingProfiles};
pub use scoring::{ComponentScores, MatchResult, MatchingConfig, ScoringEngine, score_one};
pub use skills::SkillAffinityMode;
pub use weights::{RECOMMENDATION_WEIGHTS, RESUME_WEIGHTS, Weights, WeightsError};
