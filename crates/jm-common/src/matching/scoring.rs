use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    location::location_score,
    recency::recency_score,
    skills::{SkillAffinityMode, score_skill_sets},
    weights::{RECOMMENDATION_WEIGHTS, RESUME_WEIGHTS, Weights},
};
use crate::{CandidateProfile, JobPosting, skill_normalizer::normalize_skill_set};

/// Skill mode plus weight triple; one value per call site profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    pub mode: SkillAffinityMode,
    pub weights: Weights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self::recommendations()
    }
}

impl MatchingConfig {
    pub const fn new(mode: SkillAffinityMode, weights: Weights) -> Self {
        Self { mode, weights }
    }

    /// Recommendation list and job detail view.
    pub const fn recommendations() -> Self {
        Self::new(SkillAffinityMode::Coverage, RECOMMENDATION_WEIGHTS)
    }

    /// Profile-based recommendations and resume-driven rescoring.
    pub const fn resume() -> Self {
        Self::new(SkillAffinityMode::Jaccard, RESUME_WEIGHTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub skill: f64,
    pub location: f64,
    pub recency: f64,
}

impl ComponentScores {
    /// 総合スコア（加重和）。浮動小数の誤差で範囲外に出ないよう [0, 1] に丸める
    pub fn aggregate(&self, weights: &Weights) -> f64 {
        let total = weights.skill() * self.skill
            + weights.location() * self.location
            + weights.recency() * self.recency;
        total.clamp(0.0, 1.0)
    }
}

/// Score of one job for one candidate. The total is derived from the
/// components at construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    job: &'a JobPosting,
    total_score: f64,
    component_scores: ComponentScores,
    matched_skills: BTreeSet<String>,
}

impl<'a> MatchResult<'a> {
    pub fn new(
        job: &'a JobPosting,
        component_scores: ComponentScores,
        matched_skills: BTreeSet<String>,
        weights: &Weights,
    ) -> Self {
        Self {
            job,
            total_score: component_scores.aggregate(weights),
            component_scores,
            matched_skills,
        }
    }

    pub fn job(&self) -> &'a JobPosting {
        self.job
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn component_scores(&self) -> &ComponentScores {
        &self.component_scores
    }

    pub fn matched_skills(&self) -> &BTreeSet<String> {
        &self.matched_skills
    }
}

/// Candidate fields normalized once and reused across every job of a call.
#[derive(Debug, Clone)]
pub struct PreparedCandidate<'c> {
    skills: BTreeSet<String>,
    location: &'c str,
}

impl<'c> PreparedCandidate<'c> {
    pub fn new(candidate: &'c CandidateProfile) -> Self {
        Self {
            skills: normalize_skill_set(&candidate.skills),
            location: &candidate.location,
        }
    }
}

pub struct ScoringEngine {
    config: MatchingConfig,
}

impl ScoringEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn score<'a>(
        &self,
        candidate: &CandidateProfile,
        job: &'a JobPosting,
        now: DateTime<Utc>,
    ) -> MatchResult<'a> {
        self.score_prepared(&PreparedCandidate::new(candidate), job, now)
    }

    pub fn score_prepared<'a>(
        &self,
        candidate: &PreparedCandidate<'_>,
        job: &'a JobPosting,
        now: DateTime<Utc>,
    ) -> MatchResult<'a> {
        let job_skills = normalize_skill_set(&job.skills_required);
        let skills = score_skill_sets(self.config.mode, &candidate.skills, &job_skills);

        let components = ComponentScores {
            skill: skills.score,
            location: location_score(candidate.location, &job.location),
            recency: recency_score(job.created_at, now),
        };

        MatchResult::new(job, components, skills.matched_skills, &self.config.weights)
    }
}

/// 詳細画面用の単票スコア（Coverage モード固定）
pub fn score_one<'a>(
    candidate: &CandidateProfile,
    job: &'a JobPosting,
    weights: &Weights,
    now: DateTime<Utc>,
) -> MatchResult<'a> {
    ScoringEngine::new(MatchingConfig::new(SkillAffinityMode::Coverage, *weights))
        .score(candidate, job, now)
}
