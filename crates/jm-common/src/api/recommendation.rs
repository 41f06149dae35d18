use serde::{Deserialize, Serialize};

use crate::{JobPosting, matching::MatchResult};

/// Two-decimal rounding used by list responses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole-number percentage used by the job detail view.
pub fn percent(value: f64) -> u32 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub skill_score: f64,
    pub loc_score: f64,
    pub rec_score: f64,
    pub matched_skills: Vec<String>,
}

/// One entry of a recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job: JobPosting,
    /// Total score in [0, 1], rounded to two decimals.
    pub score: f64,
    pub components: ScoreComponents,
}

impl From<&MatchResult<'_>> for Recommendation {
    fn from(result: &MatchResult<'_>) -> Self {
        let components = result.component_scores();
        Self {
            job: result.job().clone(),
            score: round2(result.total_score()),
            components: ScoreComponents {
                skill_score: round2(components.skill),
                loc_score: round2(components.location),
                rec_score: round2(components.recency),
                matched_skills: result.matched_skills().iter().cloned().collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub count: usize,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationsResponse {
    pub fn from_results(results: &[MatchResult<'_>]) -> Self {
        let recommendations: Vec<_> = results.iter().map(Recommendation::from).collect();
        Self {
            count: recommendations.len(),
            recommendations,
        }
    }
}

/// Detail-view score, every field a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total_score: u32,
    pub skill_score: u32,
    pub loc_score: u32,
    pub rec_score: u32,
}

impl From<&MatchResult<'_>> for MatchScore {
    fn from(result: &MatchResult<'_>) -> Self {
        let components = result.component_scores();
        Self {
            total_score: percent(result.total_score()),
            skill_score: percent(components.skill),
            loc_score: percent(components.location),
            rec_score: percent(components.recency),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecommendationsResponse {
    pub extracted_skills: Vec<String>,
    pub updated_skills: Vec<String>,
    pub count: usize,
    pub recommendations: Vec<Recommendation>,
}
