use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{CandidateProfile, JobPosting};

/// Ranking request: the caller supplies the candidate and the job snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    /// Evaluation time; defaults to the time the request is handled.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreJobRequest {
    pub candidate: CandidateProfile,
    pub job: JobPosting,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Resume rescoring: `resume_text` is already extracted from the upload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeRecommendationRequest {
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationFanoutRequest {
    pub job: JobPosting,
    #[serde(default)]
    pub candidates: Vec<CandidateProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    pub user_id: String,
    pub connection_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserRole;

    #[test]
    fn parses_minimal_recommendation_request() {
        let request: RecommendationRequest = serde_json::from_value(serde_json::json!({
            "candidate": { "skills": ["Python"], "location": "Pune" },
            "jobs": [
                { "skills_required": ["python"], "created_at": "2024-06-01T00:00:00Z" }
            ]
        }))
        .unwrap();

        assert_eq!(request.candidate.role, UserRole::JobSeeker);
        assert_eq!(request.jobs.len(), 1);
        assert!(request.jobs[0].location.is_empty());
        assert!(request.now.is_none());
    }
}
