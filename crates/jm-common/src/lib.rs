pub mod api;
pub mod logging;
pub mod matching;
pub mod notifications;
pub mod skill_extractor;
pub mod skill_normalizer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    JobSeeker,
    Recruiter,
    Admin,
}

// Snapshot data models consumed by the matching functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    /// Raw or normalized skill tokens; scorers normalize before comparing.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn new(
        skills_required: impl IntoIterator<Item = impl Into<String>>,
        location: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: String::new(),
            skills_required: skills_required.into_iter().map(Into::into).collect(),
            location: location.into(),
            created_at,
        }
    }
}

impl CandidateProfile {
    pub fn new(
        skills: impl IntoIterator<Item = impl Into<String>>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            location: location.into(),
            ..Self::default()
        }
    }
}
