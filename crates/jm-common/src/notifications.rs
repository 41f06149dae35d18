//! New-job notification fan-out.
//!
//! Deciding who hears about a freshly posted job is a coarse membership test,
//! separate from relevance ranking: any exact skill overlap plus a location
//! containment check. Live reachability is tracked by [`ConnectionRegistry`].

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::{CandidateProfile, JobPosting, UserRole};

/// Whether `candidate` should be told about `job`.
///
/// Skills compare exactly after trimming (no case folding). The candidate's
/// location must contain the job location case-insensitively; a job without
/// a location matches every candidate.
pub fn should_notify(candidate: &CandidateProfile, job: &JobPosting) -> bool {
    if candidate.role != UserRole::JobSeeker {
        return false;
    }

    let shares_skill = job
        .skills_required
        .iter()
        .map(|skill| skill.trim())
        .filter(|skill| !skill.is_empty())
        .any(|required| {
            candidate
                .skills
                .iter()
                .any(|held| held.trim() == required)
        });

    shares_skill && location_admits(&candidate.location, &job.location)
}

fn location_admits(candidate_location: &str, job_location: &str) -> bool {
    let job = job_location.trim().to_lowercase();
    job.is_empty() || candidate_location.to_lowercase().contains(&job)
}

pub fn job_posted_message(job: &JobPosting) -> String {
    format!("New job \"{}\" matches your skills!", job.title)
}

/// Maps user ids to their live connection id. A user has at most one live
/// connection; reconnecting replaces the previous one.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: DashMap<String, String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the connection id this one replaced, if any.
    pub fn connect(
        &self,
        user_id: impl Into<String>,
        connection_id: impl Into<String>,
    ) -> Option<String> {
        self.connections.insert(user_id.into(), connection_id.into())
    }

    /// Removes whichever user owns `connection_id` and returns that user id.
    pub fn disconnect(&self, connection_id: &str) -> Option<String> {
        let user_id = self
            .connections
            .iter()
            .find(|entry| entry.value() == connection_id)
            .map(|entry| entry.key().clone())?;

        self.connections
            .remove_if(&user_id, |_, current| current == connection_id)
            .map(|(user_id, _)| user_id)
    }

    pub fn connection_for(&self, user_id: &str) -> Option<String> {
        self.connections
            .get(user_id)
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobNotification {
    pub user_id: String,
    pub job_id: Option<String>,
    pub message: String,
    /// Live connection to push to; `None` means inbox-only delivery.
    pub connection_id: Option<String>,
}

/// One notification per eligible candidate with an id, in input order.
pub fn plan_job_notifications(
    job: &JobPosting,
    candidates: &[CandidateProfile],
    registry: &ConnectionRegistry,
) -> Vec<JobNotification> {
    let message = job_posted_message(job);

    let notifications: Vec<_> = candidates
        .iter()
        .filter(|candidate| should_notify(candidate, job))
        .filter_map(|candidate| candidate.id.as_deref())
        .map(|user_id| JobNotification {
            user_id: user_id.to_string(),
            job_id: job.id.clone(),
            message: message.clone(),
            connection_id: registry.connection_for(user_id),
        })
        .collect();

    debug!(
        job_id = job.id.as_deref().unwrap_or(""),
        candidates = candidates.len(),
        notified = notifications.len(),
        live = notifications
            .iter()
            .filter(|n| n.connection_id.is_some())
            .count(),
        "planned job notifications"
    );

    notifications
}
