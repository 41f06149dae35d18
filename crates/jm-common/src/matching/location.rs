const REMOTE_MARKERS: [&str; 2] = ["remote", "work from home"];

pub const PARTIAL_LOCATION_SCORE: f64 = 0.8;

/// Outcome of the categorical location comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMatch {
    /// At least one side has no location.
    Unknown,
    /// The job is remote or work-from-home.
    Remote,
    Exact,
    /// One location contains the other (e.g. "bangalore" / "bangalore, india").
    Partial,
    Mismatch,
}

impl LocationMatch {
    pub fn score(self) -> f64 {
        match self {
            LocationMatch::Remote | LocationMatch::Exact => 1.0,
            LocationMatch::Partial => PARTIAL_LOCATION_SCORE,
            LocationMatch::Unknown | LocationMatch::Mismatch => 0.0,
        }
    }
}

/// 判定は上から順に評価する。空チェックがリモート判定より先なので、
/// 勤務地未設定の候補者はリモート求人にもマッチしない
pub fn evaluate_location(candidate_location: &str, job_location: &str) -> LocationMatch {
    let candidate = candidate_location.trim().to_lowercase();
    let job = job_location.trim().to_lowercase();

    if candidate.is_empty() || job.is_empty() {
        return LocationMatch::Unknown;
    }

    if REMOTE_MARKERS.iter().any(|marker| job.contains(marker)) {
        return LocationMatch::Remote;
    }

    if candidate == job {
        return LocationMatch::Exact;
    }

    if job.contains(&candidate) || candidate.contains(&job) {
        return LocationMatch::Partial;
    }

    LocationMatch::Mismatch
}

pub fn location_score(candidate_location: &str, job_location: &str) -> f64 {
    evaluate_location(candidate_location, job_location).score()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_side_scores_zero_even_for_remote_jobs() {
        assert_eq!(location_score("", "Remote"), 0.0);
        assert_eq!(location_score("   ", "Remote"), 0.0);
        assert_eq!(location_score("Pune", ""), 0.0);
        assert_eq!(evaluate_location("", "Remote"), LocationMatch::Unknown);
    }

    #[test]
    fn remote_and_work_from_home_always_match() {
        assert_eq!(location_score("Bangalore", "Remote"), 1.0);
        assert_eq!(location_score("Delhi", "Fully REMOTE (India)"), 1.0);
        assert_eq!(location_score("Chennai", "Work From Home"), 1.0);
    }

    #[test]
    fn exact_match_ignores_case_and_padding() {
        assert_eq!(evaluate_location(" Bangalore ", "bangalore"), LocationMatch::Exact);
        assert_eq!(location_score("Bangalore", "BANGALORE"), 1.0);
    }

    #[test]
    fn containment_in_either_direction_is_partial() {
        assert_eq!(location_score("Bangalore", "Bangalore, India"), 0.8);
        assert_eq!(location_score("Hyderabad, Telangana", "hyderabad"), 0.8);
    }

    #[test]
    fn unrelated_locations_score_zero() {
        assert_eq!(evaluate_location("Mumbai", "Kolkata"), LocationMatch::Mismatch);
        assert_eq!(location_score("Mumbai", "Kolkata"), 0.0);
    }
}
