use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::skill_normalizer::normalize_skill_set;

/// Which similarity formula the skill scorer applies.
///
/// The recommendation list and the job detail view use `Coverage`. Profile
/// based recommendations and resume driven rescoring use `Jaccard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillAffinityMode {
    /// Fraction of the job's required skills held by the candidate.
    #[default]
    Coverage,
    /// Intersection over union; symmetric in its arguments.
    Jaccard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatchResult {
    pub score: f64,
    pub matched_skills: BTreeSet<String>,
}

pub fn score_skills<S: AsRef<str>>(
    mode: SkillAffinityMode,
    candidate_skills: &[S],
    job_skills: &[S],
) -> SkillMatchResult {
    let candidate = normalize_skill_set(candidate_skills);
    let job = normalize_skill_set(job_skills);
    score_skill_sets(mode, &candidate, &job)
}

/// Scores already-normalized sets. `matched_skills` is the intersection in
/// both modes.
pub fn score_skill_sets(
    mode: SkillAffinityMode,
    candidate: &BTreeSet<String>,
    job: &BTreeSet<String>,
) -> SkillMatchResult {
    let matched_skills: BTreeSet<String> = job.intersection(candidate).cloned().collect();

    let score = match mode {
        SkillAffinityMode::Coverage => ratio(matched_skills.len(), job.len()),
        SkillAffinityMode::Jaccard => {
            let union = candidate.union(job).count();
            ratio(matched_skills.len(), union)
        }
    };

    SkillMatchResult {
        score,
        matched_skills,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn coverage_counts_job_skills_held_by_candidate() {
        let result = score_skills(
            SkillAffinityMode::Coverage,
            &skills(&["Python", "SQL"]),
            &skills(&["python", "sql", "aws"]),
        );

        assert!((result.score - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.matched_skills, normalize_skill_set(&["python", "sql"]));
    }

    #[test]
    fn coverage_with_no_required_skills_is_zero() {
        let result = score_skills(SkillAffinityMode::Coverage, &skills(&["rust"]), &skills(&[]));
        assert_eq!(result.score, 0.0);
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn coverage_ignores_duplicate_and_blank_job_skills() {
        let result = score_skills(
            SkillAffinityMode::Coverage,
            &skills(&["docker"]),
            &skills(&["Docker", "docker ", "", "Kubernetes"]),
        );
        assert!((result.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn jaccard_divides_by_union() {
        let result = score_skills(
            SkillAffinityMode::Jaccard,
            &skills(&["python", "sql", "git"]),
            &skills(&["python", "aws"]),
        );
        assert!((result.score - 0.25).abs() < 1e-12);
        assert_eq!(result.matched_skills, normalize_skill_set(&["python"]));
    }

    #[test]
    fn jaccard_of_two_empty_sets_is_zero() {
        let result = score_skills(SkillAffinityMode::Jaccard, &skills(&[]), &skills(&[]));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn matched_skills_do_not_depend_on_mode() {
        let candidate = skills(&["React", "node"]);
        let job = skills(&["react", "express", "NODE"]);
        let coverage = score_skills(SkillAffinityMode::Coverage, &candidate, &job);
        let jaccard = score_skills(SkillAffinityMode::Jaccard, &candidate, &job);
        assert_eq!(coverage.matched_skills, jaccard.matched_skills);
    }

    fn skill_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-dA-D ]{0,3}", 0..8)
    }

    proptest! {
        #[test]
        fn scores_stay_in_unit_interval(a in skill_list(), b in skill_list()) {
            for mode in [SkillAffinityMode::Coverage, SkillAffinityMode::Jaccard] {
                let result = score_skills(mode, &a, &b);
                prop_assert!(result.score.is_finite());
                prop_assert!((0.0..=1.0).contains(&result.score));
            }
        }

        #[test]
        fn jaccard_is_symmetric(a in skill_list(), b in skill_list()) {
            let ab = score_skills(SkillAffinityMode::Jaccard, &a, &b);
            let ba = score_skills(SkillAffinityMode::Jaccard, &b, &a);
            prop_assert_eq!(ab.score, ba.score);
            prop_assert_eq!(ab.matched_skills, ba.matched_skills);
        }

        #[test]
        fn coverage_is_zero_without_job_skills(a in skill_list()) {
            let result = score_skills(SkillAffinityMode::Coverage, &a, &Vec::new());
            prop_assert_eq!(result.score, 0.0);
        }
    }
}
