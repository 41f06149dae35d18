use std::collections::HashSet;

use crate::skill_normalizer::normalize_skill;

/// Vocabulary recognised in resume text.
pub const KNOWN_SKILLS: &[&str] = &[
    "javascript",
    "react",
    "node.js",
    "node",
    "express",
    "mongodb",
    "html",
    "css",
    "python",
    "java",
    "c++",
    "c#",
    "sql",
    "typescript",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "machine learning",
    "ai",
    "nlp",
];

/// Known skills occurring anywhere in `text`, case-insensitively, in
/// vocabulary order.
///
/// Matching is plain substring containment: "javascript" also yields "java".
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| lower.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Union of `existing` and `extracted`, keeping first occurrences and
/// dropping entries that normalize to an already-seen or empty token.
pub fn merge_skills(existing: &[String], extracted: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    existing
        .iter()
        .chain(extracted)
        .filter(|skill| {
            let key = normalize_skill(skill);
            !key.is_empty() && seen.insert(key)
        })
        .cloned()
        .collect()
}
