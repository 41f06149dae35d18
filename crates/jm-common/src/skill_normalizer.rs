use std::collections::BTreeSet;

/// Canonical form of a skill token: trimmed and lowercased.
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalizes a skill list into a comparable set, dropping blank tokens.
pub fn normalize_skill_set<S: AsRef<str>>(skills: &[S]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_skill("  Python "), "python");
        assert_eq!(normalize_skill("Node.JS"), "node.js");
    }

    #[test]
    fn set_drops_blank_tokens_and_dedupes() {
        let set = normalize_skill_set(&["SQL", " sql", "", "   ", "AWS"]);
        let expected: BTreeSet<String> = ["aws", "sql"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let empty: [&str; 0] = [];
        assert!(normalize_skill_set(&empty).is_empty());
    }
}
