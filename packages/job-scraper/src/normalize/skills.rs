//! Skill tagging against a fixed vocabulary.

/// Recognized skills, in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "PHP",
    "Laravel",
    "React",
    "Node.js",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "AWS",
    "Azure",
    "Docker",
    "Git",
    "TypeScript",
    "Vue.js",
    "Angular",
    "Django",
    "Flask",
];

pub const MAX_SKILLS: usize = 5;
pub const FALLBACK_SKILL: &str = "General";

/// Skills mentioned anywhere in `text`.
///
/// Matching is case-insensitive substring matching, so "JavaScript" also
/// tags "Java". Results follow vocabulary order, not text order, and are
/// capped at [`MAX_SKILLS`]. No match yields `["General"]`.
pub fn tag_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let skills: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .take(MAX_SKILLS)
        .map(|skill| skill.to_string())
        .collect();

    if skills.is_empty() {
        vec![FALLBACK_SKILL.to_string()]
    } else {
        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_order_and_cap() {
        // Eight matches, listed in reverse vocabulary order
        let text = "flask django angular docker aws mongodb php python";
        assert_eq!(
            tag_skills(text),
            vec!["Python", "PHP", "MongoDB", "AWS", "Docker"]
        );
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(tag_skills("Strong JAVASCRIPT skills"), vec!["JavaScript", "Java"]);
        assert_eq!(tag_skills("PostgreSQL"), vec!["SQL", "PostgreSQL"]);
    }

    #[test]
    fn test_no_match_is_general() {
        assert_eq!(tag_skills("Drive safely"), vec!["General"]);
        assert_eq!(tag_skills(""), vec!["General"]);
    }
}
