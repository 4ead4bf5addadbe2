//! Whole-word detection of vocabulary skills in free text

use crate::processing::vocabulary::SkillVocabulary;
use regex::Regex;
use std::collections::BTreeSet;

/// Detected skill names; iteration order is sorted
pub type SkillSet = BTreeSet<String>;

pub struct SkillDetector {
    patterns: Vec<(&'static str, Regex)>,
}

impl SkillDetector {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        let patterns = vocabulary
            .iter()
            .map(|(skill, _)| {
                let pattern = format!(r"\b{}\b", regex::escape(skill));
                (skill, Regex::new(&pattern).expect("Invalid skill regex"))
            })
            .collect();

        Self { patterns }
    }

    /// Every vocabulary key found as a whole word in `text`, case-insensitively
    pub fn detect(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return SkillSet::new();
        }

        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(&lowered))
            .map(|(skill, _)| skill.to_string())
            .collect()
    }
}

impl Default for SkillDetector {
    fn default() -> Self {
        Self::new(SkillVocabulary::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &[&str]) -> SkillSet {
        skills.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detects_case_insensitive_whole_words() {
        let detector = SkillDetector::default();
        let skills = detector.detect("I know Python and Django, see my GitHub");
        assert_eq!(skills, set(&["django", "github", "python"]));
    }

    #[test]
    fn test_java_not_found_inside_javascript() {
        let detector = SkillDetector::default();
        assert_eq!(detector.detect("Expert in JavaScript"), set(&["javascript"]));
        assert_eq!(detector.detect("Senior Java engineer"), set(&["java"]));
        assert_eq!(detector.detect("TypeScript everywhere"), set(&["typescript"]));
    }

    #[test]
    fn test_git_not_found_inside_github() {
        let detector = SkillDetector::default();
        assert_eq!(detector.detect("github.com/someone"), set(&["github"]));
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        let detector = SkillDetector::default();
        let skills = detector.detect("Stack: react/nodejs, (aws); docker.");
        assert_eq!(skills, set(&["aws", "docker", "nodejs", "react"]));
    }

    #[test]
    fn test_real_world_spellings_are_not_normalized() {
        let detector = SkillDetector::default();
        assert!(detector.detect("Node.js and Spring Boot").is_empty());
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let detector = SkillDetector::default();
        assert!(detector.detect("").is_empty());
        assert!(detector.detect("   ").is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let detector = SkillDetector::default();
        let text = "React, CSS, HTML, MongoDB and leadership";
        assert_eq!(detector.detect(text), detector.detect(text));
    }
}
