//! Advisory suggestions derived from missing skills and resume/job text

use crate::error::{Result, ScreenerError};
use crate::processing::vocabulary::{SkillCategory, SkillVocabulary};
use aho_corasick::AhoCorasick;

const FRONTEND_EVIDENCE: &[&str] = &["html", "css", "react", "angular"];
const BACKEND_EVIDENCE: &[&str] = &["nodejs", "api", "flask", "django"];

pub struct SuggestionGenerator {
    vocabulary: SkillVocabulary,
    frontend_evidence: AhoCorasick,
    backend_evidence: AhoCorasick,
    max_suggestions: usize,
    max_skill_suggestions: usize,
}

impl SuggestionGenerator {
    pub fn new(
        vocabulary: SkillVocabulary,
        max_suggestions: usize,
        max_skill_suggestions: usize,
    ) -> Result<Self> {
        let build = |patterns: &[&str]| {
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(patterns)
                .map_err(|e| ScreenerError::TextProcessing(format!("Failed to build matcher: {}", e)))
        };

        Ok(Self {
            vocabulary,
            frontend_evidence: build(FRONTEND_EVIDENCE)?,
            backend_evidence: build(BACKEND_EVIDENCE)?,
            max_suggestions,
            max_skill_suggestions,
        })
    }

    /// Skill advice first, then resume content, then job context; deduplicated and capped
    pub fn generate(&self, missing: &[String], resume_text: &str, job_text: &str) -> Vec<String> {
        let resume_lower = resume_text.to_lowercase();
        let job_lower = job_text.to_lowercase();
        let mut suggestions = Vec::new();

        for skill in missing.iter().take(self.max_skill_suggestions) {
            if let Some(advice) = self.skill_advice(skill) {
                suggestions.push(advice);
            }
        }

        if !resume_lower.contains("project") {
            suggestions.push(
                "Include a 'Projects' section to show real-world applications of your skills."
                    .to_string(),
            );
        }
        if !resume_lower.contains("github") {
            suggestions.push("Add a GitHub or portfolio link to validate your code quality.".to_string());
        }
        if !resume_lower.contains("team") {
            suggestions.push("Mention teamwork or leadership in your experience section.".to_string());
        }

        if job_lower.contains("frontend") && !self.frontend_evidence.is_match(&resume_lower) {
            suggestions.push(
                "Highlight any UI or front-end work you've done, emphasizing visual design or interactivity."
                    .to_string(),
            );
        }
        if job_lower.contains("backend") && !self.backend_evidence.is_match(&resume_lower) {
            suggestions.push(
                "Add backend experience, such as REST API creation or microservice architecture."
                    .to_string(),
            );
        }

        let mut unique: Vec<String> = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            if !unique.contains(&suggestion) {
                unique.push(suggestion);
            }
        }
        unique.truncate(self.max_suggestions);
        unique
    }

    fn skill_advice(&self, skill: &str) -> Option<String> {
        match self.vocabulary.category_of(skill)? {
            SkillCategory::Frontend => Some(format!(
                "Add a frontend project highlighting your experience with {} or responsive UI design.",
                skill
            )),
            SkillCategory::Backend => Some(format!(
                "Include backend or API integration examples using {}.",
                skill
            )),
            SkillCategory::Database => Some(format!(
                "Add a project showcasing database operations or schema design using {}.",
                skill
            )),
            SkillCategory::Cloud => Some(format!("Show deployment or CI/CD experience using {}.", skill)),
            SkillCategory::Soft => {
                Some("Add teamwork or communication achievements under soft skills.".to_string())
            }
            SkillCategory::Tools | SkillCategory::Design => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn generator() -> SuggestionGenerator {
        SuggestionGenerator::new(SkillVocabulary::builtin(), 5, 3).unwrap()
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skill_advice_by_category() {
        let suggestions = generator().generate(
            &skills(&["aws", "mysql", "react"]),
            "My project on github with the team",
            "",
        );
        assert_eq!(
            suggestions,
            vec![
                "Show deployment or CI/CD experience using aws.",
                "Add a project showcasing database operations or schema design using mysql.",
                "Add a frontend project highlighting your experience with react or responsive UI design.",
            ]
        );
    }

    #[test]
    fn test_only_first_three_missing_skills_considered() {
        let suggestions = generator().generate(
            &skills(&["aws", "azure", "docker", "python"]),
            "project github team",
            "",
        );
        assert_eq!(suggestions.len(), 3);
        assert!(!suggestions.iter().any(|s| s.contains("python")));
    }

    #[test]
    fn test_tools_and_design_produce_nothing() {
        let suggestions = generator().generate(&skills(&["figma", "git"]), "project github team", "");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_soft_skill_advice_is_deduplicated() {
        let suggestions = generator().generate(
            &skills(&["communication", "leadership", "teamwork"]),
            "project github team",
            "",
        );
        assert_eq!(suggestions, vec!["Add teamwork or communication achievements under soft skills."]);
    }

    #[test]
    fn test_resume_content_checks() {
        let suggestions = generator().generate(&[], "", "");
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("'Projects' section"));
        assert!(suggestions[1].contains("GitHub"));
        assert!(suggestions[2].contains("teamwork or leadership"));
    }

    #[test]
    fn test_job_context_checks() {
        let suggestions = generator().generate(
            &[],
            "Projects on GitHub, worked in a team",
            "Frontend and Backend engineer",
        );
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].contains("front-end work"));
        assert!(suggestions[1].contains("REST API"));

        let covered = generator().generate(
            &[],
            "Projects on GitHub, team, HTML and a REST API",
            "Frontend and Backend engineer",
        );
        assert!(covered.is_empty());
    }

    #[test]
    fn test_never_more_than_five_and_earlier_passes_win() {
        let suggestions = generator().generate(
            &skills(&["aws", "mysql", "react", "python"]),
            "",
            "frontend backend",
        );
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions[0].contains("aws"));
        assert!(suggestions[3].contains("'Projects' section"));
        assert!(suggestions[4].contains("GitHub"));
    }

    #[test]
    fn test_suggestions_are_unique() {
        let cases: &[(&[&str], &str, &str)] = &[
            (&["communication", "aws", "leadership"], "", ""),
            (&["teamwork", "teamwork", "teamwork"], "", "frontend backend"),
            (&["react", "mysql", "react", "docker"], "team player", "frontend"),
            (&["python", "django", "flask"], "projects on github", "backend"),
            (&["figma", "git", "leadership"], "team", "frontend and backend"),
            (&[], "", "frontend backend"),
        ];

        for (missing, resume, job) in cases {
            let suggestions = generator().generate(&skills(missing), resume, job);
            let distinct: HashSet<&String> = suggestions.iter().collect();
            assert_eq!(distinct.len(), suggestions.len(), "duplicates for {:?}", missing);
            assert!(suggestions.len() <= 5);
        }

        // identical soft-skill advice is separated by the aws entry
        let suggestions =
            generator().generate(&skills(&["communication", "aws", "leadership"]), "", "");
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions[0].contains("soft skills"));
        assert!(suggestions[1].contains("aws"));
        assert!(suggestions[2].contains("'Projects' section"));
    }
}
