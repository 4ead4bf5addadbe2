//! Role recommendations from resume skill overlap

use crate::processing::similarity::round_to;
use crate::processing::skill_detector::SkillSet;
use crate::processing::vocabulary::RoleCatalog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub role: String,
    pub description: String,
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
}

pub struct RoleRecommender {
    catalog: RoleCatalog,
    max_recommendations: usize,
}

impl RoleRecommender {
    pub fn new(catalog: RoleCatalog, max_recommendations: usize) -> Self {
        Self {
            catalog,
            max_recommendations,
        }
    }

    pub fn recommend(&self, resume_skills: &SkillSet) -> Vec<RoleRecommendation> {
        let mut recommendations: Vec<RoleRecommendation> = self
            .catalog
            .roles()
            .iter()
            .filter_map(|role| {
                let mut matched_skills: Vec<String> = role
                    .required_skills
                    .iter()
                    .filter(|skill| resume_skills.contains(**skill))
                    .map(|skill| skill.to_string())
                    .collect();
                matched_skills.sort();

                let ratio = matched_skills.len() as f64 / role.required_skills.len().max(1) as f64;
                let match_percentage = round_to(ratio * 100.0, 1);
                if match_percentage <= 0.0 {
                    return None;
                }

                Some(RoleRecommendation {
                    role: role.name.to_string(),
                    description: role.description.to_string(),
                    match_percentage,
                    matched_skills,
                })
            })
            .collect();

        // stable, so ties keep catalog order
        recommendations.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
        recommendations.truncate(self.max_recommendations);
        recommendations
    }
}

impl Default for RoleRecommender {
    fn default() -> Self {
        Self::new(RoleCatalog::builtin(), 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &[&str]) -> SkillSet {
        skills.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mern_partial_match() {
        let recommender = RoleRecommender::default();
        let roles = recommender.recommend(&set(&["html", "css", "react"]));

        let frontend = roles.iter().find(|r| r.role == "Frontend Developer").unwrap();
        assert_eq!(frontend.match_percentage, 60.0);
        let full_stack = roles.iter().find(|r| r.role == "Full Stack Developer").unwrap();
        assert_eq!(full_stack.match_percentage, 50.0);
        let mern = roles.iter().find(|r| r.role == "MERN Stack Developer").unwrap();
        assert_eq!(mern.match_percentage, 33.3);
        assert_eq!(mern.matched_skills, vec!["react"]);
    }

    #[test]
    fn test_three_of_four_is_seventy_five() {
        let recommender = RoleRecommender::default();
        let roles = recommender.recommend(&set(&["figma", "ux", "ui"]));
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].role, "UI/UX Designer");
        assert_eq!(roles[0].match_percentage, 75.0);
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let recommender = RoleRecommender::default();
        let roles = recommender.recommend(&set(&[
            "html", "css", "javascript", "react", "nodejs", "python", "aws", "figma",
        ]));
        assert_eq!(roles.len(), 4);
        assert!(roles.windows(2).all(|w| w[0].match_percentage >= w[1].match_percentage));
        assert_eq!(roles[0].role, "Full Stack Developer");
        assert_eq!(roles[0].match_percentage, 83.3);
    }

    #[test]
    fn test_ties_keep_table_order() {
        let recommender = RoleRecommender::default();
        // python dev, devops: both 1/3
        let roles = recommender.recommend(&set(&["python", "aws"]));
        let names: Vec<&str> = roles.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(names, vec!["Python Developer", "DevOps Engineer"]);
    }

    #[test]
    fn test_empty_resume_gets_no_roles() {
        let recommender = RoleRecommender::default();
        assert!(recommender.recommend(&SkillSet::new()).is_empty());
    }
}
