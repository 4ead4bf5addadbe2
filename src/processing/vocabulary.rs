//! Static skill vocabulary and role profiles

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Cloud,
    Tools,
    Design,
    Soft,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::Cloud,
        SkillCategory::Tools,
        SkillCategory::Design,
        SkillCategory::Soft,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.to_string() == name.to_lowercase())
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillCategory::Frontend => write!(f, "frontend"),
            SkillCategory::Backend => write!(f, "backend"),
            SkillCategory::Database => write!(f, "database"),
            SkillCategory::Cloud => write!(f, "cloud"),
            SkillCategory::Tools => write!(f, "tools"),
            SkillCategory::Design => write!(f, "design"),
            SkillCategory::Soft => write!(f, "soft"),
        }
    }
}

use SkillCategory::*;

const BUILTIN_SKILLS: &[(&str, SkillCategory)] = &[
    ("html", Frontend),
    ("css", Frontend),
    ("javascript", Frontend),
    ("typescript", Frontend),
    ("react", Frontend),
    ("angular", Frontend),
    ("vue", Frontend),
    ("bootstrap", Frontend),
    ("nodejs", Backend),
    ("express", Backend),
    ("django", Backend),
    ("flask", Backend),
    ("java", Backend),
    ("springboot", Backend),
    ("python", Backend),
    ("php", Backend),
    ("mysql", Database),
    ("postgresql", Database),
    ("mongodb", Database),
    ("redis", Database),
    ("aws", Cloud),
    ("azure", Cloud),
    ("gcp", Cloud),
    ("docker", Cloud),
    ("kubernetes", Cloud),
    ("git", Tools),
    ("github", Tools),
    ("figma", Design),
    ("ux", Design),
    ("ui", Design),
    ("sketch", Design),
    ("communication", Soft),
    ("teamwork", Soft),
    ("leadership", Soft),
];

/// Lowercase skill keys mapped to their category, in table order
#[derive(Debug, Clone, Copy)]
pub struct SkillVocabulary {
    entries: &'static [(&'static str, SkillCategory)],
}

impl SkillVocabulary {
    pub const fn builtin() -> Self {
        Self {
            entries: BUILTIN_SKILLS,
        }
    }

    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        self.entries
            .iter()
            .find(|(name, _)| *name == skill)
            .map(|(_, category)| *category)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.category_of(skill).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, SkillCategory)> + '_ {
        self.entries.iter().copied()
    }

    pub fn skills_in(&self, category: SkillCategory) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, c)| *c == category)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A named job role with the vocabulary skills it requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub required_skills: &'static [&'static str],
}

const BUILTIN_ROLES: &[RoleProfile] = &[
    RoleProfile {
        name: "Full Stack Developer",
        description: "Builds and maintains both frontend and backend systems.",
        required_skills: &["html", "css", "javascript", "react", "nodejs", "mysql"],
    },
    RoleProfile {
        name: "Frontend Developer",
        description: "Creates intuitive and responsive user interfaces.",
        required_skills: &["html", "css", "javascript", "react", "angular"],
    },
    RoleProfile {
        name: "Backend Developer",
        description: "Designs APIs, databases, and server logic.",
        required_skills: &["nodejs", "express", "java", "springboot", "mysql"],
    },
    RoleProfile {
        name: "MERN Stack Developer",
        description: "Develops full-stack JS applications using MongoDB, Express, React, Node.js.",
        required_skills: &["react", "nodejs", "mongodb"],
    },
    RoleProfile {
        name: "Python Developer",
        description: "Develops backend systems and automation tools in Python.",
        required_skills: &["python", "django", "flask"],
    },
    RoleProfile {
        name: "DevOps Engineer",
        description: "Manages CI/CD, infrastructure, and cloud deployments.",
        required_skills: &["aws", "docker", "kubernetes"],
    },
    RoleProfile {
        name: "UI/UX Designer",
        description: "Designs engaging digital experiences using tools like Figma or Sketch.",
        required_skills: &["figma", "ux", "ui", "sketch"],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct RoleCatalog {
    roles: &'static [RoleProfile],
}

impl RoleCatalog {
    pub const fn builtin() -> Self {
        Self {
            roles: BUILTIN_ROLES,
        }
    }

    pub fn roles(&self) -> &'static [RoleProfile] {
        self.roles
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vocabulary_keys_are_unique_and_lowercase() {
        let vocabulary = SkillVocabulary::builtin();
        let mut seen = HashSet::new();
        for (skill, _) in vocabulary.iter() {
            assert_eq!(skill, skill.to_lowercase());
            assert!(seen.insert(skill), "duplicate skill {}", skill);
        }
        assert_eq!(vocabulary.len(), 34);
    }

    #[test]
    fn test_category_lookup() {
        let vocabulary = SkillVocabulary::builtin();
        assert_eq!(vocabulary.category_of("react"), Some(SkillCategory::Frontend));
        assert_eq!(vocabulary.category_of("springboot"), Some(SkillCategory::Backend));
        assert_eq!(vocabulary.category_of("github"), Some(SkillCategory::Tools));
        assert_eq!(vocabulary.category_of("rust"), None);
    }

    #[test]
    fn test_role_requirements_come_from_vocabulary() {
        let vocabulary = SkillVocabulary::builtin();
        for role in RoleCatalog::builtin().roles() {
            for skill in role.required_skills {
                assert!(vocabulary.contains(skill), "{} requires unknown {}", role.name, skill);
            }
            assert!(!role.description.is_empty());
        }
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(SkillCategory::from_name("Cloud"), Some(SkillCategory::Cloud));
        assert_eq!(SkillCategory::from_name("devops"), None);
    }
}
