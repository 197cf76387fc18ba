//! Static per-role skill catalogue.

use super::model::JobRole;

/// Skills asked for one role, plus descriptions used to phrase questions.
#[derive(Debug, Clone, Copy)]
pub struct RoleConfig {
    pub role: JobRole,
    pub required_skills: &'static [&'static str],
    pub optional_skills: &'static [&'static str],
    /// Skill → description. Not every skill has one.
    pub descriptions: &'static [(&'static str, &'static str)],
}

const DATA_SCIENTIST: RoleConfig = RoleConfig {
    role: JobRole::DataScientist,
    required_skills: &["python", "machine_learning", "statistics", "sql"],
    optional_skills: &["pandas", "numpy", "tensorflow", "pytorch", "r", "tableau"],
    descriptions: &[
        ("python", "Python programming experience"),
        ("machine_learning", "Machine Learning algorithms and frameworks"),
        ("statistics", "Statistical analysis and modeling"),
        ("sql", "Database querying with SQL"),
        ("pandas", "Data manipulation with Pandas"),
        ("numpy", "Numerical computing with NumPy"),
    ],
};

const SOFTWARE_ENGINEER: RoleConfig = RoleConfig {
    role: JobRole::SoftwareEngineer,
    required_skills: &["programming", "algorithms", "system_design"],
    optional_skills: &["java", "python", "javascript", "docker", "kubernetes", "aws"],
    descriptions: &[
        ("programming", "General programming experience"),
        ("algorithms", "Data structures and algorithms"),
        ("system_design", "System architecture and design"),
        ("java", "Java development experience"),
        ("python", "Python programming experience"),
    ],
};

const PRODUCT_MANAGER: RoleConfig = RoleConfig {
    role: JobRole::ProductManager,
    required_skills: &["product_strategy", "stakeholder_management", "analytics"],
    optional_skills: &["agile", "scrum", "jira", "figma", "sql"],
    descriptions: &[
        ("product_strategy", "Product strategy and roadmap planning"),
        ("stakeholder_management", "Managing cross-functional teams"),
        ("analytics", "Data analysis and metrics interpretation"),
    ],
};

impl RoleConfig {
    /// Configuration for a role.
    pub fn for_role(role: JobRole) -> &'static RoleConfig {
        match role {
            JobRole::DataScientist => &DATA_SCIENTIST,
            JobRole::SoftwareEngineer => &SOFTWARE_ENGINEER,
            JobRole::ProductManager => &PRODUCT_MANAGER,
        }
    }

    /// Required skills followed by optional skills.
    pub fn skill_sequence(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required_skills
            .iter()
            .chain(self.optional_skills.iter())
            .copied()
    }

    /// Total number of skill questions for this role.
    pub fn skill_count(&self) -> usize {
        self.required_skills.len() + self.optional_skills.len()
    }

    /// The skill at `index` in the asking order.
    pub fn skill_at(&self, index: usize) -> Option<&'static str> {
        self.skill_sequence().nth(index)
    }

    pub fn is_required(&self, skill: &str) -> bool {
        self.required_skills.contains(&skill)
    }

    /// The configured description, or the skill name title-cased with
    /// underscores turned into spaces.
    pub fn describe(&self, skill: &str) -> String {
        self.descriptions
            .iter()
            .find(|(name, _)| *name == skill)
            .map(|(_, desc)| (*desc).to_string())
            .unwrap_or_else(|| super::validate::title_case(&skill.replace('_', " ")))
    }
}
