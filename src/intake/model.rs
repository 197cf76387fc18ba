//! Application record and job role models.

use serde::{Deserialize, Serialize};

/// The positions applicants can apply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobRole {
    #[default]
    DataScientist,
    SoftwareEngineer,
    ProductManager,
}

impl JobRole {
    /// All roles, in the order they are offered to the applicant.
    pub const ALL: [JobRole; 3] = [
        JobRole::DataScientist,
        JobRole::SoftwareEngineer,
        JobRole::ProductManager,
    ];

    /// Human-readable title, e.g. "Software Engineer".
    pub fn title(&self) -> &'static str {
        match self {
            Self::DataScientist => "Data Scientist",
            Self::SoftwareEngineer => "Software Engineer",
            Self::ProductManager => "Product Manager",
        }
    }

    /// Lowercase keywords that select this role when they appear anywhere in
    /// a message.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::DataScientist => &["data", "scientist"],
            Self::SoftwareEngineer => &["software", "engineer"],
            Self::ProductManager => &["product", "manager"],
        }
    }

    /// Pick a role from free text. Roles are tried in `ALL` order, so
    /// "data engineer" resolves to Data Scientist.
    pub fn from_message(message: &str) -> Option<JobRole> {
        let lower = message.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.keywords().iter().any(|kw| lower.contains(kw)))
    }
}

impl std::fmt::Display for JobRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DataScientist => "data_scientist",
            Self::SoftwareEngineer => "software_engineer",
            Self::ProductManager => "product_manager",
        };
        write!(f, "{s}")
    }
}

/// Everything collected from one applicant during the intake conversation.
///
/// Fields start unset and are only cleared by a full session reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub job_role: JobRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ctc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_ctc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_period: Option<String>,
    /// Skill name → stated experience, in the order the skills were asked.
    #[serde(default)]
    pub skills_experience: Vec<SkillAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// One answered skill question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAnswer {
    pub skill: String,
    pub experience: String,
}

impl ApplicationRecord {
    /// Stated experience for a skill, if it has been answered.
    pub fn skill_experience(&self, skill: &str) -> Option<&str> {
        self.skills_experience
            .iter()
            .find(|a| a.skill == skill)
            .map(|a| a.experience.as_str())
    }

    /// Record an answer. Skills are asked at most once per session, so an
    /// existing entry is left in place rather than overwritten.
    pub(crate) fn record_skill(&mut self, skill: &str, experience: &str) {
        if self.skill_experience(skill).is_some() {
            return;
        }
        self.skills_experience.push(SkillAnswer {
            skill: skill.to_string(),
            experience: experience.to_string(),
        });
    }

    /// Render the skill answers as a pretty JSON object keyed by skill, in
    /// the order they were asked.
    pub fn skills_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .skills_experience
            .iter()
            .map(|a| (a.skill.clone(), serde_json::Value::String(a.experience.clone())))
            .collect();
        serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
    }
}
