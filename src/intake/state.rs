//! Intake state machine — tracks which question the applicant is answering.

use serde::{Deserialize, Serialize};

/// The stages of the intake conversation.
///
/// Progresses linearly: Welcome → RoleSelection → Name → Email → Phone →
/// CurrentCtc → ExpectedCtc → TotalExperience → CurrentCompany →
/// CurrentRole → Location → NoticePeriod → Skills → Resume →
/// AdditionalInfo → Processing. A reset returns to Welcome from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Welcome,
    RoleSelection,
    Name,
    Email,
    Phone,
    CurrentCtc,
    ExpectedCtc,
    TotalExperience,
    CurrentCompany,
    CurrentRole,
    Location,
    NoticePeriod,
    Skills,
    Resume,
    AdditionalInfo,
    Processing,
}

impl Stage {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Allowed moves are one step forward, Welcome straight to Name (the
    /// first message already named a role), staying put on the stages that
    /// re-prompt, and returning to Welcome.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        if target == Welcome {
            return true;
        }
        if self.next() == Some(target) {
            return true;
        }
        matches!(
            (self, target),
            (Welcome, Name)
                | (RoleSelection, RoleSelection)
                | (Name, Name)
                | (Email, Email)
                | (Phone, Phone)
                | (Skills, Skills)
                | (Processing, Processing)
        )
    }

    /// Whether this stage is terminal (synthesis has been triggered).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Stages whose answer is free-form text that may span several lines.
    pub fn accepts_long_form(&self) -> bool {
        matches!(self, Self::Resume | Self::AdditionalInfo)
    }

    /// Get the next stage in the linear progression, if any.
    pub fn next(&self) -> Option<Stage> {
        use Stage::*;
        match self {
            Welcome => Some(RoleSelection),
            RoleSelection => Some(Name),
            Name => Some(Email),
            Email => Some(Phone),
            Phone => Some(CurrentCtc),
            CurrentCtc => Some(ExpectedCtc),
            ExpectedCtc => Some(TotalExperience),
            TotalExperience => Some(CurrentCompany),
            CurrentCompany => Some(CurrentRole),
            CurrentRole => Some(Location),
            Location => Some(NoticePeriod),
            NoticePeriod => Some(Skills),
            Skills => Some(Resume),
            Resume => Some(AdditionalInfo),
            AdditionalInfo => Some(Processing),
            Processing => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::RoleSelection => "role_selection",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CurrentCtc => "current_ctc",
            Self::ExpectedCtc => "expected_ctc",
            Self::TotalExperience => "total_experience",
            Self::CurrentCompany => "current_company",
            Self::CurrentRole => "current_role",
            Self::Location => "location",
            Self::NoticePeriod => "notice_period",
            Self::Skills => "skills",
            Self::Resume => "resume",
            Self::AdditionalInfo => "additional_info",
            Self::Processing => "processing",
        };
        write!(f, "{s}")
    }
}

/// Fields whose validation failures are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatedField {
    Name,
    Email,
    Phone,
}

/// Failed validation attempts per field, cleared only by a full reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationAttempts {
    pub name: u32,
    pub email: u32,
    pub phone: u32,
}

impl ValidationAttempts {
    pub fn get(&self, field: ValidatedField) -> u32 {
        match field {
            ValidatedField::Name => self.name,
            ValidatedField::Email => self.email,
            ValidatedField::Phone => self.phone,
        }
    }

    /// Record one more failure and return the new count.
    pub fn record_failure(&mut self, field: ValidatedField) -> u32 {
        let slot = match field {
            ValidatedField::Name => &mut self.name,
            ValidatedField::Email => &mut self.email,
            ValidatedField::Phone => &mut self.phone,
        };
        *slot += 1;
        *slot
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}
