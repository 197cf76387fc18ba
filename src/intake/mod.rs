//! Intake system — the conversational job-application flow.
//!
//! The intake is a structured conversation between the assistant and an
//! applicant. The controller walks the applicant through role selection,
//! contact details, compensation and experience questions, a per-role skill
//! assessment, and an optional resume and addendum. The finished record is
//! handed to the synthesis service, whose document is returned verbatim.

pub mod controller;
pub mod model;
pub mod prompts;
pub mod roles;
pub mod routes;
pub mod service;
pub mod state;
pub mod validate;

pub use controller::{IntakeController, IntakeStatus, Turn};
pub use model::{ApplicationRecord, JobRole, SkillAnswer};
pub use roles::RoleConfig;
pub use routes::intake_routes;
pub use service::{IntakeService, SharedIntakeService};
pub use state::{Stage, ValidatedField, ValidationAttempts};
