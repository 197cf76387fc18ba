//! IntakeController — advances one application conversation a turn at a time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{IntakeConfig, SynthesisFailurePolicy};
use crate::error::SynthesisError;
use crate::synthesis::Synthesizer;

use super::model::{ApplicationRecord, JobRole};
use super::prompts;
use super::roles::RoleConfig;
use super::state::{Stage, ValidatedField, ValidationAttempts};
use super::validate::{
    ADDENDUM_SKIP_TOKENS, RESUME_SKIP_TOKENS, is_reset_command, is_token, is_valid_email,
    is_valid_phone, normalize_name,
};

/// Result of one applicant message: what to show, in order, and where the
/// conversation now stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub messages: Vec<String>,
    pub stage: Stage,
}

/// Snapshot of a session, for status endpoints and logging.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeStatus {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_skill: Option<String>,
    pub skills_answered: usize,
    pub skills_total: usize,
    pub attempts: ValidationAttempts,
    pub record: ApplicationRecord,
}

/// Drives the intake conversation for a single applicant.
///
/// Owns the session record, the current stage, the skill cursor and the
/// validation attempt counters. Each call to [`advance`](Self::advance)
/// consumes one message and moves at most one stage forward (resets aside).
pub struct IntakeController {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    stage: Stage,
    record: ApplicationRecord,
    skill_index: usize,
    attempts: ValidationAttempts,
    synthesizer: Arc<dyn Synthesizer>,
    config: IntakeConfig,
}

impl IntakeController {
    pub fn new(synthesizer: Arc<dyn Synthesizer>, config: IntakeConfig) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            stage: Stage::Welcome,
            record: ApplicationRecord::default(),
            skill_index: 0,
            attempts: ValidationAttempts::default(),
            synthesizer,
            config,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn attempts(&self, field: ValidatedField) -> u32 {
        self.attempts.get(field)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn role_config(&self) -> &'static RoleConfig {
        RoleConfig::for_role(self.record.job_role)
    }

    /// The skill the next answer will be recorded under, while in the
    /// skills stage.
    pub fn current_skill(&self) -> Option<&'static str> {
        if self.stage != Stage::Skills {
            return None;
        }
        self.role_config().skill_at(self.skill_index)
    }

    pub fn status(&self) -> IntakeStatus {
        IntakeStatus {
            session_id: self.session_id,
            started_at: self.started_at,
            stage: self.stage,
            current_skill: self.current_skill().map(String::from),
            skills_answered: self.record.skills_experience.len(),
            skills_total: self.role_config().skill_count(),
            attempts: self.attempts.clone(),
            record: self.record.clone(),
        }
    }

    /// Discard everything collected and return to the welcome stage.
    pub fn reset(&mut self) {
        debug!(session_id = %self.session_id, stage = %self.stage, "Resetting intake session");
        self.session_id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.stage = Stage::Welcome;
        self.record = ApplicationRecord::default();
        self.skill_index = 0;
        self.attempts = ValidationAttempts::default();
    }

    /// Process one applicant message.
    ///
    /// Reset commands are honoured at every stage before anything else.
    pub async fn advance(&mut self, message: &str) -> Turn {
        if is_reset_command(message) {
            self.reset();
            return Turn {
                messages: vec![prompts::welcome_message()],
                stage: self.stage,
            };
        }

        let mut out = Vec::new();
        let next = match self.stage {
            Stage::Welcome => match JobRole::from_message(message) {
                Some(role) => self.select_role(role, &mut out),
                None => {
                    out.push(prompts::welcome_message());
                    Stage::RoleSelection
                }
            },
            Stage::RoleSelection => match JobRole::from_message(message) {
                Some(role) => self.select_role(role, &mut out),
                None => {
                    debug!(session_id = %self.session_id, "No role keyword in message");
                    out.push(prompts::role_not_recognized());
                    Stage::RoleSelection
                }
            },
            Stage::Name => self.collect_name(message, &mut out),
            Stage::Email => self.collect_email(message, &mut out),
            Stage::Phone => self.collect_phone(message, &mut out),
            Stage::CurrentCtc
            | Stage::ExpectedCtc
            | Stage::TotalExperience
            | Stage::CurrentCompany
            | Stage::CurrentRole
            | Stage::Location
            | Stage::NoticePeriod => self.collect_free_text(message, &mut out),
            Stage::Skills => self.collect_skill(message, &mut out),
            Stage::Resume => {
                if !is_token(message, RESUME_SKIP_TOKENS) {
                    self.record.resume_text = Some(message.to_string());
                }
                out.push(prompts::additional_info_request());
                Stage::AdditionalInfo
            }
            Stage::AdditionalInfo => {
                if !is_token(message, ADDENDUM_SKIP_TOKENS) {
                    self.record.additional_info = Some(message.to_string());
                }
                self.transition(Stage::Processing);
                self.finish(&mut out).await;
                return Turn {
                    messages: out,
                    stage: self.stage,
                };
            }
            Stage::Processing => {
                // Only reached after a failed synthesis under the stall policy.
                out.push(prompts::stalled_hint());
                Stage::Processing
            }
        };

        self.transition(next);
        Turn {
            messages: out,
            stage: self.stage,
        }
    }

    fn transition(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "illegal intake transition {} -> {}",
            self.stage,
            next
        );
        if self.stage != next {
            debug!(session_id = %self.session_id, from = %self.stage, to = %next, "Intake stage advanced");
        }
        self.stage = next;
    }

    fn select_role(&mut self, role: JobRole, out: &mut Vec<String>) -> Stage {
        info!(session_id = %self.session_id, role = %role, "Role selected");
        self.record.job_role = role;
        out.push(prompts::role_selected(role));
        Stage::Name
    }

    fn collect_name(&mut self, message: &str, out: &mut Vec<String>) -> Stage {
        match normalize_name(message) {
            Some(name) => {
                out.push(prompts::name_accepted(&name));
                self.record.name = Some(name);
                Stage::Email
            }
            None => {
                let attempts = self.attempts.record_failure(ValidatedField::Name);
                debug!(session_id = %self.session_id, attempts, "Rejected name");
                out.push(prompts::name_invalid());
                Stage::Name
            }
        }
    }

    fn collect_email(&mut self, message: &str, out: &mut Vec<String>) -> Stage {
        if is_valid_email(message) {
            let email = message.trim().to_string();
            out.push(format!(
                "{}\n\n{}",
                prompts::email_accepted(&email),
                question(Stage::Phone)
            ));
            self.record.email = Some(email);
            return Stage::Phone;
        }

        let attempts = self.attempts.record_failure(ValidatedField::Email);
        if attempts >= self.config.max_email_attempts {
            info!(session_id = %self.session_id, attempts, "Email attempts exhausted, skipping field");
            out.push(prompts::email_skipped());
            out.push(question(Stage::Phone).to_string());
            return Stage::Phone;
        }

        debug!(session_id = %self.session_id, attempts, "Rejected email");
        out.push(prompts::email_invalid());
        Stage::Email
    }

    fn collect_phone(&mut self, message: &str, out: &mut Vec<String>) -> Stage {
        if !is_valid_phone(message) {
            let attempts = self.attempts.record_failure(ValidatedField::Phone);
            debug!(session_id = %self.session_id, attempts, "Rejected phone number");
            out.push(prompts::phone_invalid());
            return Stage::Phone;
        }

        self.record.phone = Some(message.trim().to_string());
        out.push(format!("Great! 📱 {}", question(Stage::CurrentCtc)));
        Stage::CurrentCtc
    }

    /// Store an unvalidated answer and ask the next question.
    fn collect_free_text(&mut self, message: &str, out: &mut Vec<String>) -> Stage {
        let value = Some(message.to_string());
        match self.stage {
            Stage::CurrentCtc => self.record.current_ctc = value,
            Stage::ExpectedCtc => self.record.expected_ctc = value,
            Stage::TotalExperience => self.record.total_experience = value,
            Stage::CurrentCompany => self.record.current_company = value,
            Stage::CurrentRole => self.record.current_role = value,
            Stage::Location => self.record.location = value,
            Stage::NoticePeriod => self.record.notice_period = value,
            other => {
                warn!(stage = %other, "Free-text answer outside a free-text stage");
                return other;
            }
        }

        match self.stage.next() {
            Some(Stage::Skills) => {
                out.push(prompts::skills_intro(self.record.job_role));
                self.skill_index = 0;
                self.begin_skills(out)
            }
            Some(next) => {
                out.push(question(next).to_string());
                next
            }
            None => self.stage,
        }
    }

    /// Ask the first skill question, or go straight to the resume if the
    /// role lists no skills.
    fn begin_skills(&mut self, out: &mut Vec<String>) -> Stage {
        let config = self.role_config();
        match config.skill_at(self.skill_index) {
            Some(skill) => {
                out.push(prompts::skill_question(config, skill));
                Stage::Skills
            }
            None => {
                out.push(prompts::resume_request());
                Stage::Resume
            }
        }
    }

    fn collect_skill(&mut self, message: &str, out: &mut Vec<String>) -> Stage {
        let config = self.role_config();
        let Some(skill) = config.skill_at(self.skill_index) else {
            out.push(prompts::skills_complete());
            out.push(prompts::resume_request());
            return Stage::Resume;
        };

        self.record.record_skill(skill, message);
        self.skill_index += 1;

        match config.skill_at(self.skill_index) {
            Some(next_skill) => {
                out.push(prompts::skill_noted(skill));
                out.push(prompts::skill_question(config, next_skill));
                Stage::Skills
            }
            None => {
                out.push(prompts::skills_complete());
                out.push(prompts::resume_request());
                Stage::Resume
            }
        }
    }

    /// Hand the finished record to the synthesis service.
    async fn finish(&mut self, out: &mut Vec<String>) {
        out.push(prompts::processing_started());
        info!(
            session_id = %self.session_id,
            role = %self.record.job_role,
            skills = self.record.skills_experience.len(),
            has_resume = self.record.resume_text.is_some(),
            "Submitting application for synthesis"
        );

        match self.run_synthesis().await {
            Ok(document) => {
                info!(session_id = %self.session_id, "Application synthesized");
                out.push(prompts::application_complete());
                out.push(document);
                out.push(prompts::apply_again_hint());
                self.reset();
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Application synthesis failed");
                out.push(prompts::synthesis_failed(&e.to_string()));
                match self.config.on_synthesis_failure {
                    SynthesisFailurePolicy::Stall => {
                        out.push(prompts::synthesis_retry_hint());
                    }
                    SynthesisFailurePolicy::Reset => {
                        self.reset();
                        out.push(prompts::welcome_message());
                    }
                }
            }
        }
    }

    async fn run_synthesis(&self) -> Result<String, SynthesisError> {
        let synthesizer = Arc::clone(&self.synthesizer);
        match self.config.synthesis_timeout {
            Some(limit) => tokio::time::timeout(limit, synthesizer.synthesize(&self.record))
                .await
                .unwrap_or(Err(SynthesisError::Timeout(limit))),
            None => synthesizer.synthesize(&self.record).await,
        }
    }
}

fn question(stage: Stage) -> &'static str {
    prompts::field_question(stage).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    /// Records every record it is asked to synthesize.
    struct StubSynth {
        fail: bool,
        calls: Mutex<Vec<ApplicationRecord>>,
    }

    impl StubSynth {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Synthesizer for StubSynth {
        async fn synthesize(&self, record: &ApplicationRecord) -> Result<String, SynthesisError> {
            self.calls.lock().unwrap().push(record.clone());
            if self.fail {
                Err(SynthesisError::EmptyOutput {
                    stage: "application synthesis",
                })
            } else {
                Ok(format!(
                    "# Application for {}",
                    record.name.as_deref().unwrap_or("unknown")
                ))
            }
        }
    }

    /// Never finishes.
    struct HangingSynth;

    #[async_trait]
    impl Synthesizer for HangingSynth {
        async fn synthesize(&self, _record: &ApplicationRecord) -> Result<String, SynthesisError> {
            std::future::pending().await
        }
    }

    fn controller(synth: Arc<dyn Synthesizer>) -> IntakeController {
        IntakeController::new(synth, IntakeConfig::default())
    }

    async fn say(c: &mut IntakeController, msg: &str) -> Turn {
        c.advance(msg).await
    }

    /// Walk a session up to the first skill question.
    async fn to_skills(c: &mut IntakeController, role_msg: &str) {
        say(c, "hi").await;
        say(c, role_msg).await;
        say(c, "jo park").await;
        say(c, "jo@example.com").await;
        say(c, "(555) 123-4567").await;
        for answer in ["12 LPA", "18 LPA", "6 years", "Acme", "Engineer", "Pune"] {
            say(c, answer).await;
        }
        let turn = say(c, "30 days").await;
        assert_eq!(turn.stage, Stage::Skills);
    }

    /// Walk a session up to the addendum question.
    async fn to_additional_info(c: &mut IntakeController) {
        to_skills(c, "product manager").await;
        let total = RoleConfig::for_role(JobRole::ProductManager).skill_count();
        for i in 0..total {
            say(c, &format!("answer {i}")).await;
        }
        assert_eq!(c.stage(), Stage::Resume);
        say(c, "skip").await;
        assert_eq!(c.stage(), Stage::AdditionalInfo);
    }

    #[tokio::test]
    async fn first_message_shows_welcome() {
        let mut c = controller(StubSynth::ok());
        let turn = say(&mut c, "hello").await;
        assert_eq!(turn.stage, Stage::RoleSelection);
        assert_eq!(turn.messages, vec![prompts::welcome_message()]);
    }

    #[tokio::test]
    async fn unclear_reply_after_reset_repeats_welcome_then_clarifies() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "software engineer").await;
        say(&mut c, "restart").await;

        let turn = say(&mut c, "hmm").await;
        assert_eq!(turn.stage, Stage::RoleSelection);
        assert_eq!(turn.messages, vec![prompts::welcome_message()]);

        let turn = say(&mut c, "hmm").await;
        assert_eq!(turn.stage, Stage::RoleSelection);
        assert_eq!(turn.messages, vec![prompts::role_not_recognized()]);
    }

    #[tokio::test]
    async fn role_named_on_first_contact_is_selected() {
        let mut c = controller(StubSynth::ok());
        let turn = say(&mut c, "Hi, I'd like the data scientist job").await;
        assert_eq!(turn.stage, Stage::Name);
        assert_eq!(c.record().job_role, JobRole::DataScientist);
    }

    #[tokio::test]
    async fn selecting_software_engineer_asks_for_name() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "hi").await;
        let turn = say(&mut c, "I want the software engineer role").await;
        assert_eq!(turn.stage, Stage::Name);
        assert_eq!(c.record().job_role, JobRole::SoftwareEngineer);
        assert!(turn.messages[0].contains("What's your full name?"));
    }

    #[tokio::test]
    async fn unknown_role_reprompts_without_limit() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "hi").await;
        for _ in 0..5 {
            let turn = say(&mut c, "astronaut").await;
            assert_eq!(turn.stage, Stage::RoleSelection);
            assert_eq!(turn.messages, vec![prompts::role_not_recognized()]);
        }
    }

    #[tokio::test]
    async fn short_name_is_rejected_and_padded_name_title_cased() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "data scientist").await;

        let turn = say(&mut c, " x ").await;
        assert_eq!(turn.stage, Stage::Name);
        assert!(c.record().name.is_none());
        assert_eq!(c.attempts(ValidatedField::Name), 1);

        let turn = say(&mut c, " jo ").await;
        assert_eq!(turn.stage, Stage::Email);
        assert_eq!(c.record().name.as_deref(), Some("Jo"));
    }

    #[tokio::test]
    async fn email_is_skipped_on_third_failure() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "data scientist").await;
        say(&mut c, "Jo").await;

        for attempt in 1..=2 {
            let turn = say(&mut c, "not-an-email").await;
            assert_eq!(turn.stage, Stage::Email);
            assert!(c.record().email.is_none());
            assert_eq!(c.attempts(ValidatedField::Email), attempt);
        }

        let turn = say(&mut c, "still@wrong").await;
        assert_eq!(turn.stage, Stage::Phone);
        assert!(c.record().email.is_none());
        assert_eq!(
            turn.messages,
            vec![prompts::email_skipped(), "What's your phone number?".to_string()]
        );
    }

    #[tokio::test]
    async fn valid_email_after_failures_is_stored() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "data scientist").await;
        say(&mut c, "Jo").await;
        say(&mut c, "nope").await;
        let turn = say(&mut c, " jo@example.com ").await;
        assert_eq!(turn.stage, Stage::Phone);
        assert_eq!(c.record().email.as_deref(), Some("jo@example.com"));
    }

    #[tokio::test]
    async fn phone_requires_ten_digits() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "data scientist").await;
        say(&mut c, "Jo").await;
        say(&mut c, "jo@example.com").await;

        for _ in 0..4 {
            let turn = say(&mut c, "555-1234").await;
            assert_eq!(turn.stage, Stage::Phone);
        }
        assert!(c.record().phone.is_none());
        assert_eq!(c.attempts(ValidatedField::Phone), 4);

        let turn = say(&mut c, "(555) 123-4567").await;
        assert_eq!(turn.stage, Stage::CurrentCtc);
        assert_eq!(c.record().phone.as_deref(), Some("(555) 123-4567"));
    }

    #[tokio::test]
    async fn free_text_fields_stored_verbatim() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "data scientist").await;
        let r = c.record();
        assert_eq!(r.current_ctc.as_deref(), Some("12 LPA"));
        assert_eq!(r.expected_ctc.as_deref(), Some("18 LPA"));
        assert_eq!(r.total_experience.as_deref(), Some("6 years"));
        assert_eq!(r.current_company.as_deref(), Some("Acme"));
        assert_eq!(r.current_role.as_deref(), Some("Engineer"));
        assert_eq!(r.location.as_deref(), Some("Pune"));
        assert_eq!(r.notice_period.as_deref(), Some("30 days"));
    }

    #[tokio::test]
    async fn notice_period_turn_opens_skills() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "software engineer").await;
        say(&mut c, "Jo").await;
        say(&mut c, "jo@example.com").await;
        say(&mut c, "5551234567").await;
        for answer in ["a", "b", "c", "d", "e", "f"] {
            say(&mut c, answer).await;
        }
        let turn = say(&mut c, "2 months").await;
        assert_eq!(turn.stage, Stage::Skills);
        assert_eq!(
            turn.messages,
            vec![
                prompts::skills_intro(JobRole::SoftwareEngineer),
                "What's your overall programming experience? (Required) (years and primary languages)"
                    .to_string(),
            ]
        );
        assert_eq!(c.current_skill(), Some("programming"));
    }

    #[tokio::test]
    async fn skills_follow_required_then_optional_order() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "data scientist").await;

        let config = RoleConfig::for_role(JobRole::DataScientist);
        let expected: Vec<&str> = config.skill_sequence().collect();
        let mut asked = Vec::new();

        while c.stage() == Stage::Skills {
            let skill = c.current_skill().unwrap();
            asked.push(skill);
            say(&mut c, &format!("{skill} answer")).await;
        }

        assert_eq!(asked, expected);
        assert_eq!(c.stage(), Stage::Resume);
        let recorded: Vec<&str> = c
            .record()
            .skills_experience
            .iter()
            .map(|a| a.skill.as_str())
            .collect();
        assert_eq!(recorded, expected);
        assert_eq!(c.record().skill_experience("sql"), Some("sql answer"));
    }

    #[tokio::test]
    async fn skill_turn_acknowledges_and_asks_next() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "data scientist").await;
        let turn = say(&mut c, "7 years").await;
        assert_eq!(
            turn.messages,
            vec![
                prompts::skill_noted("python"),
                "What's your experience level with Machine Learning? (Required) (years or beginner/intermediate/advanced)"
                    .to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn last_skill_moves_to_resume() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "product manager").await;
        let total = RoleConfig::for_role(JobRole::ProductManager).skill_count();
        for i in 0..total - 1 {
            say(&mut c, &format!("answer {i}")).await;
        }
        let turn = say(&mut c, "last").await;
        assert_eq!(turn.stage, Stage::Resume);
        assert_eq!(
            turn.messages,
            vec![prompts::skills_complete(), prompts::resume_request()]
        );
    }

    #[tokio::test]
    async fn resume_skip_leaves_field_unset() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "product manager").await;
        while c.stage() == Stage::Skills {
            say(&mut c, "some").await;
        }
        let turn = say(&mut c, "SKIP").await;
        assert_eq!(turn.stage, Stage::AdditionalInfo);
        assert!(c.record().resume_text.is_none());
        assert_eq!(turn.messages, vec![prompts::additional_info_request()]);
    }

    #[tokio::test]
    async fn resume_text_is_stored_verbatim() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "product manager").await;
        while c.stage() == Stage::Skills {
            say(&mut c, "some").await;
        }
        let resume = "  Jo Park\nPM at Acme 2019-2024  ";
        say(&mut c, resume).await;
        assert_eq!(c.record().resume_text.as_deref(), Some(resume));
    }

    #[tokio::test]
    async fn completed_application_is_synthesized_then_reset() {
        let synth = StubSynth::ok();
        let mut c = controller(synth.clone());
        to_additional_info(&mut c).await;
        let first_session = c.session_id();

        let turn = say(&mut c, "I can relocate").await;
        assert_eq!(turn.stage, Stage::Welcome);
        assert_eq!(
            turn.messages,
            vec![
                prompts::processing_started(),
                prompts::application_complete(),
                "# Application for Jo Park".to_string(),
                prompts::apply_again_hint(),
            ]
        );

        let submitted = synth.calls.lock().unwrap()[0].clone();
        assert_eq!(submitted.additional_info.as_deref(), Some("I can relocate"));
        assert_eq!(submitted.job_role, JobRole::ProductManager);

        assert_eq!(c.record(), &ApplicationRecord::default());
        assert_ne!(c.session_id(), first_session);
    }

    #[tokio::test]
    async fn addendum_skip_token_leaves_field_unset() {
        let synth = StubSynth::ok();
        let mut c = controller(synth.clone());
        to_additional_info(&mut c).await;
        say(&mut c, "done").await;
        assert!(synth.calls.lock().unwrap()[0].additional_info.is_none());
    }

    #[tokio::test]
    async fn synthesis_failure_stalls_until_restart() {
        let synth = StubSynth::failing();
        let mut c = controller(synth.clone());
        to_additional_info(&mut c).await;

        let turn = say(&mut c, "nothing").await;
        assert_eq!(turn.stage, Stage::Processing);
        assert!(turn.messages[1].starts_with("❌ Sorry, there was an error"));
        assert_eq!(synth.call_count(), 1);

        // Stuck: further messages don't re-run synthesis.
        let turn = say(&mut c, "hello?").await;
        assert_eq!(turn.stage, Stage::Processing);
        assert_eq!(turn.messages, vec![prompts::stalled_hint()]);
        assert_eq!(synth.call_count(), 1);

        let turn = say(&mut c, "restart").await;
        assert_eq!(turn.stage, Stage::Welcome);
        assert_eq!(turn.messages, vec![prompts::welcome_message()]);
        assert_eq!(synth.call_count(), 1);
    }

    #[tokio::test]
    async fn reset_policy_starts_over_after_failure() {
        let synth = StubSynth::failing();
        let config = IntakeConfig {
            on_synthesis_failure: SynthesisFailurePolicy::Reset,
            ..IntakeConfig::default()
        };
        let mut c = IntakeController::new(synth, config);
        to_additional_info(&mut c).await;

        let turn = say(&mut c, "done").await;
        assert_eq!(turn.stage, Stage::Welcome);
        assert_eq!(turn.messages.last(), Some(&prompts::welcome_message()));
        assert_eq!(c.record(), &ApplicationRecord::default());
    }

    #[tokio::test]
    async fn synthesis_timeout_is_reported_as_failure() {
        let config = IntakeConfig {
            synthesis_timeout: Some(Duration::from_millis(50)),
            ..IntakeConfig::default()
        };
        let mut c = IntakeController::new(Arc::new(HangingSynth), config);
        to_additional_info(&mut c).await;

        let turn = say(&mut c, "done").await;
        assert_eq!(turn.stage, Stage::Processing);
        assert!(turn.messages[1].contains("timed out"));
    }

    #[tokio::test]
    async fn reset_command_works_from_every_stage() {
        let total = RoleConfig::for_role(JobRole::ProductManager).skill_count();
        let mut script: Vec<String> = [
            "hi",
            "product manager",
            "jo park",
            "jo@example.com",
            "(555) 123-4567",
            "12 LPA",
            "18 LPA",
            "6 years",
            "Acme",
            "Engineer",
            "Pune",
            "30 days",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        script.extend((0..total).map(|i| format!("answer {i}")));
        script.push("my resume".to_string());
        script.push("done".to_string());

        let mut visited = std::collections::HashSet::new();
        for prefix in 0..=script.len() {
            // A failing synthesizer leaves the last prefix stalled in Processing.
            let mut c = controller(StubSynth::failing());
            for msg in &script[..prefix] {
                say(&mut c, msg).await;
            }
            let from = c.stage();
            visited.insert(from);

            let turn = say(&mut c, "RESTART").await;
            assert_eq!(turn.stage, Stage::Welcome, "reset from {from}");
            assert_eq!(turn.messages, vec![prompts::welcome_message()]);
            assert_eq!(c.record(), &ApplicationRecord::default());
            assert_eq!(c.current_skill(), None);
        }
        assert_eq!(visited.len(), 16, "stages visited: {visited:?}");
    }

    #[tokio::test]
    async fn reset_mid_skills_starts_a_fresh_session() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "data scientist").await;
        say(&mut c, "3 years").await;
        assert!(!c.record().skills_experience.is_empty());

        let turn = say(&mut c, "Start Over").await;
        assert_eq!(turn.stage, Stage::Welcome);
        assert_eq!(turn.messages, vec![prompts::welcome_message()]);
        assert_eq!(c.record(), &ApplicationRecord::default());
        assert!(c.status().attempts.is_clear());
        assert_eq!(c.current_skill(), None);

        // Fresh session works normally afterwards.
        let turn = say(&mut c, "product manager").await;
        assert_eq!(turn.stage, Stage::Name);
    }

    #[tokio::test]
    async fn reset_clears_attempt_counters() {
        let mut c = controller(StubSynth::ok());
        say(&mut c, "data scientist").await;
        say(&mut c, "Jo").await;
        say(&mut c, "bad").await;
        say(&mut c, "bad").await;
        assert_eq!(c.attempts(ValidatedField::Email), 2);

        say(&mut c, "reset").await;
        assert_eq!(c.attempts(ValidatedField::Email), 0);

        // A full three fresh failures are needed to skip again.
        say(&mut c, "data scientist").await;
        say(&mut c, "Jo").await;
        let turn = say(&mut c, "bad").await;
        assert_eq!(turn.stage, Stage::Email);
    }

    #[tokio::test]
    async fn status_reports_progress() {
        let mut c = controller(StubSynth::ok());
        to_skills(&mut c, "software engineer").await;
        say(&mut c, "10 years").await;

        let status = c.status();
        assert_eq!(status.stage, Stage::Skills);
        assert_eq!(status.current_skill.as_deref(), Some("algorithms"));
        assert_eq!(status.skills_answered, 1);
        assert_eq!(status.skills_total, 9);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["stage"], "skills");
        assert_eq!(json["record"]["job_role"], "software_engineer");
    }
}
