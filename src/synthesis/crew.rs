//! Sequential three-specialist synthesis pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::SynthesisError;
use crate::intake::{ApplicationRecord, RoleConfig};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::Synthesizer;
use super::prompts::{
    APPLICATION_WRITER, RESUME_ANALYST, SKILL_EVALUATOR, Specialist, application_task,
    resume_analysis_task, skill_assessment_task,
};

/// Tuning for the synthesis LLM calls.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    pub temperature: f32,
    /// Token limit for the two analysis stages.
    pub analysis_max_tokens: u32,
    /// Token limit for the final document.
    pub document_max_tokens: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            analysis_max_tokens: 2048,
            document_max_tokens: 4096,
        }
    }
}

/// Runs the skills evaluator, resume analyst and application writer in order.
pub struct CrewSynthesizer {
    llm: Arc<dyn LlmProvider>,
    config: SynthesisConfig,
}

impl CrewSynthesizer {
    pub fn new(llm: Arc<dyn LlmProvider>, config: SynthesisConfig) -> Self {
        Self { llm, config }
    }

    async fn run_stage(
        &self,
        stage: &'static str,
        specialist: &Specialist,
        task: String,
        max_tokens: u32,
    ) -> Result<String, SynthesisError> {
        debug!(stage, model = self.llm.model_name(), "Running synthesis stage");

        let request = CompletionRequest::new(vec![
            ChatMessage::system(specialist.system_prompt()),
            ChatMessage::user(task),
        ])
        .with_max_tokens(max_tokens)
        .with_temperature(self.config.temperature);

        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|source| SynthesisError::StageFailed { stage, source })?;

        let content = response.content.trim();
        if content.is_empty() {
            return Err(SynthesisError::EmptyOutput { stage });
        }

        debug!(
            stage,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Synthesis stage finished"
        );
        Ok(content.to_string())
    }
}

#[async_trait]
impl Synthesizer for CrewSynthesizer {
    async fn synthesize(&self, record: &ApplicationRecord) -> Result<String, SynthesisError> {
        let config = RoleConfig::for_role(record.job_role);
        let record_json = serde_json::to_string_pretty(record)?;

        info!(role = %record.job_role, "Synthesizing application");

        let skill_assessment = self
            .run_stage(
                "skills evaluation",
                &SKILL_EVALUATOR,
                skill_assessment_task(config, record),
                self.config.analysis_max_tokens,
            )
            .await?;

        let resume_analysis = self
            .run_stage(
                "resume analysis",
                &RESUME_ANALYST,
                resume_analysis_task(&record_json, record),
                self.config.analysis_max_tokens,
            )
            .await?;

        self.run_stage(
            "application synthesis",
            &APPLICATION_WRITER,
            application_task(config, &record_json, &skill_assessment, &resume_analysis),
            self.config.document_max_tokens,
        )
        .await
    }
}
