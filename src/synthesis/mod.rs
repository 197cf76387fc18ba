//! Synthesis service — turns a finished application record into the final
//! application document.
//!
//! The intake controller only depends on the `Synthesizer` trait. The
//! production implementation, `CrewSynthesizer`, runs three LLM-backed
//! specialists in sequence: a skills evaluation, a resume analysis, and a
//! writer that receives both as context.

mod crew;
pub mod prompts;

pub use crew::{CrewSynthesizer, SynthesisConfig};

use async_trait::async_trait;

use crate::error::SynthesisError;
use crate::intake::ApplicationRecord;

/// Produces the final application document for a completed record.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, record: &ApplicationRecord) -> Result<String, SynthesisError>;
}
