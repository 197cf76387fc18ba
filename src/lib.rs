//! SmartApply — conversational job-application assistant.

pub mod channels;
pub mod config;
pub mod error;
pub mod intake;
pub mod llm;
pub mod synthesis;
