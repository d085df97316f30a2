//! Crisis Response Library
//!
//! Turns a selected alert into a structured, multi-part rescue briefing:
//! - Fixed four-section response schema shared with the generation service
//! - Incident prompt assembly from tracking-store and alert-log data
//! - Gemini client requesting schema-conforming JSON
//! - Orchestrator state machine with selection-token fencing so a
//!   superseded request can never overwrite a newer artifact

pub mod client;
pub mod orchestrator;
pub mod prompt;
pub mod schema;

// Re-exports
pub use client::{GeminiClient, GeminiConfig, GenerationError, ResponseGenerator};
pub use orchestrator::{CrisisArtifact, CrisisOrchestrator};
pub use prompt::{IncidentPrompt, RESCUE_AUTHORITY, SYSTEM_INSTRUCTION, TARGET_RESCUE_LANGUAGE};
pub use schema::{
    response_schema, AnomalyDetectionStatus, ContextualGuidance, CrisisResponse,
    DigitalIdRetrieval, MultilingualCommunication,
};
