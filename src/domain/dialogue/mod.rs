//! Dialogue module - the conversation engine.
//!
//! # Module Organization
//!
//! - `state` - `DialogueState` lifecycle
//! - `orchestrator` - `DialogueOrchestrator`, one per sitting
//! - `response` - `ResponseProcessor` (disclaimers, envelope extraction)
//! - `expander` - `ScenarioExpander`, model-proposed scenario entries
//! - `prompts` - prompt templates and fixed replies

mod errors;
mod expander;
mod orchestrator;
pub mod prompts;
mod response;
mod state;

pub use errors::DialogueError;
pub use expander::{extract_json_object, parse_expansion, ScenarioExpander};
pub use orchestrator::{
    is_exit_keyword, is_identity_question, is_restart_keyword, parse_selection,
    DialogueDependencies, DialogueOrchestrator, DialogueOutput, DialogueSettings, DialogueTurn,
    ResponseMode,
};
pub use response::ResponseProcessor;
pub use state::DialogueState;
