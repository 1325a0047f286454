//! Conversation domain module.
//!
//! Holds the role-tagged message log that forms the context window sent to
//! the completion service, and the history rendering used inside prompts.

mod message;
mod session;

pub use message::{ConversationMessage, MessageRole};
pub use session::{strip_scratch_lines, ConversationSession};
