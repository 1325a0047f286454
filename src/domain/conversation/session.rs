//! Conversation session - the append-only context window of one sitting.
//!
//! No truncation happens here. Once the window outgrows the provider's
//! context length the gateway fails with `CompletionError::ContextTooLong`,
//! which the orchestrator turns into an apology like any other gateway error.

use super::{ConversationMessage, MessageRole};

/// Ordered log of role-tagged messages, owned by a single sitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSession {
    messages: Vec<ConversationMessage>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(ConversationMessage::user(text));
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ConversationMessage::assistant(text));
    }

    pub fn append_system(&mut self, text: impl Into<String>) {
        self.messages.push(ConversationMessage::system(text));
    }

    /// The literal context window, oldest first.
    pub fn as_messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders prior turns as `role: content` lines for embedding in a prompt.
    ///
    /// System messages are skipped. Inside assistant messages, every line that
    /// begins with `scratch_marker` (after leading whitespace) is dropped.
    pub fn format_history(&self, scratch_marker: &str) -> String {
        let mut history = String::new();
        for message in &self.messages {
            let content = match message.role {
                MessageRole::System => continue,
                MessageRole::User => message.content.clone(),
                MessageRole::Assistant => strip_scratch_lines(&message.content, scratch_marker),
            };
            history.push_str(message.role.as_str());
            history.push_str(": ");
            history.push_str(&content);
            history.push('\n');
        }
        history
    }
}

/// Removes lines that start with the scratch marker.
pub fn strip_scratch_lines(text: &str, scratch_marker: &str) -> String {
    if scratch_marker.is_empty() {
        return text.to_string();
    }
    text.lines()
        .filter(|line| !line.trim_start().starts_with(scratch_marker))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "Thought Process:";

    mod append {
        use super::*;

        #[test]
        fn keeps_insertion_order() {
            let mut session = ConversationSession::new();
            session.append_system("rules");
            session.append_assistant("Hello Ana!");
            session.append_user("I can't sleep");

            let roles: Vec<_> = session.as_messages().iter().map(|m| m.role).collect();
            assert_eq!(
                roles,
                vec![MessageRole::System, MessageRole::Assistant, MessageRole::User]
            );
            assert_eq!(session.len(), 3);
        }

        #[test]
        fn accepts_empty_content() {
            let mut session = ConversationSession::new();
            session.append_user("");
            assert_eq!(session.as_messages()[0].content, "");
        }
    }

    mod format_history {
        use super::*;

        #[test]
        fn excludes_system_messages() {
            let mut session = ConversationSession::new();
            session.append_system("You are a counsellor.");
            session.append_user("hi");
            session.append_assistant("hello");

            assert_eq!(session.format_history(MARKER), "user: hi\nassistant: hello\n");
        }

        #[test]
        fn drops_scratch_lines_from_assistant_messages() {
            let mut session = ConversationSession::new();
            session.append_assistant(
                "--Sentiment: 😟--\nThought Process: user seems tired\nThat sounds hard.",
            );

            let history = session.format_history(MARKER);
            assert!(!history.contains("user seems tired"));
            assert_eq!(history, "assistant: --Sentiment: 😟--\nThat sounds hard.\n");
        }

        #[test]
        fn keeps_scratch_marker_in_user_messages() {
            let mut session = ConversationSession::new();
            session.append_user("Thought Process: mine");
            assert_eq!(session.format_history(MARKER), "user: Thought Process: mine\n");
        }

        #[test]
        fn indented_scratch_lines_are_dropped() {
            let stripped = strip_scratch_lines("a\n   Thought Process: x\nb", MARKER);
            assert_eq!(stripped, "a\nb");
        }

        #[test]
        fn empty_session_renders_nothing() {
            assert_eq!(ConversationSession::new().format_history(MARKER), "");
        }
    }
}
