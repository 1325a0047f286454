//! DialogueOrchestrator - the per-sitting state machine.
//!
//! One orchestrator exists per sitting and processes one turn at a time.
//! It owns the sitting's `ConversationSession` and `ScenarioPath`; the
//! scenario tree is shared with every other sitting.
//!
//! Turn handling, in order of precedence:
//!
//! 1. Exit keywords end the sitting from any active state.
//! 2. "who are you" gets a canned reply without a completion call.
//! 3. Restart keywords return to the top-level menu.
//! 4. Otherwise the input is interpreted according to the current state.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{prompts, DialogueError, DialogueState, ResponseProcessor, ScenarioExpander};
use crate::domain::conversation::{strip_scratch_lines, ConversationMessage, ConversationSession};
use crate::domain::foundation::StateMachine;
use crate::domain::scenario::{ScenarioOption, ScenarioPath, SharedScenarioTree};
use crate::domain::user::{Interaction, UserProfile};
use crate::ports::{
    CompletionError, CompletionGateway, CompletionPurpose, CompletionRequest, ProfileRepository,
    RelevanceClassifier,
};

const EXIT_KEYWORDS: [&str; 4] = ["exit", "quit", "e", "q"];
const RESTART_KEYWORDS: [&str; 2] = ["scenario", "restart"];

/// Returns true if `input` ends the sitting. Case-insensitive.
pub fn is_exit_keyword(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&input.as_str())
}

/// Returns true if `input` returns to the top-level menu. Case-insensitive.
pub fn is_restart_keyword(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    RESTART_KEYWORDS.contains(&input.as_str())
}

/// Returns true if `input` is a number, optionally signed, of any length.
fn is_numeric(input: &str) -> bool {
    let digits = input.strip_prefix(&['-', '+'][..]).unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true for "who are you", with or without a question mark.
pub fn is_identity_question(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input.trim_end_matches('?').trim_end() == "who are you"
}

/// How replies are requested from the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// The whole session is sent as the context window.
    #[default]
    Plain,
    /// One templated prompt asking for sentiment, scenario, and reply.
    Structured,
}

/// Tunables for a sitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueSettings {
    pub persona_name: String,
    pub response_mode: ResponseMode,
    pub expansion_enabled: bool,
    pub expansion_threshold: usize,
    pub scratch_marker: String,
    pub envelope_marker: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            persona_name: "Solace".to_string(),
            response_mode: ResponseMode::Plain,
            expansion_enabled: true,
            expansion_threshold: 3,
            scratch_marker: "Thought Process:".to_string(),
            envelope_marker: "Sentiment:".to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Something to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueOutput {
    /// A numbered menu.
    Options(Vec<ScenarioOption>),
    /// A reply from the assistant.
    Reply(String),
    /// The selection was not valid; the menu is shown again.
    InvalidSelection {
        input: String,
        options: Vec<ScenarioOption>,
    },
    /// A system notice (apology, save failure, menu reset).
    Notice(String),
    /// The sitting has ended.
    Ended,
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueTurn {
    pub state: DialogueState,
    pub outputs: Vec<DialogueOutput>,
}

/// External collaborators of a sitting.
#[derive(Clone)]
pub struct DialogueDependencies {
    pub gateway: Arc<dyn CompletionGateway>,
    pub classifier: Arc<dyn RelevanceClassifier>,
    pub repository: Arc<dyn ProfileRepository>,
    pub tree: SharedScenarioTree,
}

/// Drives one user's sitting.
pub struct DialogueOrchestrator {
    gateway: Arc<dyn CompletionGateway>,
    classifier: Arc<dyn RelevanceClassifier>,
    repository: Arc<dyn ProfileRepository>,
    tree: SharedScenarioTree,
    expander: ScenarioExpander,
    processor: ResponseProcessor,
    settings: DialogueSettings,
    profile: UserProfile,
    session: ConversationSession,
    path: ScenarioPath,
    state: DialogueState,
    hint: Option<String>,
}

impl DialogueOrchestrator {
    /// Starts a sitting: the session opens with the system prompt and the
    /// greeting.
    pub fn new(deps: DialogueDependencies, profile: UserProfile, settings: DialogueSettings) -> Self {
        let mut session = ConversationSession::new();
        session.append_system(prompts::system_prompt(
            &settings.persona_name,
            profile.demographics(),
        ));
        session.append_assistant(prompts::greeting(profile.name()));

        let expander = ScenarioExpander::new(
            deps.gateway.clone(),
            settings.expansion_threshold,
            settings.scratch_marker.clone(),
        );
        let processor = ResponseProcessor::new(settings.envelope_marker.clone());

        Self {
            gateway: deps.gateway,
            classifier: deps.classifier,
            repository: deps.repository,
            tree: deps.tree,
            expander,
            processor,
            settings,
            profile,
            session,
            path: ScenarioPath::new(),
            state: DialogueState::default(),
            hint: None,
        }
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn path(&self) -> &ScenarioPath {
        &self.path
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// The greeting followed by the top-level menu.
    pub async fn start(&self) -> Result<DialogueTurn, DialogueError> {
        let options = self.tree.child_options::<String>(&[]).await?;
        Ok(self.turn(vec![
            DialogueOutput::Reply(prompts::greeting(self.profile.name())),
            DialogueOutput::Options(options),
        ]))
    }

    /// Handles one line of user input.
    ///
    /// Recoverable failures become outputs; input after the sitting ended is
    /// an error.
    pub async fn handle_input(&mut self, input: &str) -> Result<DialogueTurn, DialogueError> {
        if !self.state.is_active() {
            return Err(DialogueError::SessionTerminated);
        }
        let input = input.trim();

        if is_exit_keyword(input) {
            self.set_state(DialogueState::Terminated)?;
            tracing::info!(user = %self.profile.id(), "Sitting ended");
            return Ok(self.turn(vec![DialogueOutput::Ended]));
        }

        if is_identity_question(input) {
            let reply = prompts::identity_reply(&self.settings.persona_name, self.profile.name());
            let mut outputs = vec![DialogueOutput::Reply(reply.clone())];
            outputs.extend(self.persist(input, &reply).await);
            return Ok(self.turn(outputs));
        }

        if is_restart_keyword(input) {
            return self.reset_to_menu(None).await;
        }

        match self.state {
            DialogueState::AwaitingScenarioChoice => self.choose_scenario(input).await,
            DialogueState::AwaitingSubScenarioChoice => self.choose_sub_scenario(input).await,
            DialogueState::FreeFormDialogue => self.free_form(input).await,
            DialogueState::Terminated => Err(DialogueError::SessionTerminated),
        }
    }

    async fn choose_scenario(&mut self, input: &str) -> Result<DialogueTurn, DialogueError> {
        let roots = self.tree.child_options::<String>(&[]).await?;

        if is_numeric(input) {
            return match parse_selection(input, roots.len()) {
                Ok(index) => self.enter(roots[index].key.clone()).await,
                Err(e) => Ok(self.reject(e, roots)),
            };
        }

        if let Some(root) = self.tree.find_root(input).await {
            return self.enter(root.key().to_string()).await;
        }

        if input.is_empty() {
            return Ok(self.reject(DialogueError::invalid_selection(input, roots.len()), roots));
        }

        tracing::debug!("Input does not match a scenario, continuing as free text");
        self.set_state(DialogueState::FreeFormDialogue)?;
        self.free_form(input).await
    }

    async fn choose_sub_scenario(&mut self, input: &str) -> Result<DialogueTurn, DialogueError> {
        let options = match self.tree.child_options(self.path.segments()).await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path, "Scenario path vanished");
                return self.reset_to_menu(Some(prompts::MENU_RESET_NOTICE)).await;
            }
        };

        match parse_selection(input, options.len()) {
            Ok(index) => {
                self.path.push(options[index].key.clone());
                self.descend().await
            }
            Err(e) => Ok(self.reject(e, options)),
        }
    }

    /// Enters a top-level scenario.
    async fn enter(&mut self, key: String) -> Result<DialogueTurn, DialogueError> {
        self.path = ScenarioPath::root(key);
        self.hint = None;
        self.descend().await
    }

    /// Shows the children of the current path, or answers it if it is a leaf.
    async fn descend(&mut self) -> Result<DialogueTurn, DialogueError> {
        let node = match self.tree.lookup(self.path.segments()).await {
            Ok(node) => node,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path, "Scenario path vanished");
                return self.reset_to_menu(Some(prompts::MENU_RESET_NOTICE)).await;
            }
        };
        tracing::debug!(path = %self.path, leaf = node.is_leaf(), "Descended scenario tree");

        if let Some(hint) = node.prompt_hint() {
            self.hint = Some(hint.to_string());
        }

        if !node.is_leaf() {
            self.set_state(DialogueState::AwaitingSubScenarioChoice)?;
            return Ok(self.turn(vec![DialogueOutput::Options(node.options())]));
        }

        self.set_state(DialogueState::FreeFormDialogue)?;
        let prompt = self.path.as_prompt();
        let outputs = self.reply_to(&prompt).await;
        Ok(self.turn(outputs))
    }

    async fn free_form(&mut self, input: &str) -> Result<DialogueTurn, DialogueError> {
        if input.is_empty() {
            return Ok(self.turn(Vec::new()));
        }

        if !self.classifier.is_relevant(input).await {
            tracing::info!("Off-topic input redirected");
            let reply = prompts::REDIRECT_MESSAGE.to_string();
            let mut outputs = vec![DialogueOutput::Reply(reply.clone())];
            outputs.extend(self.persist(input, &reply).await);
            return Ok(self.turn(outputs));
        }

        let outputs = self.reply_to(input).await;
        Ok(self.turn(outputs))
    }

    /// Requests, post-processes, records, and persists a reply to `input`.
    async fn reply_to(&mut self, input: &str) -> Vec<DialogueOutput> {
        let reply = match self.settings.response_mode {
            ResponseMode::Plain => self.plain_reply(input).await,
            ResponseMode::Structured => self.structured_reply(input).await,
        };

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                let provider = self.gateway.provider_info();
                tracing::warn!(error = %e, provider = %provider.name, "Completion failed");
                return vec![DialogueOutput::Notice(prompts::APOLOGY_MESSAGE.to_string())];
            }
        };

        let mut outputs = vec![DialogueOutput::Reply(reply.clone())];
        outputs.extend(self.persist(input, &reply).await);

        if self.settings.expansion_enabled {
            self.expand().await;
        }
        outputs
    }

    // The user turn joins the session only together with its reply, so a
    // failed call leaves the session as it was.
    async fn plain_reply(&mut self, input: &str) -> Result<String, CompletionError> {
        let mut pending = self.session.clone();
        pending.append_user(input);
        let request = self
            .request()
            .with_messages(pending.as_messages().iter().cloned());

        let raw = self.gateway.complete(request).await?.content;
        let reply = self
            .processor
            .augment(raw.trim(), self.profile.demographics());
        pending.append_assistant(reply.clone());
        self.session = pending;
        Ok(reply)
    }

    async fn structured_reply(&mut self, input: &str) -> Result<String, CompletionError> {
        let mut pending = self.session.clone();
        pending.append_user(input);
        let history = pending.format_history(&self.settings.scratch_marker);
        let prompt = prompts::structured_prompt(
            &self.settings.persona_name,
            self.profile.demographics(),
            input,
            &history,
            &self.settings.scratch_marker,
        );
        let request = self.request().with_message(ConversationMessage::user(prompt));

        let raw = self.gateway.complete(request).await?.content;
        let envelope = self.processor.extract_envelope(&raw);
        let visible = strip_scratch_lines(envelope, &self.settings.scratch_marker);
        let reply = self
            .processor
            .augment(visible.trim(), self.profile.demographics());
        pending.append_assistant(raw);
        self.session = pending;
        Ok(reply)
    }

    fn request(&self) -> CompletionRequest {
        let mut request = CompletionRequest::new(CompletionPurpose::Reply);
        if let Some(hint) = &self.hint {
            request = request.with_system_prompt(prompts::scenario_hint(hint));
        }
        if let Some(max) = self.settings.max_tokens {
            request = request.with_max_tokens(max);
        }
        if let Some(temp) = self.settings.temperature {
            request = request.with_temperature(temp);
        }
        request
    }

    async fn expand(&self) {
        let Some(entries) = self
            .expander
            .maybe_expand(&self.session, self.profile.demographics())
            .await
        else {
            return;
        };
        if let Err(e) = self.tree.merge(entries).await {
            tracing::warn!(error = %e, "Discarded scenario expansion");
        }
    }

    /// Appends the turn to the profile's history. Failures are logged and
    /// reported as a notice.
    async fn persist(&mut self, input: &str, reply: &str) -> Option<DialogueOutput> {
        let interaction = Interaction::new(input, reply);
        tracing::info!(
            user = %self.profile.id(),
            user_input = %interaction.user_input,
            bot_response = %interaction.bot_response,
            "Interaction"
        );

        match self
            .repository
            .append_interaction(self.profile.id(), interaction.clone())
            .await
        {
            Ok(()) => {
                self.profile.record_interaction(interaction);
                None
            }
            Err(e) => {
                tracing::error!(error = %e, user = %self.profile.id(), "Failed to persist interaction");
                Some(DialogueOutput::Notice(prompts::PERSISTENCE_NOTICE.to_string()))
            }
        }
    }

    async fn reset_to_menu(&mut self, notice: Option<&str>) -> Result<DialogueTurn, DialogueError> {
        self.path.clear();
        self.hint = None;
        self.set_state(DialogueState::AwaitingScenarioChoice)?;

        let mut outputs = Vec::new();
        if let Some(notice) = notice {
            outputs.push(DialogueOutput::Notice(notice.to_string()));
        }
        outputs.push(DialogueOutput::Options(
            self.tree.child_options::<String>(&[]).await?,
        ));
        Ok(self.turn(outputs))
    }

    fn reject(&self, error: DialogueError, options: Vec<ScenarioOption>) -> DialogueTurn {
        tracing::debug!(error = %error, "Invalid selection");
        let input = match error {
            DialogueError::InvalidSelection { input, .. } => input,
            _ => String::new(),
        };
        self.turn(vec![DialogueOutput::InvalidSelection { input, options }])
    }

    fn set_state(&mut self, next: DialogueState) -> Result<(), DialogueError> {
        if next != self.state {
            self.state = self.state.transition_to(next)?;
            tracing::debug!(state = %self.state, "Dialogue state changed");
        }
        Ok(())
    }

    fn turn(&self, outputs: Vec<DialogueOutput>) -> DialogueTurn {
        DialogueTurn {
            state: self.state,
            outputs,
        }
    }
}

/// Parses a 1-based menu choice into a 0-based index.
pub fn parse_selection(input: &str, available: usize) -> Result<usize, DialogueError> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=available).contains(&n) => Ok(n - 1),
        _ => Err(DialogueError::invalid_selection(input.trim(), available)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod keywords {
        use super::*;

        #[test]
        fn exit_keywords_ignore_case() {
            for word in ["EXIT", "Quit", "e", "Q", " exit "] {
                assert!(is_exit_keyword(word), "{} should exit", word);
            }
            assert!(!is_exit_keyword("exiting"));
            assert!(!is_exit_keyword(""));
        }

        #[test]
        fn restart_keywords_ignore_case() {
            assert!(is_restart_keyword("Scenario"));
            assert!(is_restart_keyword("RESTART"));
            assert!(!is_restart_keyword("scenarios"));
        }

        #[test]
        fn identity_question_allows_question_mark() {
            assert!(is_identity_question("who are you"));
            assert!(is_identity_question("Who are you?"));
            assert!(is_identity_question("  WHO ARE YOU ? "));
            assert!(!is_identity_question("who are you really"));
        }
    }

    mod parse_selection {
        use super::*;

        #[test]
        fn numeric_detection_has_no_length_limit() {
            assert!(is_numeric("99999999999999999999999"));
            assert!(is_numeric("-1"));
            assert!(!is_numeric("1st"));
            assert!(!is_numeric("-"));
            assert!(!is_numeric(""));
        }

        #[test]
        fn accepts_one_based_in_range() {
            assert_eq!(parse_selection("1", 2).unwrap(), 0);
            assert_eq!(parse_selection(" 2 ", 2).unwrap(), 1);
        }

        #[test]
        fn rejects_out_of_range_and_non_numeric() {
            for input in ["0", "3", "-1", "two", ""] {
                assert!(
                    matches!(
                        parse_selection(input, 2),
                        Err(DialogueError::InvalidSelection { available: 2, .. })
                    ),
                    "{:?} should be rejected",
                    input
                );
            }
        }
    }
}
