//! End-to-end sittings driven through the orchestrator with a scripted
//! completion gateway and the in-memory repository.

use async_trait::async_trait;
use std::sync::Arc;

use solace::adapters::ai::{MockCompletionGateway, DEFAULT_MOCK_REPLY};
use solace::adapters::profile::InMemoryProfileRepository;
use solace::domain::conversation::MessageRole;
use solace::domain::dialogue::{
    prompts, DialogueDependencies, DialogueError, DialogueOrchestrator, DialogueOutput,
    DialogueSettings, DialogueState, ResponseMode,
};
use solace::domain::foundation::UserId;
use solace::domain::scenario::{default_tree, SharedScenarioTree};
use solace::domain::user::{Demographics, UserProfile};
use solace::ports::{
    AcceptAll, CompletionError, CompletionPurpose, ProfileRepository, RelevanceClassifier,
};

const ANXIOUS: &str = "I am feeling very anxious lately.";

struct RejectAll;

#[async_trait]
impl RelevanceClassifier for RejectAll {
    async fn is_relevant(&self, _text: &str) -> bool {
        false
    }
}

struct Harness {
    gateway: MockCompletionGateway,
    repository: Arc<InMemoryProfileRepository>,
    tree: SharedScenarioTree,
    orchestrator: DialogueOrchestrator,
}

fn demographics(age: u32, country: &str) -> Demographics {
    Demographics::new("Ana", age, "female", country, "nurse").unwrap()
}

fn no_expansion() -> DialogueSettings {
    DialogueSettings {
        expansion_enabled: false,
        ..Default::default()
    }
}

async fn harness_with(
    gateway: MockCompletionGateway,
    classifier: Arc<dyn RelevanceClassifier>,
    demographics: Demographics,
    settings: DialogueSettings,
) -> Harness {
    let repository = Arc::new(InMemoryProfileRepository::default());
    let profile = UserProfile::new(
        UserId::new("ana@example.com").unwrap(),
        demographics,
        "hash",
    );
    repository.insert_profile(&profile).await.unwrap();

    let tree = SharedScenarioTree::new(default_tree().unwrap());
    let deps = DialogueDependencies {
        gateway: Arc::new(gateway.clone()),
        classifier,
        repository: repository.clone(),
        tree: tree.clone(),
    };

    Harness {
        gateway,
        repository,
        tree,
        orchestrator: DialogueOrchestrator::new(deps, profile, settings),
    }
}

async fn harness(gateway: MockCompletionGateway) -> Harness {
    harness_with(
        gateway,
        Arc::new(AcceptAll),
        demographics(30, "France"),
        no_expansion(),
    )
    .await
}

fn option_labels(output: &DialogueOutput) -> Vec<String> {
    match output {
        DialogueOutput::Options(options) | DialogueOutput::InvalidSelection { options, .. } => {
            options.iter().map(|o| o.visible.clone()).collect()
        }
        other => panic!("expected options, got {:?}", other),
    }
}

async fn stored_inputs(h: &Harness) -> Vec<String> {
    h.repository
        .recent_interactions(h.orchestrator.profile().id(), 100)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.user_input)
        .collect()
}

mod opening {
    use super::*;

    #[tokio::test]
    async fn greets_by_name_and_lists_roots_in_order() {
        let h = harness(MockCompletionGateway::new()).await;
        let turn = h.orchestrator.start().await.unwrap();

        assert_eq!(turn.state, DialogueState::AwaitingScenarioChoice);
        assert_eq!(turn.outputs[0], DialogueOutput::Reply(prompts::greeting("Ana")));
        let labels = option_labels(&turn.outputs[1]);
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], ANXIOUS);
        assert_eq!(labels[4], "I have been feeling very lonely and isolated.");
    }

    #[tokio::test]
    async fn session_opens_with_system_prompt_and_greeting() {
        let h = harness(MockCompletionGateway::new()).await;
        let messages = h.orchestrator.session().as_messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert!(messages[0].content.contains("Ana"));
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(h.gateway.call_count(), 0);
    }
}

mod traversal {
    use super::*;

    #[tokio::test]
    async fn numeric_root_choice_shows_children_in_order() {
        let mut h = harness(MockCompletionGateway::new()).await;
        let turn = h.orchestrator.handle_input("1").await.unwrap();

        assert_eq!(turn.state, DialogueState::AwaitingSubScenarioChoice);
        assert_eq!(
            option_labels(&turn.outputs[0]),
            vec![
                "Can you tell me more about what is making you feel anxious?",
                "How long have you been feeling this way?",
            ]
        );
        assert_eq!(h.orchestrator.path().segments(), &[ANXIOUS.to_string()]);
        assert_eq!(h.gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn root_text_matches_case_insensitively() {
        let mut h = harness(MockCompletionGateway::new()).await;
        let turn = h
            .orchestrator
            .handle_input("i am feeling very ANXIOUS lately.")
            .await
            .unwrap();
        assert_eq!(turn.state, DialogueState::AwaitingSubScenarioChoice);
    }

    #[tokio::test]
    async fn leaf_sends_joined_path_and_enters_free_form() {
        let gateway = MockCompletionGateway::new().with_response("Let's talk about work.");
        let mut h = harness(gateway).await;

        h.orchestrator.handle_input("1").await.unwrap();
        h.orchestrator.handle_input("1").await.unwrap();
        h.orchestrator.handle_input("1").await.unwrap();
        let turn = h.orchestrator.handle_input("1").await.unwrap();

        assert_eq!(turn.state, DialogueState::FreeFormDialogue);
        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply("Let's talk about work.".to_string())]
        );

        let request = &h.gateway.recorded_requests()[0];
        let last = request.messages.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(
            last.content,
            format!(
                "{} Can you tell me more about what is making you feel anxious? \
Is it related to work or personal life? Work",
                ANXIOUS
            )
        );
    }

    #[tokio::test]
    async fn out_of_range_choice_keeps_state_and_repeats_menu() {
        let mut h = harness(MockCompletionGateway::new()).await;
        h.orchestrator.handle_input("1").await.unwrap();
        let turn = h.orchestrator.handle_input("7").await.unwrap();

        assert_eq!(turn.state, DialogueState::AwaitingSubScenarioChoice);
        match &turn.outputs[0] {
            DialogueOutput::InvalidSelection { input, options } => {
                assert_eq!(input, "7");
                assert_eq!(options.len(), 2);
            }
            other => panic!("expected invalid selection, got {:?}", other),
        }
        assert_eq!(h.orchestrator.path().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_root_number_is_invalid() {
        let mut h = harness(MockCompletionGateway::new()).await;
        let turn = h.orchestrator.handle_input("9").await.unwrap();

        assert_eq!(turn.state, DialogueState::AwaitingScenarioChoice);
        assert!(matches!(
            turn.outputs[0],
            DialogueOutput::InvalidSelection { .. }
        ));
    }

    #[tokio::test]
    async fn oversized_root_number_is_invalid() {
        let mut h = harness(MockCompletionGateway::new()).await;
        let turn = h
            .orchestrator
            .handle_input("123456789012345678901234567890")
            .await
            .unwrap();

        assert_eq!(turn.state, DialogueState::AwaitingScenarioChoice);
        assert!(matches!(
            turn.outputs[0],
            DialogueOutput::InvalidSelection { .. }
        ));
        assert_eq!(h.gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn restart_returns_to_roots() {
        let mut h = harness(MockCompletionGateway::new()).await;
        h.orchestrator.handle_input("2").await.unwrap();
        let turn = h.orchestrator.handle_input("Scenario").await.unwrap();

        assert_eq!(turn.state, DialogueState::AwaitingScenarioChoice);
        assert_eq!(option_labels(&turn.outputs[0]).len(), 5);
        assert!(h.orchestrator.path().is_empty());
    }
}

mod free_form {
    use super::*;

    #[tokio::test]
    async fn custom_root_text_becomes_free_form_turn() {
        let gateway = MockCompletionGateway::new().with_response("I'm here for you.");
        let mut h = harness(gateway).await;

        let turn = h
            .orchestrator
            .handle_input("My dog passed away")
            .await
            .unwrap();

        assert_eq!(turn.state, DialogueState::FreeFormDialogue);
        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply("I'm here for you.".to_string())]
        );
        assert_eq!(stored_inputs(&h).await, vec!["My dog passed away"]);
    }

    #[tokio::test]
    async fn plain_mode_sends_whole_session() {
        let gateway = MockCompletionGateway::new()
            .with_response("first")
            .with_response("second");
        let mut h = harness(gateway).await;

        h.orchestrator.handle_input("I can't focus").await.unwrap();
        h.orchestrator.handle_input("and I feel tired").await.unwrap();

        let requests = h.gateway.recorded_requests();
        assert_eq!(requests[1].purpose, CompletionPurpose::Reply);
        assert_eq!(requests[1].messages.len(), 5);
        assert_eq!(h.orchestrator.session().len(), 6);
    }

    #[tokio::test]
    async fn off_topic_input_is_redirected_without_completion() {
        let mut h = harness_with(
            MockCompletionGateway::new(),
            Arc::new(RejectAll),
            demographics(30, "France"),
            no_expansion(),
        )
        .await;

        let turn = h
            .orchestrator
            .handle_input("What's the capital of Peru?")
            .await
            .unwrap();

        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply(prompts::REDIRECT_MESSAGE.to_string())]
        );
        assert_eq!(h.gateway.call_count(), 0);
        assert_eq!(stored_inputs(&h).await.len(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_yields_apology_and_keeps_state() {
        let gateway = MockCompletionGateway::new()
            .with_error(CompletionError::transport("connection reset"));
        let mut h = harness(gateway).await;

        let turn = h.orchestrator.handle_input("I feel lost").await.unwrap();

        assert_eq!(turn.state, DialogueState::FreeFormDialogue);
        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Notice(prompts::APOLOGY_MESSAGE.to_string())]
        );
        assert!(stored_inputs(&h).await.is_empty());

        let turn = h.orchestrator.handle_input("still there?").await.unwrap();
        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply(DEFAULT_MOCK_REPLY.to_string())]
        );

        let roles: Vec<_> = h.gateway.recorded_requests()[1]
            .messages
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(h.orchestrator.session().len(), 4);
    }

    #[tokio::test]
    async fn failed_structured_turn_is_not_replayed_as_history() {
        let gateway = MockCompletionGateway::new()
            .with_error(CompletionError::transport("connection reset"))
            .with_response("Sentiment: calm\nAna: Good to hear from you.");
        let settings = DialogueSettings {
            response_mode: ResponseMode::Structured,
            ..no_expansion()
        };
        let mut h = harness_with(
            gateway,
            Arc::new(AcceptAll),
            demographics(30, "France"),
            settings,
        )
        .await;

        h.orchestrator.handle_input("I feel lost").await.unwrap();
        h.orchestrator.handle_input("still there?").await.unwrap();

        let prompt = &h.gateway.recorded_requests()[1].messages[0].content;
        assert!(prompt.contains("user: still there?"));
        assert!(!prompt.contains("user: I feel lost"));
    }

    #[tokio::test]
    async fn minor_in_india_gets_both_disclaimers() {
        let gateway = MockCompletionGateway::new().with_response("Take a breath.");
        let mut h = harness_with(
            gateway,
            Arc::new(AcceptAll),
            demographics(16, "India"),
            no_expansion(),
        )
        .await;

        let turn = h.orchestrator.handle_input("exams scare me").await.unwrap();
        let DialogueOutput::Reply(reply) = &turn.outputs[0] else {
            panic!("expected reply");
        };

        let minor = reply.find("As you are a minor").unwrap();
        let india = reply.find("India").unwrap();
        assert!(reply.starts_with("Take a breath."));
        assert!(minor < india);
    }

    #[tokio::test]
    async fn structured_mode_returns_envelope_and_keeps_raw_in_session() {
        let raw = "Thought Process: they seem anxious\nSentiment: anxious\nRelevant Scenario: work\nReply: You are not alone.";
        let gateway = MockCompletionGateway::new().with_response(raw);
        let settings = DialogueSettings {
            response_mode: ResponseMode::Structured,
            ..no_expansion()
        };
        let mut h = harness_with(
            gateway,
            Arc::new(AcceptAll),
            demographics(30, "France"),
            settings,
        )
        .await;

        let turn = h.orchestrator.handle_input("deadlines").await.unwrap();

        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply(
                "Sentiment: anxious\nRelevant Scenario: work\nReply: You are not alone."
                    .to_string()
            )]
        );
        let requests = h.gateway.recorded_requests();
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(
            h.orchestrator.session().as_messages().last().unwrap().content,
            raw
        );
    }

    #[tokio::test]
    async fn structured_mode_hides_scratch_lines_after_the_marker() {
        let raw = "--Sentiment: 😟--\n--Relevant Scenario: work--\n\
Thought Process: user is fragile, avoid mentioning job loss\nAna: You are not alone.";
        let gateway = MockCompletionGateway::new().with_response(raw);
        let settings = DialogueSettings {
            response_mode: ResponseMode::Structured,
            ..no_expansion()
        };
        let mut h = harness_with(
            gateway,
            Arc::new(AcceptAll),
            demographics(30, "France"),
            settings,
        )
        .await;

        let turn = h.orchestrator.handle_input("I lost my job").await.unwrap();

        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply(
                "Sentiment: 😟--\n--Relevant Scenario: work--\nAna: You are not alone.".to_string()
            )]
        );
        assert_eq!(
            h.orchestrator.session().as_messages().last().unwrap().content,
            raw
        );
    }
}

mod special_inputs {
    use super::*;

    #[tokio::test]
    async fn exit_keywords_terminate_from_every_active_state() {
        let setups: [(&[&str], DialogueState); 3] = [
            (&[], DialogueState::AwaitingScenarioChoice),
            (&["1"], DialogueState::AwaitingSubScenarioChoice),
            (&["My dog passed away"], DialogueState::FreeFormDialogue),
        ];

        for (inputs, expected) in setups {
            for word in ["EXIT", "Quit", "e", "Q"] {
                let mut h = harness(MockCompletionGateway::new()).await;
                for input in inputs {
                    h.orchestrator.handle_input(input).await.unwrap();
                }
                assert_eq!(h.orchestrator.state(), expected);

                let turn = h.orchestrator.handle_input(word).await.unwrap();
                assert_eq!(
                    turn.state,
                    DialogueState::Terminated,
                    "{:?} from {}",
                    word,
                    expected
                );
                assert_eq!(turn.outputs, vec![DialogueOutput::Ended]);
            }
        }
    }

    #[tokio::test]
    async fn input_after_exit_is_rejected() {
        let mut h = harness(MockCompletionGateway::new()).await;
        h.orchestrator.handle_input("quit").await.unwrap();

        assert!(matches!(
            h.orchestrator.handle_input("hello").await,
            Err(DialogueError::SessionTerminated)
        ));
    }

    #[tokio::test]
    async fn identity_question_answers_without_completion() {
        let mut h = harness(MockCompletionGateway::new()).await;
        h.orchestrator.handle_input("3").await.unwrap();
        let turn = h.orchestrator.handle_input("Who are you?").await.unwrap();

        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply(prompts::identity_reply("Solace", "Ana"))]
        );
        assert_eq!(turn.state, DialogueState::AwaitingSubScenarioChoice);
        assert_eq!(h.gateway.call_count(), 0);
        assert_eq!(stored_inputs(&h).await, vec!["Who are you?"]);
    }
}

mod expansion {
    use super::*;

    fn with_expansion() -> DialogueSettings {
        DialogueSettings::default()
    }

    #[tokio::test]
    async fn reply_without_json_leaves_tree_unchanged() {
        let gateway = MockCompletionGateway::new()
            .with_response("That sounds heavy.")
            .with_response("Sure! Here are some ideas, but no JSON today.");
        let mut h = harness_with(
            gateway,
            Arc::new(AcceptAll),
            demographics(30, "France"),
            with_expansion(),
        )
        .await;
        let before = h.tree.snapshot().await;

        let turn = h.orchestrator.handle_input("I miss home").await.unwrap();

        assert_eq!(
            turn.outputs,
            vec![DialogueOutput::Reply("That sounds heavy.".to_string())]
        );
        let requests = h.gateway.recorded_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].purpose, CompletionPurpose::Expansion);
        assert_eq!(h.tree.snapshot().await, before);
    }

    #[tokio::test]
    async fn valid_proposal_is_merged_and_visible_to_menu() {
        let proposal = r#"Here you go:
{"Homesickness": {"visible": "I miss my home", "sub_scenarios": {"Since when?": {}}}}"#;
        let gateway = MockCompletionGateway::new()
            .with_response("That sounds heavy.")
            .with_response(proposal);
        let mut h = harness_with(
            gateway,
            Arc::new(AcceptAll),
            demographics(30, "France"),
            with_expansion(),
        )
        .await;

        h.orchestrator.handle_input("I miss home").await.unwrap();
        let turn = h.orchestrator.handle_input("restart").await.unwrap();

        let labels = option_labels(&turn.outputs[0]);
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[5], "I miss my home");
    }
}
