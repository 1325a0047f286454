//! Prompt templates and fixed replies.

use crate::domain::user::Demographics;

/// Shown instead of a completion when free text is off-topic.
pub const REDIRECT_MESSAGE: &str = "Sorry, I am here for mental health-related topics. \
Do you have any questions or issues related to mental health?";

/// Shown when the completion service fails during a turn.
pub const APOLOGY_MESSAGE: &str = "I apologize, but I'm having trouble processing your request \
at the moment. Could you please try again?";

/// Shown when a turn could not be saved.
pub const PERSISTENCE_NOTICE: &str =
    "Your conversation could not be saved right now, but we can keep talking.";

/// Shown when the current menu position no longer exists.
pub const MENU_RESET_NOTICE: &str =
    "The scenario menu has been updated. Please choose again from the top.";

const MINOR_DISCLAIMER: &str = "\n\nAs you are a minor, it's important to discuss your feelings \
and any issues you have with a trusted adult, such as a parent, guardian, or school counselor.";

/// Countries with a dedicated resource line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    Usa,
    India,
    Germany,
}

impl Jurisdiction {
    /// Case-insensitive exact match on the country name.
    pub fn from_country(country: &str) -> Option<Self> {
        match country.trim().to_lowercase().as_str() {
            "usa" => Some(Self::Usa),
            "india" => Some(Self::India),
            "germany" => Some(Self::Germany),
            _ => None,
        }
    }

    /// Resource block appended to replies, including its leading blank line.
    pub fn resource_line(&self) -> &'static str {
        match self {
            Self::Usa => "\n\nIn the United States, there are many resources available for \
mental health support, including hotlines and online services. If you need immediate help, \
consider reaching out to a mental health professional.",
            Self::India => "\n\nIn India, there are several organizations that provide mental \
health support, including helplines and counseling services. It's important to reach out to \
these resources if you need assistance.",
            Self::Germany => "\n\nIn Germany, there are numerous resources for mental health \
support, including helplines and counseling services. If you need help, consider reaching out \
to a mental health professional or a trusted organization.",
        }
    }
}

/// Minor disclaimer block, including its leading blank line.
pub fn minor_disclaimer() -> &'static str {
    MINOR_DISCLAIMER
}

fn describe(user: &Demographics) -> String {
    format!(
        "{}, {}-year-old {} from {}, occupation: {}",
        user.name, user.age, user.sex, user.country, user.occupation
    )
}

/// First message of every sitting.
pub fn system_prompt(persona: &str, user: &Demographics) -> String {
    format!(
        "You are {persona}, a friendly and knowledgeable mental health expert. Your role is to \
provide support, guidance, and coping strategies for various mental health challenges. Remember to:
1. Always maintain a supportive and non-judgmental tone
2. Use active listening techniques in your responses
3. Incorporate evidence-based strategies like CBT when appropriate
4. Encourage seeking professional help for serious concerns
5. Avoid making diagnoses or prescribing medications
6. Respect user privacy and maintain confidentiality
7. Adapt your language to the user's age and background
8. If the user asks about anything not related to mental health, do not answer it

You are interacting with {name}, a {age}-year-old {sex} from {country} who works as a {occupation}.

Always address the user by name and tailor your responses based on their age, location, and occupation.",
        persona = persona,
        name = user.name,
        age = user.age,
        sex = user.sex,
        country = user.country,
        occupation = user.occupation,
    )
}

/// Assistant greeting that follows the system prompt.
pub fn greeting(name: &str) -> String {
    format!(
        "Hello {}! It's great to meet you. As your personal mental health expert, I'm here to \
listen and offer guidance whenever you need it. Whether you're struggling with anxiety, \
depression, or something else entirely, I'm here to support you.",
        name
    )
}

/// Canned reply to "who are you".
pub fn identity_reply(persona: &str, name: &str) -> String {
    format!(
        "I am {}, your mental health expert. How can I assist you with your mental health today, {}?",
        persona, name
    )
}

/// System instruction carrying a scenario's prompt hint.
pub fn scenario_hint(hint: &str) -> String {
    format!("Frame your reply around this scenario: {}", hint)
}

/// Single-message prompt for the structured response mode.
///
/// The reply is expected to begin its user-facing part with the envelope
/// marker, and to put its reasoning on lines starting with the scratch marker.
pub fn structured_prompt(
    persona: &str,
    user: &Demographics,
    input: &str,
    history: &str,
    scratch_marker: &str,
) -> String {
    format!(
        "Task 1: Analyze the sentiment of the input on a scale from -1 (very negative) to 1 (very \
positive). Do not show the score; express it with an appropriate emoji instead.
Task 2: Identify the most relevant mental health scenario this input relates to and answer accordingly.
Task 3: Generate a helpful and empathetic response as {persona}, a mental health chatbot. \
Incorporate CBT techniques where appropriate, and add friendly emojis where they fit.

Before providing your final response, think through these steps, writing each on a line \
starting with \"{scratch}\":
1. What is the main concern or emotion expressed by the user?
2. What might be the underlying cause of this concern?
3. What coping strategy or technique would be most appropriate?
4. How can I phrase my response to be most supportive and helpful?

User Input: {input}

User Info: {info}

Previous conversation:
{history}

Respond in the following format (the {scratch} lines must come before it):
--Sentiment: [appropriate emoji]--
--Relevant Scenario: [identified scenario]--
{name}: [generated response]",
        persona = persona,
        scratch = scratch_marker,
        input = input,
        info = describe(user),
        history = history,
        name = user.name,
    )
}

/// Prompt asking for new scenarios in the JSON scenario schema.
pub fn expansion_prompt(user: &Demographics, history: &str) -> String {
    format!(
        r#"Based on the conversation history and user information, generate a new set of mental health scenarios in a tree hierarchy structure. Each scenario should have sub-scenarios. Consider the user's age, occupation, and previous interactions, and keep the scenarios relevant to common mental health concerns.

The structure must be:

{{
    "scenario1": {{
        "prompt": "Main scenario description",
        "visible": "User-friendly scenario description",
        "sub_scenarios": {{
            "sub_scenario1": {{
                "prompt": "Sub-scenario description",
                "visible": "User-friendly sub-scenario description"
            }},
            "sub_scenario2": {{
                "prompt": "Sub-scenario description",
                "visible": "User-friendly sub-scenario description"
            }}
        }}
    }}
}}

User Info: {info}

Conversation History:
{history}

Generate at least 5 main scenarios with 2-3 sub-scenarios each, phrased in a sensitive, user-friendly manner. Reply with the JSON object only."#,
        info = describe(user),
        history = history,
    )
}

/// Question sent to the completion service to classify free text.
pub fn relevance_prompt(text: &str) -> String {
    format!("Is the following text related to mental health? {}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Demographics {
        Demographics::new("Ana", 17, "female", "USA", "student").unwrap()
    }

    #[test]
    fn jurisdiction_match_ignores_case() {
        assert_eq!(Jurisdiction::from_country("USA"), Some(Jurisdiction::Usa));
        assert_eq!(Jurisdiction::from_country(" india "), Some(Jurisdiction::India));
        assert_eq!(Jurisdiction::from_country("Germany"), Some(Jurisdiction::Germany));
        assert_eq!(Jurisdiction::from_country("france"), None);
        assert_eq!(Jurisdiction::from_country("united states"), None);
    }

    #[test]
    fn resource_lines_start_with_blank_line() {
        for j in [Jurisdiction::Usa, Jurisdiction::India, Jurisdiction::Germany] {
            assert!(j.resource_line().starts_with("\n\n"));
        }
        assert!(minor_disclaimer().starts_with("\n\n"));
    }

    #[test]
    fn system_prompt_describes_user() {
        let prompt = system_prompt("Solace", &ana());
        assert!(prompt.starts_with("You are Solace"));
        assert!(prompt.contains("Ana, a 17-year-old female from USA who works as a student"));
    }

    #[test]
    fn structured_prompt_embeds_history_and_format() {
        let prompt = structured_prompt("Solace", &ana(), "I can't sleep", "user: hi\n", "Thought Process:");
        assert!(prompt.contains("User Input: I can't sleep"));
        assert!(prompt.contains("user: hi\n"));
        assert!(prompt.contains("--Sentiment: [appropriate emoji]--"));
        assert!(prompt.contains("Ana: [generated response]"));
    }

    #[test]
    fn expansion_prompt_shows_schema() {
        let prompt = expansion_prompt(&ana(), "user: hi\n");
        assert!(prompt.contains("\"sub_scenarios\": {"));
        assert!(prompt.contains("Conversation History:\nuser: hi\n"));
    }

    #[test]
    fn identity_reply_names_user() {
        assert_eq!(
            identity_reply("Solace", "Ana"),
            "I am Solace, your mental health expert. How can I assist you with your mental health today, Ana?"
        );
    }
}
