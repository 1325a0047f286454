//! JSON scenario schema.
//!
//! Scenario maps arrive as JSON objects keyed by scenario key:
//!
//! ```json
//! {
//!   "work_stress": {
//!     "prompt": "The user feels pressure at work",
//!     "visible": "Work is getting on top of me",
//!     "sub_scenarios": {
//!       "deadlines": { "prompt": "...", "visible": "Deadlines" }
//!     }
//!   }
//! }
//! ```
//!
//! The same schema is used for the seed file (under a top-level `"scenarios"`
//! key) and for trees proposed by the completion service. Object order is the
//! display order.

use serde_json::{Map, Value};

use super::{ScenarioError, ScenarioNode};

const VISIBLE_FIELD: &str = "visible";
const PROMPT_FIELD: &str = "prompt";
const CHILDREN_FIELD: &str = "sub_scenarios";
const SEED_ROOT_FIELD: &str = "scenarios";

/// Parses a scenario map into top-level nodes.
pub fn parse_scenario_map(value: &Value) -> Result<Vec<ScenarioNode>, ScenarioError> {
    let map = value
        .as_object()
        .ok_or_else(|| ScenarioError::malformed("scenario map must be a JSON object"))?;
    parse_entries(map)
}

/// Parses a seed document: `{"scenarios": { ...scenario map... }}`.
pub fn parse_seed_document(text: &str) -> Result<Vec<ScenarioNode>, ScenarioError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ScenarioError::malformed(format!("seed is not valid JSON: {}", e)))?;
    let scenarios = value.get(SEED_ROOT_FIELD).ok_or_else(|| {
        ScenarioError::malformed(format!("seed is missing the '{}' object", SEED_ROOT_FIELD))
    })?;
    parse_scenario_map(scenarios)
}

fn parse_entries(map: &Map<String, Value>) -> Result<Vec<ScenarioNode>, ScenarioError> {
    map.iter().map(|(key, body)| parse_node(key, body)).collect()
}

fn parse_node(key: &str, body: &Value) -> Result<ScenarioNode, ScenarioError> {
    let fields = body.as_object().ok_or_else(|| {
        ScenarioError::malformed(format!("scenario '{}' must be a JSON object", key))
    })?;

    let visible = optional_string(key, fields, VISIBLE_FIELD)?.unwrap_or_default();
    let mut node = ScenarioNode::new(key, visible);
    if let Some(prompt) = optional_string(key, fields, PROMPT_FIELD)? {
        node = node.with_hint(prompt);
    }

    match fields.get(CHILDREN_FIELD) {
        None | Some(Value::Null) => {}
        Some(Value::Object(children)) => {
            node = node.with_children(parse_entries(children)?);
        }
        Some(_) => {
            return Err(ScenarioError::malformed(format!(
                "'{}' of scenario '{}' must be a JSON object",
                CHILDREN_FIELD, key
            )))
        }
    }

    Ok(node)
}

fn optional_string(
    key: &str,
    fields: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, ScenarioError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ScenarioError::malformed(format!(
            "'{}' of scenario '{}' must be a string",
            field, key
        ))),
    }
}
