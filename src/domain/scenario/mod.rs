//! Scenario tree - the hierarchical menu of conversation starters.
//!
//! # Module Organization
//!
//! - `node` - `ScenarioNode`, one menu entry with ordered children
//! - `tree` - `ScenarioTree` traversal and merge, `SharedScenarioTree` handle
//! - `path` - `ScenarioPath`, the current position in the tree
//! - `schema` - JSON scenario map parsing
//! - `seed` - the built-in seed tree

mod errors;
mod node;
mod path;
mod schema;
mod seed;
mod tree;

pub use errors::ScenarioError;
pub use node::{ScenarioNode, ScenarioOption};
pub use path::ScenarioPath;
pub use schema::{parse_scenario_map, parse_seed_document};
pub use seed::{default_tree, tree_from_seed};
pub use tree::{MergeSummary, ScenarioTree, SharedScenarioTree};
