//! Solace - conversational wellbeing companion.
//!
//! A sitting walks the user through a hierarchical scenario tree, then
//! continues as a free-form conversation backed by a text-completion
//! service. The tree grows as the model proposes new scenarios.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
