//! Console adapter - drives a sitting over stdin/stdout.
//!
//! - `console` - prompt/answer primitives over async readers and writers
//! - `onboarding` - registration and login
//! - `sitting` - dialogue loop, rating, and feedback
//! - `render` - text for dialogue outputs

mod app;
mod console;
mod onboarding;
mod render;
mod sitting;

pub use app::ConsoleApp;
pub use console::Console;
pub use onboarding::Onboarding;
pub use render::{render_options, render_output};
pub use sitting::ConsoleSitting;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::dialogue::DialogueError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}
