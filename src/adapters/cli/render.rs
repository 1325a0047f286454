//! Text rendering of dialogue outputs.

use crate::domain::dialogue::DialogueOutput;
use crate::domain::scenario::ScenarioOption;

/// Numbered menu, one option per line, starting at 1.
pub fn render_options(options: &[ScenarioOption]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {}", i + 1, option.visible))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text for one output, or `None` when nothing is shown.
pub fn render_output(output: &DialogueOutput) -> Option<String> {
    match output {
        DialogueOutput::Options(options) => Some(render_options(options)),
        DialogueOutput::Reply(text) | DialogueOutput::Notice(text) => Some(text.clone()),
        DialogueOutput::InvalidSelection { input, options } => Some(format!(
            "\"{}\" is not one of the options. Please enter a number from the list:\n{}",
            input,
            render_options(options)
        )),
        DialogueOutput::Ended => None,
    }
}
