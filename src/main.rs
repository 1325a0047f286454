//! `solace` - console companion for mental-wellbeing conversations.

use clap::Parser;
use std::path::PathBuf;
use tokio::io::BufReader;

use solace::adapters::cli::Console;
use solace::bootstrap::{build_app, StartupError};
use solace::config::AppConfig;
use solace::domain::dialogue::ResponseMode;
use solace::logging;

#[derive(Parser)]
#[command(
    name = "solace",
    version,
    about = "Guided, scenario-based support conversations in the terminal"
)]
struct Cli {
    /// TOML configuration file (defaults to ./solace.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for profiles, feedback, and the encryption key.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON seed file with a top-level "scenarios" object.
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Ask for sentiment/scenario/reply envelopes instead of plain replies.
    #[arg(long)]
    structured: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("solace: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(path) = cli.scenarios {
        config.dialogue.scenarios_path = Some(path);
    }
    if cli.structured {
        config.dialogue.response_mode = ResponseMode::Structured;
    }

    logging::init(config.log_format);

    let app = build_app(&config).await?;
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    app.run(&mut console).await?;
    Ok(())
}
