//! Builds the running application from configuration.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::ai::{CompletionRelevanceClassifier, OpenAIGateway};
use crate::adapters::auth::Argon2Hasher;
use crate::adapters::cli::{CliError, ConsoleApp};
use crate::adapters::crypto::{CipherError, FieldCipher};
use crate::adapters::profile::{FileProfileRepository, ProfileCodec};
use crate::config::{AppConfig, ConfigError, ValidationError};
use crate::domain::dialogue::DialogueDependencies;
use crate::domain::scenario::{default_tree, tree_from_seed, ScenarioError, ScenarioTree, SharedScenarioTree};
use crate::ports::{AcceptAll, CompletionError, CompletionGateway, RelevanceClassifier};

/// Anything that stops the binary before or during a sitting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Encryption key unavailable: {0}")]
    Key(#[from] CipherError),

    #[error("Failed to read scenario file {path}: {source}")]
    SeedFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario tree: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Completion client setup failed: {0}")]
    Gateway(#[from] CompletionError),

    #[error(transparent)]
    Console(#[from] CliError),
}

/// Loads the seed tree from `scenarios_path`, or the built-in seed.
pub async fn load_tree(config: &AppConfig) -> Result<ScenarioTree, StartupError> {
    match &config.dialogue.scenarios_path {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| StartupError::SeedFile {
                    path: path.clone(),
                    source,
                })?;
            Ok(tree_from_seed(&text)?)
        }
        None => Ok(default_tree()?),
    }
}

/// Validates `config` and wires every adapter into a `ConsoleApp`.
pub async fn build_app(config: &AppConfig) -> Result<ConsoleApp, StartupError> {
    config.validate()?;

    let gateway_config = config
        .ai
        .gateway_config()
        .ok_or(ValidationError::MissingRequired("SOLACE__AI__API_KEY"))?;
    let gateway: Arc<dyn CompletionGateway> = Arc::new(OpenAIGateway::new(gateway_config)?);

    let classifier: Arc<dyn RelevanceClassifier> = if config.dialogue.relevance_check {
        Arc::new(CompletionRelevanceClassifier::new(gateway.clone()))
    } else {
        Arc::new(AcceptAll)
    };

    let cipher = FieldCipher::load_or_create(&config.storage.key_path()).await?;
    let repository = Arc::new(FileProfileRepository::new(
        &config.storage.data_dir,
        ProfileCodec::new(cipher),
    ));

    let tree = load_tree(config).await?;
    tracing::info!(
        roots = tree.roots().len(),
        nodes = tree.size(),
        "Scenario tree loaded"
    );

    let deps = DialogueDependencies {
        gateway,
        classifier,
        repository,
        tree: SharedScenarioTree::new(tree),
    };
    let settings = config.dialogue.to_settings(&config.ai);

    Ok(ConsoleApp::new(deps, Arc::new(Argon2Hasher::new()), settings))
}
