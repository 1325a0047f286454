//! Local storage configuration

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Defaults to `<data_dir>/encryption.key`
    pub key_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn key_path(&self) -> PathBuf {
        self.key_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("encryption.key"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key_file: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
