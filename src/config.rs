use std::{fs::File, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::random::ServerTraits;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RandomConfig {
    // Seed for the server generator. It stays unseeded when absent
    pub server_seed: Option<u64>,

    // How many samples the cli draws per invocation
    pub count: usize,

    // Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl RandomConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        let config = serde_json::from_reader(&mut file)?;
        Ok(config)
    }

    /// Seeds the server generator when a seed is configured.
    ///
    /// Returns whether a seed was installed.
    pub fn install_server_seed(&self) -> bool {
        match self.server_seed {
            Some(seed) => {
                ServerTraits::seed(seed);
                true
            }
            None => false,
        }
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        RandomConfig {
            server_seed: None,
            count: 1,
            log_level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = RandomConfig::default();
        assert_eq!(config.server_seed, None);
        assert_eq!(config.count, 1);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RandomConfig = serde_json::from_str(r#"{ "server_seed": 1234 }"#).unwrap();
        assert_eq!(config.server_seed, Some(1234));
        assert_eq!(config.count, 1);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("randkit-config-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "count": 5, "log_level": "debug" }}"#).unwrap();
        drop(file);

        let config = RandomConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.count, 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server_seed, None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(RandomConfig::from_file("/definitely/not/here/randkit.json").is_err());
    }

    #[test]
    fn test_unseeded_config_installs_nothing() {
        assert!(!RandomConfig::default().install_server_seed());
    }
}
