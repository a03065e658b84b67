use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, fs::File, path::Path};

/// Host used when `--host` is not given
pub const DEFAULT_HOST: &str = "default";

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct Config {
    pub hosts: BTreeMap<String, Host>,
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct Host {
    pub endpoint: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

impl Config {
    /// # Errors
    ///
    /// Will return `Err` if the file can not be opened or parsed
    pub fn new(config_path: &Path) -> Result<Self> {
        let file = File::open(config_path)
            .with_context(|| format!("unable to open {}", config_path.display()))?;

        let config: Self = serde_yaml_ng::from_reader(file)
            .with_context(|| format!("unable to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// Get the host from the config.yml
    ///
    /// # Errors
    ///
    /// Will return `Err` if the host is not defined
    pub fn get_host(&self, name: &str) -> Result<&Host> {
        self.hosts
            .get(name)
            .with_context(|| format!("could not find host {name}"))
    }
}

impl Host {
    /// Keys are only used when both are set
    #[must_use]
    pub fn has_keys(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }
}
