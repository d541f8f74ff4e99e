use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

/// Contents of a `--config` file.
///
/// Exactly one of `url` or `[connection]` must be present. The connection
/// table uses the same camelCase keys as the JSON options object.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub url: Option<String>,
    pub connection: Option<serde_json::Value>,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Convert into the single client constructor argument.
    pub fn into_argument(self) -> anyhow::Result<serde_json::Value> {
        match (self.url, self.connection) {
            (Some(url), None) => Ok(serde_json::Value::String(url)),
            (None, Some(connection)) => Ok(connection),
            (Some(_), Some(_)) => bail!("config sets both `url` and `[connection]`"),
            (None, None) => bail!("config needs either `url` or `[connection]`"),
        }
    }
}
