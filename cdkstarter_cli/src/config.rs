//! Optional TOML file with scaffolder defaults. Command line flags override
//! whatever is set here.
//!
//! ```toml
//! tsconfig_url = "https://example.com/tsconfig.json"
//! biome_url = "https://example.com/biome.json"
//! npm_command = "pnpm"
//! remote_config = false
//! with_log_group = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ScaffoldError};
use crate::remote::{BIOMECONFIG_URL, TSCONFIG_URL};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    pub tsconfig_url: String,
    pub biome_url: String,
    /// program invoked as `<npm_command> install`.
    pub npm_command: String,
    /// false writes the bundled tsconfig/biome files instead of fetching.
    pub remote_config: bool,
    pub with_log_group: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            tsconfig_url: TSCONFIG_URL.to_string(),
            biome_url: BIOMECONFIG_URL.to_string(),
            npm_command: "npm".to_string(),
            remote_config: true,
            with_log_group: false,
        }
    }
}

impl ScaffoldConfig {
    pub fn from_toml(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| ScaffoldError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScaffoldError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(path, &contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
