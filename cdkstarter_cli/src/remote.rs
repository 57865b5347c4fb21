//! Fetching the shared `tsconfig.json` and `biome.json`.

use std::time::Duration;

use crate::error::{Result, ScaffoldError};
use crate::templates::{FALLBACK_BIOME, FALLBACK_TSCONFIG};

pub const TSCONFIG_URL: &str = "https://gist.githubusercontent.com/dreamorosi/8785f2a8ae9e868be65de1a44018b936/raw/6e738f7abae160190a31b8d5bcdc5ff7af4c4cf6/tsconfig.json";
pub const BIOMECONFIG_URL: &str = "https://gist.githubusercontent.com/dreamorosi/3daec171ff98f2c921eb3a19459256dd/raw/88f6aad32ebcb787e3655bf5d68a5a1c9e1e52ae/biome.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFiles {
    pub tsconfig: String,
    pub biome: String,
}

impl ConfigFiles {
    pub fn bundled() -> Self {
        Self {
            tsconfig: FALLBACK_TSCONFIG.to_string(),
            biome: FALLBACK_BIOME.to_string(),
        }
    }
}

pub fn fetch(agent: &ureq::Agent, url: &str) -> Result<String> {
    tracing::debug!(url, "fetching");
    let response = agent.get(url).call().map_err(|e| ScaffoldError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    response.into_string().map_err(|e| ScaffoldError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// both files are requested at the same time; the first failure wins.
pub fn fetch_config_files(tsconfig_url: &str, biome_url: &str) -> Result<ConfigFiles> {
    let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
    let (tsconfig, biome) = rayon::join(|| fetch(&agent, tsconfig_url), || fetch(&agent, biome_url));
    Ok(ConfigFiles { tsconfig: tsconfig?, biome: biome? })
}
