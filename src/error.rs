use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("There is already a construct with id '{id}' in {scope}")]
    DuplicateId { scope: String, id: String },

    #[error("Resource path '{path}' is not owned by a construct in {scope}")]
    UnclaimedId { scope: String, path: String },

    #[error("Invalid construct id {0:?}\nMust be non-empty and cannot contain '/'")]
    InvalidConstructId(String),

    #[error("Invalid stack name {0:?}\nMust only consist of alphanumeric characters and hyphens, Must start with an alphabetical character, and cannot be longer than 128 characters.")]
    InvalidStackName(String),

    #[error("Invalid region code {0:?}\nMust be one of {valid:?}", valid = crate::regions::VALID_AWS_REGIONS)]
    InvalidRegion(String),

    #[error("Invalid function name {0:?}\nMust be between 1 and 64 characters of [A-Za-z0-9-_]")]
    InvalidFunctionName(String),

    #[error("Invalid memory size {0}\nMust be between 128 and 10240")]
    InvalidMemorySize(u32),

    #[error("Invalid timeout {0}\nMust be between 1 and 900")]
    InvalidTimeout(u32),

    #[error("Invalid handler {0:?}\nMust be the name of a single exported function")]
    InvalidHandler(String),

    #[error("Invalid entry {0:?}\nMust be a .js, .mjs, .cjs, .ts, .mts, .cts or .tsx file")]
    InvalidEntry(String),

    #[error("Invalid log group name {0:?}\nMust be between 1 and 512 characters of [A-Za-z0-9._-/#]")]
    InvalidLogGroupName(String),

    #[error("Removal policy {policy} is not supported by {resource_type}")]
    UnsupportedRemovalPolicy {
        policy: &'static str,
        resource_type: &'static str,
    },

    #[error("Failed to write {path:?}\n{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize template\n{0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
