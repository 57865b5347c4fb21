use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("App name cannot be empty")]
    EmptyName,
    #[error("App name is too long ({0} characters, max {max})", max = crate::names::MAX_NAME_LEN)]
    NameTooLong(usize),
    #[error("Invalid app name '{0}'. Use only letters, numbers, hyphens, and underscores")]
    InvalidName(String),
    #[error("Function name '{0}' is longer than {max} characters. Use a shorter app name", max = crate::names::MAX_FUNCTION_NAME_LEN)]
    FunctionNameTooLong(String),
    #[error("Directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Failed to create directory '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write '{}'", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Failed to read config file '{}'", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file '{}'", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to run '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' exited with {}:\n{stderr}", exit_status(.code))]
    InstallFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Template '{0}' still contains a placeholder after rendering")]
    UnrenderedPlaceholder(&'static str),
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".into(),
    }
}
