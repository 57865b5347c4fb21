//! App name validation and the two derived spellings used by the templates.

use std::path::Path;

use crate::error::{Result, ScaffoldError};

pub const MAX_NAME_LEN: usize = 100;
/// lambda's limit on function names.
pub const MAX_FUNCTION_NAME_LEN: usize = 64;
/// appended to the pascal name to form the literal function name of the
/// log group stack.
pub const FUNCTION_NAME_SUFFIX: &str = "Function";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppNames {
    /// hyphens removed, lowercased. used for file names and the package name.
    pub lower: String,
    /// each hyphen separated part capitalized. used for class names.
    pub pascal: String,
}

/// trims the name, turns inner spaces into hyphens, and checks that the
/// result is usable both as a directory under `parent` and inside the
/// generated typescript identifiers.
pub fn validate_and_normalize_app_name(name: &str, parent: &Path) -> Result<String> {
    let normalized = name.trim().replace(' ', "-");

    if normalized.is_empty() {
        return Err(ScaffoldError::EmptyName);
    }
    let len = normalized.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ScaffoldError::NameTooLong(len));
    }
    if !normalized.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ScaffoldError::InvalidName(normalized));
    }
    let target = parent.join(&normalized);
    if target.exists() {
        return Err(ScaffoldError::AlreadyExists(target));
    }

    Ok(normalized)
}

pub fn generate_app_names(app_name: &str) -> AppNames {
    let lower = app_name.replace('-', "").to_lowercase();
    let pascal = app_name
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    AppNames { lower, pascal }
}

/// the literal function name the log group template declares.
pub fn function_name(names: &AppNames) -> String {
    format!("{}{FUNCTION_NAME_SUFFIX}", names.pascal)
}

/// the log group template names its function after the app, so the app
/// name must leave room for the suffix within lambda's limit.
pub fn verify_function_name(names: &AppNames) -> Result<()> {
    let name = function_name(names);
    if name.len() > MAX_FUNCTION_NAME_LEN {
        return Err(ScaffoldError::FunctionNameTooLong(name));
    }
    Ok(())
}
