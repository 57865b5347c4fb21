//! Construct ids and the CloudFormation logical ids derived from them.
//!
//! A logical id is built from the construct path inside a stack. Paths with a
//! single component are used as-is (after stripping non-alphanumerics). Longer
//! paths get an eight character adler32 suffix of the full path, so two
//! constructs whose human-readable parts collide still get distinct ids.

use crate::error::{Error, Result};

/// max length of a logical id accepted by cloudformation.
pub const MAX_LOGICAL_ID_LEN: usize = 255;
const HASH_LEN: usize = 8;

/// path components that are dropped from the human part of a logical id.
/// `Resource` is the conventional id of the one L1 resource inside an L2
/// construct, and `Default` behaves the same way.
const HIDDEN_COMPONENTS: &[&str] = &["Resource", "Default"];

pub fn verify_construct_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains('/') {
        return Err(Error::InvalidConstructId(id.to_string()));
    }
    Ok(())
}

pub fn verify_logical_id(logical_id: &str) -> bool {
    !logical_id.is_empty()
        && logical_id.len() <= MAX_LOGICAL_ID_LEN
        && logical_id.chars().all(|c| c.is_ascii_alphanumeric())
}

fn remove_non_alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

pub fn path_hash(path: &[&str]) -> String {
    let joined = path.join("/");
    format!("{:08X}", adler::adler32_slice(joined.as_bytes()))
}

pub fn logical_id(path: &[&str]) -> String {
    if let [single] = path {
        let candidate = remove_non_alphanumeric(single);
        if verify_logical_id(&candidate) {
            return candidate;
        }
    }
    let mut human: String = path
        .iter()
        .filter(|c| !HIDDEN_COMPONENTS.contains(*c))
        .map(|c| remove_non_alphanumeric(c))
        .collect();
    human.truncate(MAX_LOGICAL_ID_LEN - HASH_LEN);
    format!("{human}{}", path_hash(path))
}
