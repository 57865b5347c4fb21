use serde_json::{json, Value};

mod iam;
pub use iam::*;
mod lambda;
pub use lambda::*;
mod log_group;
pub use log_group::*;

pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}

pub fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// what happens to a resource when it is removed from its stack,
/// or when the stack itself is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    Destroy,
    #[default]
    Retain,
    Snapshot,
}

impl RemovalPolicy {
    /// the value used for `DeletionPolicy` and `UpdateReplacePolicy`
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalPolicy::Destroy => "Delete",
            RemovalPolicy::Retain => "Retain",
            RemovalPolicy::Snapshot => "Snapshot",
        }
    }
}
