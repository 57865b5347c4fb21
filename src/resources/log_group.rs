use serde_json::{json, Map, Value};

use super::{get_att, reference, RemovalPolicy};
use crate::error::{Error, Result};
use crate::stack::Stack;
use crate::template::CfnResource;

pub const LOG_GROUP_TYPE: &str = "AWS::Logs::LogGroup";

/// the name lambda writes a function's logs to by default.
pub fn log_group_name_for(function_name: &str) -> String {
    format!("/aws/lambda/{function_name}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionDays {
    OneDay,
    ThreeDays,
    FiveDays,
    OneWeek,
    TwoWeeks,
    OneMonth,
    TwoMonths,
    ThreeMonths,
    SixMonths,
    OneYear,
    #[default]
    TwoYears,
    FiveYears,
    TenYears,
    Infinite,
}

impl RetentionDays {
    /// `None` means logs never expire.
    pub fn days(&self) -> Option<u32> {
        let days = match self {
            RetentionDays::OneDay => 1,
            RetentionDays::ThreeDays => 3,
            RetentionDays::FiveDays => 5,
            RetentionDays::OneWeek => 7,
            RetentionDays::TwoWeeks => 14,
            RetentionDays::OneMonth => 30,
            RetentionDays::TwoMonths => 60,
            RetentionDays::ThreeMonths => 90,
            RetentionDays::SixMonths => 180,
            RetentionDays::OneYear => 365,
            RetentionDays::TwoYears => 731,
            RetentionDays::FiveYears => 1827,
            RetentionDays::TenYears => 3653,
            RetentionDays::Infinite => return None,
        };
        Some(days)
    }
}

pub fn verify_log_group_name(name: &str) -> Result<()> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || "._-/#".contains(c);
    if name.is_empty() || name.len() > 512 || !name.chars().all(valid_char) {
        return Err(Error::InvalidLogGroupName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CfnLogGroup {
    pub log_group_name: Option<String>,
    pub retention_in_days: Option<u32>,
}

impl CfnResource for CfnLogGroup {
    fn type_string(&self) -> &'static str {
        LOG_GROUP_TYPE
    }

    fn properties(&self) -> Value {
        let mut props = Map::new();
        if let Some(name) = &self.log_group_name {
            props.insert("LogGroupName".into(), json!(name));
        }
        if let Some(days) = self.retention_in_days {
            props.insert("RetentionInDays".into(), json!(days));
        }
        Value::Object(props)
    }

    fn validate(&self) -> Result<()> {
        match &self.log_group_name {
            Some(name) => verify_log_group_name(name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogGroupProps {
    /// physical name of the log group. auto-generated by cloudformation when `None`.
    pub log_group_name: Option<String>,
    pub retention: RetentionDays,
    pub removal_policy: RemovalPolicy,
}

#[derive(Debug, Clone)]
pub struct LogGroup {
    logical_id: String,
    log_group_name: Option<String>,
}

impl LogGroup {
    pub fn new(stack: &mut Stack, id: &str, props: LogGroupProps) -> Result<Self> {
        if props.removal_policy == RemovalPolicy::Snapshot {
            return Err(Error::UnsupportedRemovalPolicy {
                policy: props.removal_policy.as_str(),
                resource_type: LOG_GROUP_TYPE,
            });
        }
        let resource = CfnLogGroup {
            log_group_name: props.log_group_name.clone(),
            retention_in_days: props.retention.days(),
        };
        // an invalid log group must leave the id unclaimed
        resource.validate()?;
        stack.claim_id(id)?;
        let (logical_id, entry) = stack.add_resource(&[id, "Resource"], &resource)?;
        let policy = props.removal_policy.as_str().to_string();
        entry.update_replace_policy = Some(policy.clone());
        entry.deletion_policy = Some(policy);
        Ok(Self { logical_id, log_group_name: props.log_group_name })
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn log_group_name(&self) -> Option<&str> {
        self.log_group_name.as_deref()
    }

    /// `Ref` of a log group resolves to its name.
    pub fn log_group_ref(&self) -> Value {
        reference(&self.logical_id)
    }

    pub fn log_group_arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackProps;
    use crate::App;

    #[test]
    fn renders_retention_and_policies() {
        let mut app = App::with_outdir("unused");
        let stack = app.add_stack("LogStack", StackProps::default()).unwrap();
        let group = LogGroup::new(stack, "Logs", LogGroupProps {
            log_group_name: Some(log_group_name_for("my-fn")),
            retention: RetentionDays::OneDay,
            removal_policy: RemovalPolicy::Destroy,
        }).unwrap();
        assert_eq!(group.log_group_name(), Some("/aws/lambda/my-fn"));

        let template = stack.template();
        let resource = &template.resources[group.logical_id()];
        assert_eq!(resource.properties, json!({ "LogGroupName": "/aws/lambda/my-fn", "RetentionInDays": 1 }));
        assert_eq!(resource.deletion_policy.as_deref(), Some("Delete"));
        assert_eq!(resource.update_replace_policy.as_deref(), Some("Delete"));
    }

    #[test]
    fn defaults_retain_and_omit_name() {
        let mut app = App::with_outdir("unused");
        let stack = app.add_stack("LogStack", StackProps::default()).unwrap();
        let group = LogGroup::new(stack, "Logs", LogGroupProps {
            retention: RetentionDays::Infinite,
            ..Default::default()
        }).unwrap();
        let template = stack.template();
        let resource = &template.resources[group.logical_id()];
        assert_eq!(resource.properties, json!({}));
        assert_eq!(resource.deletion_policy.as_deref(), Some("Retain"));
    }

    #[test]
    fn snapshot_is_not_supported() {
        let mut app = App::with_outdir("unused");
        let stack = app.add_stack("LogStack", StackProps::default()).unwrap();
        let err = LogGroup::new(stack, "Logs", LogGroupProps {
            removal_policy: RemovalPolicy::Snapshot,
            ..Default::default()
        }).unwrap_err();
        assert!(matches!(err, Error::UnsupportedRemovalPolicy { .. }));
    }

    #[test]
    fn rejects_bad_names() {
        assert!(verify_log_group_name("/aws/lambda/ok_name-1.2#x").is_ok());
        assert!(verify_log_group_name("").is_err());
        assert!(verify_log_group_name("has space").is_err());
        assert!(verify_log_group_name(&"a".repeat(513)).is_err());
    }
}
