use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::names::{logical_id, verify_construct_id};
use crate::regions::verify_region;
use crate::template::{CfnResource, Template, TemplateOutput, TemplateResource};

/// where a stack will be deployed. `None` means environment-agnostic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    pub account: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StackProps {
    /// if left empty (default), the construct id of the stack is used
    /// as the stack name.
    pub stack_name: Option<String>,
    pub description: Option<String>,
    pub env: Option<Environment>,
}

#[derive(Debug, Clone)]
pub struct CfnOutput {
    pub value: Value,
    pub description: Option<String>,
    pub export_name: Option<String>,
}

impl CfnOutput {
    pub fn new(value: Value) -> Self {
        Self { value, description: None, export_name: None }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug)]
pub struct Stack {
    id: String,
    stack_name: String,
    description: Option<String>,
    env: Environment,
    /// ids of the direct children of this stack.
    children: BTreeSet<String>,
    resources: BTreeMap<String, TemplateResource>,
    outputs: BTreeMap<String, TemplateOutput>,
}

// A stack name can contain only alphanumeric characters (case sensitive) and hyphens.
// It must start with an alphabetical character and can't be longer than 128 characters.
pub fn validate_stack_name(stack_name: &str) -> Result<()> {
    let starts_alpha = stack_name.chars().next().map_or(false, |c| c.is_ascii_alphabetic());
    let valid_chars = stack_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !starts_alpha || !valid_chars || stack_name.len() > 128 {
        return Err(Error::InvalidStackName(stack_name.to_string()));
    }
    Ok(())
}

impl Stack {
    pub(crate) fn new(id: &str, props: StackProps) -> Result<Self> {
        verify_construct_id(id)?;
        let stack_name = props.stack_name.unwrap_or_else(|| id.to_string());
        validate_stack_name(&stack_name)?;
        let env = props.env.unwrap_or_default();
        if let Some(region) = &env.region {
            verify_region(region)?;
        }
        Ok(Self {
            id: id.to_string(),
            stack_name,
            description: props.description,
            env,
            children: Default::default(),
            resources: Default::default(),
            outputs: Default::default(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// reserves `id` as a direct child of this stack. every construct
    /// placed in a stack must call this exactly once.
    pub fn claim_id(&mut self, id: &str) -> Result<()> {
        verify_construct_id(id)?;
        if !self.children.insert(id.to_string()) {
            return Err(Error::DuplicateId {
                scope: format!("stack {}", self.id),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// adds an L1 resource at `path` (relative to the stack) and returns the
    /// rendered entry so callers can attach dependencies and policies.
    /// the first path component must already have been claimed.
    pub fn add_resource(&mut self, path: &[&str], resource: &dyn CfnResource) -> Result<(String, &mut TemplateResource)> {
        match path.first() {
            Some(owner) if self.children.contains(*owner) => {}
            _ => {
                return Err(Error::UnclaimedId {
                    scope: format!("stack {}", self.id),
                    path: path.join("/"),
                });
            }
        }
        resource.validate()?;
        let id = logical_id(path);
        if self.resources.contains_key(&id) {
            return Err(Error::DuplicateId {
                scope: format!("stack {}", self.id),
                id: path.join("/"),
            });
        }
        debug!(stack = %self.id, logical_id = %id, ty = resource.type_string(), "adding resource");
        let entry = self.resources.entry(id.clone()).or_insert(TemplateResource {
            ty: resource.type_string().to_string(),
            properties: resource.properties(),
            ..Default::default()
        });
        Ok((id, entry))
    }

    /// outputs whose ids differ only in non-alphanumerics collide on the
    /// same logical id and are rejected.
    pub fn add_output(&mut self, id: &str, output: CfnOutput) -> Result<String> {
        verify_construct_id(id)?;
        let logical = logical_id(&[id]);
        if self.outputs.contains_key(&logical) {
            return Err(Error::DuplicateId {
                scope: format!("stack {} outputs", self.id),
                id: logical,
            });
        }
        self.claim_id(id)?;
        let export = output.export_name.map(|name| serde_json::json!({ "Name": name }));
        self.outputs.insert(logical.clone(), TemplateOutput {
            description: output.description,
            value: output.value,
            export,
        });
        Ok(logical)
    }

    pub fn template(&self) -> Template {
        Template {
            description: self.description.clone(),
            resources: self.resources.clone(),
            outputs: self.outputs.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Topic;
    impl CfnResource for Topic {
        fn type_string(&self) -> &'static str {
            "AWS::SNS::Topic"
        }
        fn properties(&self) -> Value {
            json!({})
        }
    }

    #[test]
    fn stack_name_defaults_to_id() {
        let stack = Stack::new("MyStack", StackProps::default()).unwrap();
        assert_eq!(stack.stack_name(), "MyStack");
    }

    #[test]
    fn validates_stack_name() {
        assert!(validate_stack_name("my-stack-1").is_ok());
        assert!(validate_stack_name("1stack").is_err());
        assert!(validate_stack_name("my_stack").is_err());
        assert!(validate_stack_name("").is_err());
        assert!(validate_stack_name(&"a".repeat(129)).is_err());
        let props = StackProps { stack_name: Some("bad name".into()), ..Default::default() };
        assert!(Stack::new("Ok", props).is_err());
    }

    #[test]
    fn validates_region() {
        let props = StackProps {
            env: Some(Environment { account: None, region: Some("moon-1".into()) }),
            ..Default::default()
        };
        let err = Stack::new("MyStack", props).unwrap_err();
        assert!(err.to_string().starts_with("Invalid region code"));
    }

    #[test]
    fn duplicate_children_fail() {
        let mut stack = Stack::new("MyStack", StackProps::default()).unwrap();
        stack.claim_id("Topic").unwrap();
        let err = stack.claim_id("Topic").unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }

    #[test]
    fn outputs_share_the_id_namespace() {
        let mut stack = Stack::new("MyStack", StackProps::default()).unwrap();
        stack.claim_id("Thing").unwrap();
        assert!(stack.add_output("Thing", CfnOutput::new(json!("x"))).is_err());
        assert_eq!(stack.add_output("Arn", CfnOutput::new(json!("x"))).unwrap(), "Arn");
    }

    #[test]
    fn outputs_with_colliding_logical_ids_fail() {
        let mut stack = Stack::new("MyStack", StackProps::default()).unwrap();
        stack.add_output("Function-Arn", CfnOutput::new(json!("first"))).unwrap();
        let err = stack.add_output("FunctionArn", CfnOutput::new(json!("second"))).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));

        let template = stack.template();
        assert_eq!(template.outputs.len(), 1);
        assert_eq!(template.outputs["FunctionArn"].value, json!("first"));
        // the rejected id stays free
        stack.claim_id("FunctionArn").unwrap();
    }

    #[test]
    fn resources_need_a_claimed_owner() {
        let mut stack = Stack::new("MyStack", StackProps::default()).unwrap();
        let err = stack.add_resource(&["Topic", "Resource"], &Topic).unwrap_err();
        assert!(matches!(err, Error::UnclaimedId { .. }));
        assert!(matches!(stack.add_resource(&[], &Topic), Err(Error::UnclaimedId { .. })));
        assert!(stack.template().resources.is_empty());
    }

    #[test]
    fn template_contains_added_resources() {
        let mut stack = Stack::new("MyStack", StackProps {
            description: Some("hello".into()),
            ..Default::default()
        }).unwrap();
        stack.claim_id("Topic").unwrap();
        let (id, entry) = stack.add_resource(&["Topic", "Resource"], &Topic).unwrap();
        entry.deletion_policy = Some("Retain".into());
        assert!(stack.add_resource(&["Topic", "Resource"], &Topic).is_err());

        let template = stack.template();
        assert_eq!(template.description.as_deref(), Some("hello"));
        assert!(template.resource_count_is("AWS::SNS::Topic", 1));
        assert_eq!(template.resources[&id].deletion_policy.as_deref(), Some("Retain"));
    }
}
