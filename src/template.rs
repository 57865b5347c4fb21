use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A low-level resource that can be placed into a template.
/// `properties` is rendered as-is under the resource's `Properties` key.
pub trait CfnResource {
    fn type_string(&self) -> &'static str;
    fn properties(&self) -> Value;
    fn validate(&self) -> crate::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub ty: String,
    #[serde(rename = "Properties")]
    pub properties: Value,
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(rename = "UpdateReplacePolicy", default, skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<String>,
    #[serde(rename = "DeletionPolicy", default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,
    #[serde(rename = "Metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateOutput {
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Value")]
    pub value: Value,
    #[serde(rename = "Export", default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub version: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, TemplateResource>,
    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, TemplateOutput>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            version: TEMPLATE_FORMAT_VERSION.to_string(),
            description: None,
            resources: Default::default(),
            outputs: Default::default(),
        }
    }
}

impl Template {
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn find_resources(&self, ty: &str) -> Vec<(&str, &TemplateResource)> {
        self.resources
            .iter()
            .filter(|(_, r)| r.ty == ty)
            .map(|(id, r)| (id.as_str(), r))
            .collect()
    }

    pub fn resource_count_is(&self, ty: &str, count: usize) -> bool {
        self.find_resources(ty).len() == count
    }

    /// true if at least one resource of type `ty` has properties that
    /// contain `expected` (object keys are matched as a subset, recursively).
    pub fn has_resource_properties(&self, ty: &str, expected: &Value) -> bool {
        self.find_resources(ty)
            .iter()
            .any(|(_, r)| value_matches(&r.properties, expected))
    }

    /// like `has_resource_properties` but matched against the whole resource
    /// entry, so policies and `DependsOn` can be asserted too.
    pub fn has_resource(&self, ty: &str, expected: &Value) -> bool {
        self.find_resources(ty).iter().any(|(_, r)| {
            serde_json::to_value(r)
                .map(|actual| value_matches(&actual, expected))
                .unwrap_or(false)
        })
    }

    pub fn has_output(&self, id: &str, expected: &Value) -> bool {
        match self.outputs.get(id) {
            Some(output) => serde_json::to_value(output)
                .map(|actual| value_matches(&actual, expected))
                .unwrap_or(false),
            None => false,
        }
    }
}

/// objects match when every expected key is present and matches.
/// arrays must have equal length and match element-wise.
/// everything else must be equal.
pub fn value_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(k, v)| actual.get(k).map_or(false, |a| value_matches(a, v))),
        (Value::Array(actual), Value::Array(expected)) => {
            actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| value_matches(a, e))
        }
        _ => actual == expected,
    }
}
