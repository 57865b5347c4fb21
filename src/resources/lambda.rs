use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{get_att, CfnRole, LogGroup};
use crate::error::{Error, Result};
use crate::stack::Stack;
use crate::template::CfnResource;

pub const FUNCTION_TYPE: &str = "AWS::Lambda::Function";
pub const ASSET_BUCKET: &str = "cdk-hnb659fds-assets-${AWS::AccountId}-${AWS::Region}";
const ENTRY_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs", ".ts", ".mts", ".cts", ".tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Nodejs18x,
    Nodejs20x,
    Nodejs22x,
}

impl Runtime {
    pub fn name(&self) -> &'static str {
        match self {
            Runtime::Nodejs18x => "nodejs18.x",
            Runtime::Nodejs20x => "nodejs20.x",
            Runtime::Nodejs22x => "nodejs22.x",
        }
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Cjs,
    Esm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlingOptions {
    pub minify: bool,
    /// order in which package.json fields are tried when resolving imports.
    /// empty means the bundler default.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub main_fields: Vec<String>,
    pub source_map: bool,
    pub format: OutputFormat,
    /// code prepended to the bundle, eg: a `require` shim for esm output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NodejsFunctionProps {
    pub runtime: Runtime,
    /// path to the source file containing the handler.
    pub entry: String,
    /// name of the exported function in `entry`. Defaults to `handler`.
    pub handler: String,
    /// physical name of the function. auto-generated by cloudformation when `None`.
    /// max 64 characters.
    pub function_name: Option<String>,
    /// memory to give your function (in MB). Defaults to 128.
    /// Valid values: 128 - 10240
    pub memory_size: u32,
    /// timeout of your function (in seconds). Defaults to 3.
    /// Valid values: 1 - 900
    pub timeout: u32,
    pub environment: BTreeMap<String, String>,
    pub bundling: BundlingOptions,
    /// send the function's logs to this group instead of the implicit
    /// `/aws/lambda/<name>` group lambda would create on first invocation.
    pub log_group: Option<LogGroup>,
}

impl Default for NodejsFunctionProps {
    fn default() -> Self {
        Self {
            runtime: Runtime::Nodejs20x,
            entry: "index.ts".into(),
            handler: "handler".into(),
            function_name: None,
            memory_size: 128,
            timeout: 3,
            environment: Default::default(),
            bundling: Default::default(),
            log_group: None,
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    first_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl NodejsFunctionProps {
    pub fn is_valid(&self) -> Result<()> {
        if let Some(name) = &self.function_name {
            let valid_chars = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if name.is_empty() || name.len() > 64 || !valid_chars {
                return Err(Error::InvalidFunctionName(name.clone()));
            }
        }
        if !(128..=10240).contains(&self.memory_size) {
            return Err(Error::InvalidMemorySize(self.memory_size));
        }
        if !(1..=900).contains(&self.timeout) {
            return Err(Error::InvalidTimeout(self.timeout));
        }
        if !is_identifier(&self.handler) {
            return Err(Error::InvalidHandler(self.handler.clone()));
        }
        if !ENTRY_EXTENSIONS.iter().any(|ext| self.entry.ends_with(ext)) {
            return Err(Error::InvalidEntry(self.entry.clone()));
        }
        Ok(())
    }

    /// the bundled output is always written to `index.js`, so the handler
    /// property is the exported symbol prefixed with `index.`
    pub fn handler_property(&self) -> String {
        format!("index.{}", self.handler)
    }

    pub fn environment_variables(&self) -> BTreeMap<String, String> {
        let mut vars = self.environment.clone();
        if self.bundling.source_map {
            vars.entry("NODE_OPTIONS".into())
                .or_insert_with(|| "--enable-source-maps".into());
        }
        vars
    }

    fn bundling_metadata(&self) -> Value {
        json!({
            "entry": self.entry,
            "runtime": self.runtime.name(),
            "options": self.bundling,
        })
    }

    /// fingerprint of the bundling configuration (entry path, runtime and
    /// options), used as the s3 key of the code asset. the contents of the
    /// entry file are not read, so editing the source keeps the same key.
    pub fn asset_hash(&self) -> String {
        let data = self.bundling_metadata().to_string();
        format!("{:08x}", adler::adler32_slice(data.as_bytes()))
    }
}

#[derive(Debug, Clone)]
pub struct CfnFunction {
    pub function_name: Option<String>,
    pub runtime: Runtime,
    pub handler: String,
    pub code_key: String,
    pub role: Value,
    pub memory_size: u32,
    pub timeout: u32,
    pub environment: BTreeMap<String, String>,
    pub log_group: Option<Value>,
}

impl CfnResource for CfnFunction {
    fn type_string(&self) -> &'static str {
        FUNCTION_TYPE
    }

    fn properties(&self) -> Value {
        let mut props = Map::new();
        props.insert("Code".into(), json!({
            "S3Bucket": { "Fn::Sub": ASSET_BUCKET },
            "S3Key": self.code_key,
        }));
        if let Some(name) = &self.function_name {
            props.insert("FunctionName".into(), json!(name));
        }
        props.insert("Handler".into(), json!(self.handler));
        props.insert("Runtime".into(), json!(self.runtime.name()));
        props.insert("Role".into(), self.role.clone());
        props.insert("MemorySize".into(), json!(self.memory_size));
        props.insert("Timeout".into(), json!(self.timeout));
        if !self.environment.is_empty() {
            props.insert("Environment".into(), json!({ "Variables": self.environment }));
        }
        if let Some(group) = &self.log_group {
            props.insert("LoggingConfig".into(), json!({ "LogGroup": group }));
        }
        Value::Object(props)
    }
}

/// a node.js function bundled from a single entry file, together with its
/// execution role.
#[derive(Debug, Clone)]
pub struct NodejsFunction {
    logical_id: String,
    role_logical_id: String,
    function_name: Option<String>,
    runtime: Runtime,
}

impl NodejsFunction {
    pub fn new(stack: &mut Stack, id: &str, props: NodejsFunctionProps) -> Result<Self> {
        props.is_valid()?;
        stack.claim_id(id)?;

        let (role_logical_id, _) = stack.add_resource(&[id, "ServiceRole", "Resource"], &CfnRole::lambda_execution_role())?;

        let asset_hash = props.asset_hash();
        let function = CfnFunction {
            function_name: props.function_name.clone(),
            runtime: props.runtime,
            handler: props.handler_property(),
            code_key: format!("{asset_hash}.zip"),
            role: get_att(&role_logical_id, "Arn"),
            memory_size: props.memory_size,
            timeout: props.timeout,
            environment: props.environment_variables(),
            log_group: props.log_group.as_ref().map(|g| g.log_group_ref()),
        };
        let (logical_id, entry) = stack.add_resource(&[id, "Resource"], &function)?;
        entry.depends_on = vec![role_logical_id.clone()];
        entry.metadata = Some(json!({
            "aws:asset:path": format!("asset.{asset_hash}"),
            "aws:asset:is-bundled": true,
            "aws:asset:property": "Code",
            "cdkstarter:bundling": props.bundling_metadata(),
        }));

        Ok(Self {
            logical_id,
            role_logical_id,
            function_name: props.function_name,
            runtime: props.runtime,
        })
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn role_logical_id(&self) -> &str {
        &self.role_logical_id
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    pub fn function_arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{log_group_name_for, LogGroupProps, RemovalPolicy, RetentionDays};
    use crate::stack::StackProps;
    use crate::App;

    fn esm() -> BundlingOptions {
        BundlingOptions {
            minify: true,
            main_fields: vec!["module".into(), "main".into()],
            source_map: true,
            format: OutputFormat::Esm,
            banner: None,
        }
    }

    #[test]
    fn validates_props() {
        let ok = NodejsFunctionProps::default();
        assert!(ok.is_valid().is_ok());

        let cases = [
            NodejsFunctionProps { memory_size: 64, ..Default::default() },
            NodejsFunctionProps { memory_size: 20000, ..Default::default() },
            NodejsFunctionProps { timeout: 0, ..Default::default() },
            NodejsFunctionProps { timeout: 901, ..Default::default() },
            NodejsFunctionProps { function_name: Some("x".repeat(65)), ..Default::default() },
            NodejsFunctionProps { function_name: Some("has space".into()), ..Default::default() },
            NodejsFunctionProps { handler: "index.handler".into(), ..Default::default() },
            NodejsFunctionProps { handler: "".into(), ..Default::default() },
            NodejsFunctionProps { entry: "src/index.py".into(), ..Default::default() },
        ];
        for case in cases {
            assert!(case.is_valid().is_err(), "expected {:?} to be invalid", case);
        }
    }

    #[test]
    fn source_maps_enable_node_option() {
        let props = NodejsFunctionProps { bundling: esm(), ..Default::default() };
        assert_eq!(props.environment_variables()["NODE_OPTIONS"], "--enable-source-maps");

        let mut env = BTreeMap::new();
        env.insert("NODE_OPTIONS".to_string(), "--max-old-space-size=100".to_string());
        let props = NodejsFunctionProps { bundling: esm(), environment: env, ..Default::default() };
        assert_eq!(props.environment_variables()["NODE_OPTIONS"], "--max-old-space-size=100");

        assert!(NodejsFunctionProps::default().environment_variables().is_empty());
    }

    #[test]
    fn asset_hash_tracks_bundling_inputs() {
        let a = NodejsFunctionProps { bundling: esm(), ..Default::default() };
        let b = NodejsFunctionProps { bundling: esm(), ..Default::default() };
        let c = NodejsFunctionProps {
            bundling: BundlingOptions { minify: false, ..esm() },
            ..Default::default()
        };
        assert_eq!(a.asset_hash(), b.asset_hash());
        assert_ne!(a.asset_hash(), c.asset_hash());
    }

    #[test]
    fn asset_hash_covers_entry_path_and_runtime_only() {
        let base = NodejsFunctionProps { bundling: esm(), ..Default::default() };
        let moved = NodejsFunctionProps { entry: "src/other.ts".into(), ..base.clone() };
        let node22 = NodejsFunctionProps { runtime: Runtime::Nodejs22x, ..base.clone() };
        let tuned = NodejsFunctionProps { memory_size: 1024, timeout: 30, ..base.clone() };
        assert_ne!(base.asset_hash(), moved.asset_hash());
        assert_ne!(base.asset_hash(), node22.asset_hash());
        assert_eq!(base.asset_hash(), tuned.asset_hash());
        // the entry does not have to exist on disk
        assert_eq!(base.asset_hash().len(), 8);
    }

    #[test]
    fn renders_function_and_role() {
        let mut app = App::with_outdir("unused");
        let stack = app.add_stack("FnStack", StackProps::default()).unwrap();
        let function = NodejsFunction::new(stack, "MyFunction", NodejsFunctionProps {
            entry: "../src/index.ts".into(),
            bundling: esm(),
            ..Default::default()
        }).unwrap();

        let template = stack.template();
        assert!(template.resource_count_is(FUNCTION_TYPE, 1));
        assert!(template.resource_count_is("AWS::IAM::Role", 1));
        assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({
            "Runtime": "nodejs20.x",
            "Handler": "index.handler",
            "Role": { "Fn::GetAtt": [function.role_logical_id(), "Arn"] },
        })));
        assert!(template.has_resource(FUNCTION_TYPE, &json!({
            "DependsOn": [function.role_logical_id()],
            "Metadata": { "cdkstarter:bundling": { "options": {
                "minify": true,
                "mainFields": ["module", "main"],
                "sourceMap": true,
                "format": "esm",
            } } },
        })));
        let props = &template.resources[function.logical_id()].properties;
        assert!(props.get("FunctionName").is_none());
        assert!(props.get("LoggingConfig").is_none());
    }

    #[test]
    fn references_log_group() {
        let mut app = App::with_outdir("unused");
        let stack = app.add_stack("FnStack", StackProps::default()).unwrap();
        let group = LogGroup::new(stack, "Logs", LogGroupProps {
            log_group_name: Some(log_group_name_for("named-fn")),
            retention: RetentionDays::OneDay,
            removal_policy: RemovalPolicy::Destroy,
        }).unwrap();
        let function = NodejsFunction::new(stack, "MyFunction", NodejsFunctionProps {
            runtime: Runtime::Nodejs22x,
            function_name: Some("named-fn".into()),
            log_group: Some(group.clone()),
            ..Default::default()
        }).unwrap();
        assert_eq!(function.function_name(), Some("named-fn"));

        let template = stack.template();
        assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({
            "FunctionName": "named-fn",
            "Runtime": "nodejs22.x",
            "LoggingConfig": { "LogGroup": { "Ref": group.logical_id() } },
        })));
    }

    #[test]
    fn duplicate_function_ids_fail() {
        let mut app = App::with_outdir("unused");
        let stack = app.add_stack("FnStack", StackProps::default()).unwrap();
        NodejsFunction::new(stack, "MyFunction", NodejsFunctionProps::default()).unwrap();
        let err = NodejsFunction::new(stack, "MyFunction", NodejsFunctionProps::default()).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }
}
