use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::stack::{Stack, StackProps};

pub const DEFAULT_OUTDIR: &str = "cdk.out";
pub const OUTDIR_ENV: &str = "CDK_OUTDIR";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_VERSION: &str = "36.0.0";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ArtifactProperties {
    #[serde(rename = "templateFile")]
    pub template_file: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub ty: String,
    pub environment: String,
    pub properties: ArtifactProperties,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub version: String,
    pub artifacts: BTreeMap<String, Artifact>,
}

/// the result of `App::synth`: where everything was written.
#[derive(Debug)]
pub struct CloudAssembly {
    pub directory: PathBuf,
    pub manifest: Manifest,
    pub templates: Vec<PathBuf>,
}

/// root of the construct tree. owns every stack declared in it.
#[derive(Debug)]
pub struct App {
    outdir: PathBuf,
    stacks: Vec<Stack>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// uses `$CDK_OUTDIR` as the output directory if set, otherwise `cdk.out`.
    pub fn new() -> Self {
        let outdir = std::env::var(OUTDIR_ENV).unwrap_or_else(|_| DEFAULT_OUTDIR.to_string());
        Self::with_outdir(outdir)
    }

    pub fn with_outdir<P: Into<PathBuf>>(outdir: P) -> Self {
        Self { outdir: outdir.into(), stacks: vec![] }
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn add_stack(&mut self, id: &str, props: StackProps) -> Result<&mut Stack> {
        if self.stacks.iter().any(|s| s.id() == id) {
            return Err(Error::DuplicateId { scope: "the app".to_string(), id: id.to_string() });
        }
        let stack = Stack::new(id, props)?;
        // stack names are also the template file names, so they must be unique
        if self.stacks.iter().any(|s| s.stack_name() == stack.stack_name()) {
            return Err(Error::DuplicateId { scope: "the app".to_string(), id: stack.stack_name().to_string() });
        }
        debug!(stack = %stack.id(), name = %stack.stack_name(), "declared stack");
        self.stacks.push(stack);
        let last = self.stacks.len() - 1;
        Ok(&mut self.stacks[last])
    }

    pub fn stack(&self, id: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.id() == id)
    }

    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }

    fn environment_string(stack: &Stack) -> String {
        let env = stack.env();
        let account = env.account.as_deref().unwrap_or("unknown-account");
        let region = env.region.as_deref().unwrap_or("unknown-region");
        format!("aws://{account}/{region}")
    }

    /// renders every stack to `<outdir>/<StackName>.template.json`, followed by
    /// a `manifest.json` listing them.
    pub fn synth(&self) -> Result<CloudAssembly> {
        std::fs::create_dir_all(&self.outdir).map_err(|source| Error::Write {
            path: self.outdir.clone(),
            source,
        })?;
        let mut manifest = Manifest { version: MANIFEST_VERSION.to_string(), artifacts: BTreeMap::new() };
        let mut templates = vec![];
        for stack in &self.stacks {
            let file_name = format!("{}.template.json", stack.stack_name());
            let path = self.outdir.join(&file_name);
            let body = stack.template().to_json_pretty()?;
            write_file(&path, &body)?;
            info!(stack = %stack.stack_name(), path = %path.display(), "synthesized template");
            manifest.artifacts.insert(stack.stack_name().to_string(), Artifact {
                ty: "aws:cloudformation:stack".to_string(),
                environment: Self::environment_string(stack),
                properties: ArtifactProperties { template_file: file_name },
            });
            templates.push(path);
        }
        let manifest_path = self.outdir.join(MANIFEST_FILE);
        write_file(&manifest_path, &serde_json::to_string_pretty(&manifest)?)?;
        Ok(CloudAssembly { directory: self.outdir.clone(), manifest, templates })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::Write { path: path.to_path_buf(), source })
}
