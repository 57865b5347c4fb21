//! The embedded project templates and the placeholder substitution applied
//! to them.

use std::path::PathBuf;

use crate::error::{Result, ScaffoldError};
use crate::names::AppNames;

pub const PASCAL_PLACEHOLDER: &str = "pascalcase-name";
pub const LOWER_PLACEHOLDER: &str = "lowercase-name";

pub const PACKAGE_JSON: &str = include_str!("../templates/package.json");
pub const CDK_JSON: &str = include_str!("../templates/cdk.json");
pub const VITEST_CONFIG: &str = include_str!("../templates/vitest.config.ts");
pub const GITIGNORE: &str = include_str!("../templates/gitignore");
pub const BIN_FILE: &str = include_str!("../templates/binfile.ts");
pub const LIB_FILE: &str = include_str!("../templates/libfile.ts");
pub const LIB_FILE_LOG_GROUP: &str = include_str!("../templates/libfile-loggroup.ts");
pub const TEST_FILE: &str = include_str!("../templates/testfile.ts");
pub const TEST_FILE_LOG_GROUP: &str = include_str!("../templates/testfile-loggroup.ts");
pub const CONTEXT_FILE: &str = include_str!("../templates/contextfile.ts");
pub const SRC_FILE: &str = include_str!("../templates/srcfile.ts");
pub const PAYLOAD: &str = include_str!("../templates/payload.json");
pub const CDK_CONTEXT: &str = include_str!("../templates/cdk.context.json");

/// bundled copies written when the remote configs are not fetched.
pub const FALLBACK_TSCONFIG: &str = include_str!("../templates/tsconfig.json");
pub const FALLBACK_BIOME: &str = include_str!("../templates/biome.json");

/// which stack the generated lib/test pair declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackVariant {
    /// a nodejs20.x function and nothing else.
    #[default]
    FunctionOnly,
    /// a named nodejs22.x function logging to a one day log group.
    WithLogGroup,
}

impl StackVariant {
    fn lib_template(&self) -> &'static str {
        match self {
            StackVariant::FunctionOnly => LIB_FILE,
            StackVariant::WithLogGroup => LIB_FILE_LOG_GROUP,
        }
    }

    fn test_template(&self) -> &'static str {
        match self {
            StackVariant::FunctionOnly => TEST_FILE,
            StackVariant::WithLogGroup => TEST_FILE_LOG_GROUP,
        }
    }
}

/// a file to be written, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: PathBuf,
    pub contents: String,
}

impl ProjectFile {
    fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self { path: path.into(), contents: contents.into() }
    }
}

pub fn render(template: &str, names: &AppNames) -> String {
    template
        .replace(PASCAL_PLACEHOLDER, &names.pascal)
        .replace(LOWER_PLACEHOLDER, &names.lower)
}

fn render_checked(label: &'static str, template: &str, names: &AppNames) -> Result<String> {
    let out = render(template, names);
    if out.contains(PASCAL_PLACEHOLDER) || out.contains(LOWER_PLACEHOLDER) {
        return Err(ScaffoldError::UnrenderedPlaceholder(label));
    }
    Ok(out)
}

/// every templated file of a new project. `tsconfig.json` and `biome.json`
/// are not templated and come from [`crate::remote`].
pub fn render_project(names: &AppNames, variant: StackVariant) -> Result<Vec<ProjectFile>> {
    let lower = &names.lower;
    let files = vec![
        ProjectFile::new(".gitignore", GITIGNORE),
        ProjectFile::new("package.json", render_checked("package.json", PACKAGE_JSON, names)?),
        ProjectFile::new("cdk.json", render_checked("cdk.json", CDK_JSON, names)?),
        ProjectFile::new("cdk.context.json", CDK_CONTEXT),
        ProjectFile::new("vitest.config.ts", VITEST_CONFIG),
        ProjectFile::new(format!("bin/{lower}.ts"), render_checked("bin", BIN_FILE, names)?),
        ProjectFile::new(format!("lib/{lower}-stack.ts"), render_checked("lib", variant.lib_template(), names)?),
        ProjectFile::new(format!("test/{lower}.test.ts"), render_checked("test", variant.test_template(), names)?),
        ProjectFile::new("test/context.ts", CONTEXT_FILE),
        ProjectFile::new("src/index.ts", SRC_FILE),
        ProjectFile::new("events/payload.json", PAYLOAD),
    ];
    Ok(files)
}
