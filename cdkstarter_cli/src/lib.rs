//! Scaffolds a new TypeScript CDK project with a single Lambda function,
//! its stack, a vitest suite and the shared lint/compiler configs.

use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod install;
pub mod names;
pub mod project;
pub mod remote;
pub mod templates;

pub use error::{Result, ScaffoldError};

use names::{generate_app_names, validate_and_normalize_app_name, verify_function_name, AppNames};
use project::{write_project_files, ProjectPaths};
use remote::{fetch_config_files, ConfigFiles};
use templates::{render_project, StackVariant};

#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// directory the project directory is created in.
    pub parent: PathBuf,
    pub variant: StackVariant,
    /// `None` writes the bundled config files.
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub tsconfig_url: String,
    pub biome_url: String,
}

#[derive(Debug)]
pub struct Scaffolded {
    pub app_name: String,
    pub names: AppNames,
    pub paths: ProjectPaths,
    pub files: Vec<PathBuf>,
}

/// validates the name, renders every template and writes the project. does
/// not install dependencies.
///
/// the remote configs are fetched before anything touches the disk, so a
/// failed fetch leaves no half written project behind.
pub fn scaffold(app_name: &str, options: &ScaffoldOptions) -> Result<Scaffolded> {
    let app_name = validate_and_normalize_app_name(app_name, &options.parent)?;
    let names = generate_app_names(&app_name);
    if options.variant == StackVariant::WithLogGroup {
        verify_function_name(&names)?;
    }
    tracing::info!(%app_name, lower = %names.lower, pascal = %names.pascal, variant = ?options.variant, "scaffolding");

    let files = render_project(&names, options.variant)?;
    let configs = match &options.remote {
        Some(remote) => fetch_config_files(&remote.tsconfig_url, &remote.biome_url)?,
        None => ConfigFiles::bundled(),
    };

    let paths = ProjectPaths::new(options.parent.join(&app_name));
    paths.create_directories()?;
    let files = write_project_files(&paths, &files, &configs)?;

    Ok(Scaffolded { app_name, names, paths, files })
}

pub fn next_steps(project: &Path) -> String {
    let dir = project.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    format!("To start working, run:\n\ncd {dir}")
}
