use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::remote::ConfigFiles;
use crate::templates::ProjectFile;

/// directory layout of a generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub bin: PathBuf,
    pub lib: PathBuf,
    pub test: PathBuf,
    pub src: PathBuf,
    pub events: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            bin: root.join("bin"),
            lib: root.join("lib"),
            test: root.join("test"),
            src: root.join("src"),
            events: root.join("events"),
            root,
        }
    }

    pub fn create_directories(&self) -> Result<()> {
        for dir in [&self.bin, &self.lib, &self.test, &self.src, &self.events] {
            std::fs::create_dir_all(dir).map_err(|source| ScaffoldError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| ScaffoldError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// writes the rendered files and the two config files under the project
/// root. returns the absolute paths written, in order.
pub fn write_project_files(paths: &ProjectPaths, files: &[ProjectFile], configs: &ConfigFiles) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len() + 2);
    for file in files {
        let path = paths.root.join(&file.path);
        write(&path, &file.contents)?;
        tracing::debug!(path = %path.display(), "wrote");
        written.push(path);
    }
    for (name, contents) in [("tsconfig.json", &configs.tsconfig), ("biome.json", &configs.biome)] {
        let path = paths.root.join(name);
        write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}
