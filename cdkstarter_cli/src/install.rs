use std::path::Path;
use std::process::Command;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Result, ScaffoldError};

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// runs `<npm> install` inside `project_dir`, capturing its output.
pub fn npm_install(npm: &str, project_dir: &Path) -> Result<()> {
    let command = format!("{npm} install");
    tracing::info!(dir = %project_dir.display(), %command, "installing dependencies");

    let output = Command::new(npm)
        .arg("install")
        .current_dir(project_dir)
        .output()
        .map_err(|source| ScaffoldError::Spawn { command: command.clone(), source })?;

    if !output.status.success() {
        return Err(ScaffoldError::InstallFailed {
            command,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
