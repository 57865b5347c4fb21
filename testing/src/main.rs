//! Snapshot tests for the rendered example stacks. Run from the workspace
//! root: `cargo run -p testing [-- --update <Stack>... | --update-all]`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use clap::Parser;

const SNAPSHOT_DIR: &str = "./testing/snapshots";
const SCRATCH_DIR: &str = "./target/snapshot-out";

/// entry point binary of `cdkstarter_stacks`, and the stack it renders.
const STACKS: &[(&str, &str)] = &[
    ("biometest", "BiomeTestStack"),
    ("referenceproject", "ReferenceProjectStack"),
    ("ultimatetest", "UltimateTestStack"),
];

#[derive(Parser, Debug)]
struct Args {
    /// Overwrite the snapshot of this stack instead of comparing
    #[arg(long = "update", value_name = "STACK")]
    updates: Vec<String>,

    /// Delete every snapshot and record them again
    #[arg(long, conflicts_with = "updates")]
    update_all: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn compare_files(old: &Path, new: &Path, stack: &str) -> anyhow::Result<()> {
    let cmd = Command::new("git")
        .args(["--no-pager", "diff", "--no-index", "--"])
        .arg(old)
        .arg(new)
        .output()
        .with_context(|| format!("Failed to run git diff on {} and {}", old.display(), new.display()))?;
    // exit 0: files are the same.
    if cmd.status.success() {
        return Ok(());
    }
    let err = String::from_utf8_lossy(&cmd.stderr);
    let out = String::from_utf8_lossy(&cmd.stdout);
    bail!("{stack} failed snapshot test!\n{err}\n{out}\n\nIf this change is expected, re-run the testing program with --update {stack}")
}

/// renders one stack into its own scratch directory and returns the
/// template path.
fn synth(bin: &str, stack: &str) -> anyhow::Result<PathBuf> {
    let outdir = PathBuf::from(SCRATCH_DIR).join(bin);
    let _ = std::fs::remove_dir_all(&outdir);

    println!("Running {bin}");
    let cmd = Command::new("cargo")
        .args(["run", "-q", "-p", "cdkstarter_stacks", "--bin", bin])
        .env("CDK_OUTDIR", &outdir)
        .output()
        .context("Failed to run cargo")?;
    if !cmd.status.success() {
        let err = String::from_utf8_lossy(&cmd.stderr);
        bail!("Failed to synthesize {stack}:\n{err}");
    }

    let template = outdir.join(format!("{stack}.template.json"));
    std::fs::metadata(&template).with_context(|| format!("{bin} did not write {}", template.display()))?;
    Ok(template)
}

fn write_snapshot(bin: &str, stack: &str, updates: &[String]) -> anyhow::Result<()> {
    let rendered = synth(bin, stack)?;
    let snapshot = PathBuf::from(SNAPSHOT_DIR).join(format!("{stack}.template.json"));

    if snapshot.exists() {
        if updates.iter().any(|u| u == stack) {
            println!("Updating {stack}");
        } else {
            compare_files(&snapshot, &rendered, stack)?;
            println!("✓ {stack}");
            return Ok(());
        }
    } else {
        println!("New {stack}");
    }
    std::fs::copy(&rendered, &snapshot)
        .with_context(|| format!("Error copying {} to {}", rendered.display(), snapshot.display()))?;
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    if !Path::new("./stacks").is_dir() || !Path::new("./testing").is_dir() {
        bail!("Did not find stacks/ and testing/ directory. Are you running this from the workspace root?");
    }
    for update in &args.updates {
        if !STACKS.iter().any(|(_, stack)| *stack == update.as_str()) {
            bail!("Unknown stack {update}. Known stacks: {}", STACKS.iter().map(|(_, s)| *s).collect::<Vec<_>>().join(", "));
        }
    }

    if args.update_all {
        let _ = std::fs::remove_dir_all(SNAPSHOT_DIR);
    }
    if !Path::new(SNAPSHOT_DIR).is_dir() {
        println!("No snapshots yet. Recording them.");
        std::fs::create_dir_all(SNAPSHOT_DIR).context("Failed to create the snapshot directory")?;
    }

    for (bin, stack) in STACKS {
        write_snapshot(bin, stack, &args.updates)?;
    }
    Ok(())
}
