use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use cdkstarter::logging::{self, LoggingConfig};
use cdkstarter_cli::config::ScaffoldConfig;
use cdkstarter_cli::install::{npm_install, spinner};
use cdkstarter_cli::templates::StackVariant;
use cdkstarter_cli::{next_steps, scaffold, RemoteConfig, ScaffoldOptions};

/// Create a new TypeScript CDK project with a single Lambda function
#[derive(Parser, Debug)]
#[command(name = "cdkstarter", version)]
pub struct Cli {
    /// Name of the app, also the name of the directory that is created
    pub app_name: String,

    #[arg(long, help = "Skip running npm install")]
    pub no_install: bool,

    #[arg(long, help = "Generate a stack whose function logs to a one day log group")]
    pub log_group: bool,

    #[arg(long, help = "Write the bundled tsconfig.json and biome.json instead of fetching them")]
    pub offline: bool,

    #[arg(long, env = "CDKSTARTER_CONFIG", value_name = "PATH", help = "TOML file with scaffolder defaults")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "CDKSTARTER_TSCONFIG_URL", value_name = "URL")]
    pub tsconfig_url: Option<String>,

    #[arg(long, env = "CDKSTARTER_BIOME_URL", value_name = "URL")]
    pub biome_url: Option<String>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,
}

impl Cli {
    /// flags win over the config file.
    fn options(&self, config: ScaffoldConfig) -> anyhow::Result<ScaffoldOptions> {
        let parent = std::env::current_dir().context("Failed to read the current directory")?;
        let variant = if self.log_group || config.with_log_group {
            StackVariant::WithLogGroup
        } else {
            StackVariant::FunctionOnly
        };
        let remote = if self.offline || !config.remote_config {
            None
        } else {
            Some(RemoteConfig {
                tsconfig_url: self.tsconfig_url.clone().unwrap_or(config.tsconfig_url),
                biome_url: self.biome_url.clone().unwrap_or(config.biome_url),
            })
        };
        Ok(ScaffoldOptions { parent, variant, remote })
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ScaffoldConfig::load_or_default(cli.config.as_deref())?;
    let npm = config.npm_command.clone();
    let options = cli.options(config)?;

    let progress = spinner("Creating project...");
    let project = match scaffold(&cli.app_name, &options) {
        Ok(project) => project,
        Err(e) => {
            progress.finish_with_message("Failed to create project!");
            return Err(e.into());
        }
    };
    progress.finish_with_message(format!("Created {} files in {}", project.files.len(), project.paths.root.display()));

    if cli.no_install {
        debug!("skipping install");
    } else {
        let progress = spinner("Installing npm packages...");
        if let Err(e) = npm_install(&npm, &project.paths.root) {
            progress.finish_with_message("npm install failed!");
            return Err(e).with_context(|| format!("Project created in {}, but its dependencies are not installed", project.paths.root.display()));
        }
        progress.finish_with_message("New CDK project created successfully!");
    }

    println!("\n{}", next_steps(&project.paths.root));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let mut logging_config = LoggingConfig::from_env();
    if let Some(level) = &cli.log_level {
        logging_config.level = logging::parse_level(level);
    }
    logging::init_logging(logging_config);
    debug!("Arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
