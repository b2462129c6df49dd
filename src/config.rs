//! CLI configuration and runtime settings for theme config resolution.

use clap::Parser;
use std::path::PathBuf;

use crate::loader::discover_default_config;

/// Theme configuration resolver and content scanner
#[derive(Parser, Debug)]
#[command(name = "windlass")]
#[command(version)]
#[command(about = "Resolve theme configuration fragments and scan content globs")]
pub struct Cli {
    /// Project root directory
    #[arg(default_value = ".")]
    pub project_root: PathBuf,

    /// Configuration fragments, merged in order (later overrides earlier)
    #[arg(short, long = "config")]
    pub config: Vec<PathBuf>,

    /// Number of parallel workers
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub jobs: usize,

    /// Validate and merge only, skip the content scan
    #[arg(long)]
    pub check: bool,

    /// Print the resolved configuration as JSON to stdout
    #[arg(long)]
    pub print: bool,

    /// Write the resolved configuration as JSON to a file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runtime configuration parsed from CLI
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root directory
    pub project_root: PathBuf,
    /// Ordered fragment chain (explicit flags, or a discovered default)
    pub fragments: Vec<PathBuf>,
    /// Number of parallel workers
    pub jobs: usize,
    /// Validate and merge only
    pub check: bool,
    /// Print resolved config to stdout
    pub print: bool,
    /// Write resolved config to this file
    pub out: Option<PathBuf>,
    /// Enable verbose output
    pub verbose: bool,
}

impl Config {
    /// Create Config from CLI arguments
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let project_root = cli
            .project_root
            .canonicalize()
            .unwrap_or(cli.project_root);

        let fragments = if cli.config.is_empty() {
            match discover_default_config(&project_root) {
                Some(path) => vec![path],
                None => anyhow::bail!(
                    "no configuration found in {} (expected theme.config.json); pass -c/--config",
                    project_root.display()
                ),
            }
        } else {
            cli.config
        };

        Ok(Config {
            project_root,
            fragments,
            jobs: cli.jobs.max(1),
            check: cli.check,
            print: cli.print,
            out: cli.out,
            verbose: cli.verbose,
        })
    }
}
