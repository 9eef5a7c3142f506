// Wed Oct 21 2026 - Alex

use crate::config::{Config, RemainingOrder, DEFAULT_LOG_LEVEL};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "order-file-generator")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Builds linker order files from a link map and a startup address trace", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Overrides the config file's `log_level` (default: info)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write an order file from a link map and a captured trace
    Generate(GenerateArgs),
    /// Print the symbols a captured trace resolves to, in trace order
    Resolve(ResolveArgs),
    /// Export the link map's text symbol addresses as a JSON array
    Addresses(AddressesArgs),
    /// Summarise a link map
    Stats(StatsArgs),
}

/// Link map input shared by every command.
#[derive(ClapArgs, Debug, Clone)]
pub struct MapArgs {
    #[arg(short = 'm', long)]
    pub linkmap: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Library prefix whose symbols are never reordered (repeatable)
    #[arg(long = "exclude-library")]
    pub exclude_library: Vec<String>,

    /// Drop the built-in library exclusions
    #[arg(long)]
    pub no_default_exclusions: bool,
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub map: MapArgs,

    #[arg(short, long)]
    pub capture: PathBuf,

    #[arg(short, long, default_value = "order_file.txt")]
    pub output: PathBuf,

    /// Sort symbols after the remaining-symbols marker by address
    #[arg(long)]
    pub sort_remaining: bool,

    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub map: MapArgs,

    #[arg(short, long)]
    pub capture: PathBuf,

    /// Print `object.o:symbol` instead of bare names
    #[arg(long)]
    pub qualified: bool,
}

#[derive(ClapArgs, Debug)]
pub struct AddressesArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Defaults to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// List every name defined by more than one object file
    #[arg(long)]
    pub collisions: bool,
}

impl Args {
    /// `--log-level`, else the level from `--config`, else the default.
    pub fn effective_log_level(&self) -> String {
        if let Some(level) = &self.log_level {
            return level.clone();
        }
        match &self.command.map_args().config {
            Some(path) => Config::load_or_default(path).log_level,
            None => DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Command {
    pub fn map_args(&self) -> &MapArgs {
        match self {
            Command::Generate(args) => &args.map,
            Command::Resolve(args) => &args.map,
            Command::Addresses(args) => &args.map,
            Command::Stats(args) => &args.map,
        }
    }
}

impl MapArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.linkmap.exists() {
            return Err(format!("Link map does not exist: {:?}", self.linkmap));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        Ok(())
    }

    /// The config file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if self.no_default_exclusions {
            config = config.without_excluded_libraries();
        }
        for prefix in &self.exclude_library {
            config = config.with_excluded_library_prefix(prefix.as_str());
        }

        config.validate()?;
        Ok(config)
    }
}

impl GenerateArgs {
    pub fn validate(&self) -> Result<(), String> {
        self.map.validate()?;
        if !self.capture.exists() {
            return Err(format!("Capture file does not exist: {:?}", self.capture));
        }
        if self.output.is_dir() {
            return Err(format!("Output path is a directory: {:?}", self.output));
        }
        Ok(())
    }

    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let config = self.map.resolve_config()?;
        if self.sort_remaining {
            return Ok(config.with_remaining_order(RemainingOrder::Address));
        }
        Ok(config)
    }
}

impl ResolveArgs {
    pub fn validate(&self) -> Result<(), String> {
        self.map.validate()?;
        if !self.capture.exists() {
            return Err(format!("Capture file does not exist: {:?}", self.capture));
        }
        Ok(())
    }
}
