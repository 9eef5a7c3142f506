// Wed Oct 21 2026 - Alex

use super::args::{Args, Command};
use super::commands::{CommandContext, CommandExecutor};
use crate::utils::LoggingUtils;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            colored::control::set_override(false);
        }
        self.setup_logging(&args)?;

        let ctx = CommandContext { quiet: args.quiet };
        let executor: &dyn CommandExecutor = match &args.command {
            Command::Generate(gen_args) => gen_args,
            Command::Resolve(resolve_args) => resolve_args,
            Command::Addresses(addresses_args) => addresses_args,
            Command::Stats(stats_args) => stats_args,
        };

        log::debug!("Executing {} command", executor.name());
        executor.execute(&ctx)
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = LoggingUtils::level_from_str(&args.effective_log_level());

        if let Some(path) = &args.log_file {
            LoggingUtils::init_logger_with_file(level, path)?;
        } else if LoggingUtils::env_configured() {
            LoggingUtils::init_from_env();
        } else {
            LoggingUtils::init_logger(level, !args.no_color);
        }

        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
