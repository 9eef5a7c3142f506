// Wed Oct 21 2026 - Alex

pub mod args;
pub mod commands;
pub mod handler;

pub use args::{AddressesArgs, Args, GenerateArgs, MapArgs, ResolveArgs, StatsArgs};
pub use commands::{Command, CommandContext, CommandExecutor};
pub use handler::CommandHandler;

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();
    let handler = CommandHandler::new();
    handler.execute(args)
}
