// Wed Oct 21 2026 - Alex

pub use super::args::Command;

use super::args::{AddressesArgs, GenerateArgs, ResolveArgs, StatsArgs};
use crate::capture::CaptureResult;
use crate::linkmap::LinkMapParser;
use crate::order::OrderFileGenerator;
use crate::pipeline::Pipeline;
use crate::resolver::AddressResolver;
use crate::ui::spinner::ProgressSpinner;
use crate::utils::{format_address, format_duration};
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

pub struct CommandContext {
    pub quiet: bool,
}

impl CommandContext {
    fn status(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "[*]".blue(), message.as_ref());
        }
    }

    fn success(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "[+]".green(), message.as_ref());
        }
    }
}

pub trait CommandExecutor {
    fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()>;
    fn name(&self) -> &'static str;
}

impl CommandExecutor for GenerateArgs {
    fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        self.validate().map_err(|e| anyhow::anyhow!(e))?;
        let pipeline = Pipeline::new(self.resolve_config()?);
        let start = Instant::now();

        let spinner = (!self.no_progress && !ctx.quiet).then(|| ProgressSpinner::new("Building order file..."));
        let result = pipeline.run(&self.map.linkmap, &self.capture);
        if let Some(spinner) = &spinner {
            spinner.finish_and_clear();
        }
        let output = result?;

        output.order_file.save(&self.output)?;

        ctx.success(format!(
            "Parsed {} text symbols from {}",
            output.symbol_count,
            self.map.linkmap.display()
        ));
        ctx.success(format!(
            "Resolved {}/{} captured addresses",
            output.resolve_stats.resolved, output.resolve_stats.total
        ));
        if output.resolve_stats.dropped() > 0 {
            ctx.status(format!(
                "Dropped {} outside any image, {} without a symbol",
                output.resolve_stats.no_image, output.resolve_stats.missing_symbol
            ));
        }
        ctx.success(format!(
            "{} observed + {} remaining entries written to {} in {}",
            output.generation_stats.observed,
            output.generation_stats.remaining,
            self.output.display(),
            format_duration(start.elapsed())
        ));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "generate"
    }
}

impl CommandExecutor for ResolveArgs {
    fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        self.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = self.map.resolve_config()?;
        let pipeline = Pipeline::new(config);

        let (map, _) = pipeline.load_link_map(&self.map.linkmap)?;
        let capture = CaptureResult::load(&self.capture)?;
        let trace = AddressResolver::new(&map).resolve(&capture);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for symbol in &trace.symbols {
            if self.qualified {
                writeln!(out, "{}", symbol.qualified_name())?;
            } else {
                writeln!(out, "{}", symbol.name())?;
            }
        }
        out.flush()?;

        if !ctx.quiet {
            eprintln!(
                "{} {} resolved, {} dropped",
                "[+]".green(),
                trace.stats.resolved,
                trace.stats.dropped()
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "resolve"
    }
}

impl CommandExecutor for AddressesArgs {
    fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        self.map.validate().map_err(|e| anyhow::anyhow!(e))?;
        let pipeline = Pipeline::new(self.map.resolve_config()?);
        let (map, _) = pipeline.load_link_map(&self.map.linkmap)?;

        let json = serde_json::to_string(&map.addresses())?;
        match &self.output {
            Some(path) => {
                fs::write(path, json)?;
                ctx.success(format!("{} addresses written to {}", map.len(), path.display()));
            }
            None => println!("{}", json),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "addresses"
    }
}

impl CommandExecutor for StatsArgs {
    fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        self.map.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = self.map.resolve_config()?;
        let filter = config.eligibility_filter();
        let (map, stats) = LinkMapParser::new(filter.clone()).parse_file(&self.map.linkmap)?;

        println!("{}", "Link Map Summary".cyan().bold());
        println!("{}", "-".repeat(40).cyan());
        println!(
            "  Text section:     {} - {}",
            format_address(map.text_section_start()),
            format_address(map.text_section_end())
        );
        println!("  Object files:     {}", stats.object_files.to_string().green());
        println!("  Symbol lines:     {}", stats.symbol_lines);
        println!("  Recorded:         {}", map.len().to_string().green());
        println!("  Filtered:         {}", stats.filtered);
        println!("  Malformed:        {}", stats.malformed.to_string().yellow());

        let generator = OrderFileGenerator::new(&map, &filter);
        let mut groups: Vec<_> = generator.collision_groups().collect();
        groups.sort_by_key(|(name, _)| *name);
        println!("  Collision groups: {}", groups.len());

        if self.collisions && !groups.is_empty() {
            println!();
            println!("{}", "Collisions:".yellow().bold());
            for (name, members) in groups {
                let objects: Vec<String> = members.iter().map(|s| s.object().to_string()).collect();
                println!("  {} {}", name.cyan(), objects.join(", ").dimmed());
            }
        }

        if !stats.text_section_found {
            ctx.status("No __TEXT,__text section found; no symbols were recorded");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stats"
    }
}
