//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use substage::output::Status;

/// Render kustomize overlays with environment variables substituted up front
#[derive(Parser, Debug)]
#[command(name = "substage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the target overlay with environment variables substituted
    Build(commands::build::BuildArgs),
    /// Stage the substituted copy and keep it for inspection
    Debug(commands::debug::DebugArgs),
    /// Display the accumulated directory tree for a target
    Tree(commands::tree::TreeArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        let status = Status::from_flag(&self.color);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &status),
            Commands::Debug(args) => commands::debug::execute(args, &status),
            Commands::Tree(args) => commands::tree::execute(args, &status),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
