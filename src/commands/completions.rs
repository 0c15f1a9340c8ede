//! # Completions Command Implementation
//!
//! This module implements the `completions` subcommand, which generates
//! shell completion scripts using `clap_complete`. The script is written
//! to stdout; users redirect it to the location their shell expects.
//!
//! ## Example
//!
//! ```bash
//! # Generate and install bash completions
//! substage completions bash > ~/.local/share/bash-completion/completions/substage
//!
//! # Generate zsh completions
//! substage completions zsh > ~/.zfunc/_substage
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "substage", &mut io::stdout());
    Ok(())
}
