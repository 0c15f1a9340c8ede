//! Debug command implementation
//!
//! The debug command stops after staging: it accumulates the target,
//! materializes the substituted copy, and always keeps the scratch
//! directory so the staged tree can be inspected before the render engine
//! ever sees it. The staged mapping is printed one file per line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use substage::output::{self, Status};
use substage::runner::Runner;

/// Arguments for the debug command
#[derive(Args, Debug)]
pub struct DebugArgs {
    /// Directory containing the kustomization to stage
    #[arg(value_name = "DIR", default_value = ".")]
    pub target: PathBuf,

    /// Substitution override; repeatable, replaces the process environment
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Parent directory for the scratch directory
    #[arg(long, value_name = "DIR")]
    pub scratch_root: Option<PathBuf>,
}

/// Execute the debug command
pub fn execute(args: DebugArgs, status: &Status) -> Result<()> {
    let env = super::substitution_env(&args.env)?;

    let runner = Runner {
        env,
        scratch_parent: args.scratch_root,
    };

    let staged = runner
        .stage(&args.target)
        .with_context(|| format!("can't stage '{}'", args.target.display()))?;

    for (source, relative) in staged.files() {
        println!("{} <- {}", relative.display(), source.display());
    }

    println!(
        "{} Render directory: {}",
        status.marker(output::DEBUG),
        staged.render_dir().display()
    );

    let kept = staged.keep();
    println!(
        "{} Scratch directory kept at {}",
        status.marker(output::KEEP),
        kept.display()
    );

    Ok(())
}
