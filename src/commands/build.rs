//! Build command implementation
//!
//! The build command runs the full pipeline:
//! 1. Accumulate the target tree from the kustomization manifests
//! 2. Materialize the substituted copy into a scratch directory
//! 3. Render the staged overlay with the external engine
//! 4. Write the rendered manifests to stdout or `--output`
//!
//! Status lines go to stderr; stdout carries only the rendered YAML.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use substage::output::{self, Status};
use substage::render::Kustomize;
use substage::runner::Runner;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory containing the kustomization to build
    #[arg(value_name = "DIR", default_value = ".")]
    pub target: PathBuf,

    /// Write rendered manifests to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Substitution override; repeatable, replaces the process environment
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Keep the scratch directory for inspection
    #[arg(long)]
    pub keep_scratch: bool,

    /// Parent directory for the scratch directory
    #[arg(long, value_name = "DIR")]
    pub scratch_root: Option<PathBuf>,

    /// Render engine binary to use
    #[arg(long, value_name = "BIN", env = "SUBSTAGE_KUSTOMIZE")]
    pub kustomize: Option<PathBuf>,

    /// Extra argument passed to `kustomize build`; repeatable
    #[arg(long = "render-arg", value_name = "ARG")]
    pub render_args: Vec<String>,

    /// Suppress status output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs, status: &Status) -> Result<()> {
    let start = Instant::now();

    let env = super::substitution_env(&args.env)?;
    let engine = Kustomize::locate(args.kustomize.as_deref(), args.render_args.clone())
        .context("can't set up the render engine")?;

    let runner = Runner {
        env,
        scratch_parent: args.scratch_root,
    };

    let staged = runner
        .stage(&args.target)
        .with_context(|| format!("can't stage '{}'", args.target.display()))?;

    if !args.quiet {
        eprintln!(
            "{} Staged {} files",
            status.marker(output::STAGE),
            staged.files().len()
        );
    }

    let rendered = staged
        .render(&engine)
        .context("can't render the staged overlay")?;

    match &args.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("can't write output to '{}'", path.display()))?,
        None => std::io::stdout()
            .write_all(&rendered)
            .context("can't write output")?,
    }

    if args.keep_scratch {
        let kept = staged.keep();
        if !args.quiet {
            eprintln!(
                "{} Scratch directory kept at {}",
                status.marker(output::KEEP),
                kept.display()
            );
        }
    }

    if !args.quiet {
        eprintln!(
            "{} Rendered {} in {:.2}s",
            status.marker(output::DONE),
            args.target.display(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
