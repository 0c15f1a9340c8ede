//! # CLI Command Implementations
//!
//! One module per subcommand of the `substage` command-line tool. Each
//! module defines a clap `Args` struct for its command-specific options
//! and an `execute` function that drives the `substage` library to do the
//! actual work.

pub mod build;
pub mod completions;
pub mod debug;
pub mod tree;

use anyhow::Result;

use substage::substitute;

/// Resolve the substitution environment for a run: the `--env KEY=VALUE`
/// overrides when any were given, the captured process environment
/// otherwise.
pub(crate) fn substitution_env(overrides: &[String]) -> Result<Vec<(String, String)>> {
    if overrides.is_empty() {
        return Ok(substitute::capture_env());
    }

    overrides
        .iter()
        .map(|raw| substitute::parse_env_pair(raw).map_err(anyhow::Error::msg))
        .collect()
}
