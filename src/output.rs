//! Status markers for the CLI
//!
//! Rendered manifests own stdout, so every status line substage prints
//! goes to stderr. This module decides how those lines are marked: emoji
//! on an attended, color-friendly stderr, bracketed plain tags when the
//! output is piped, captured, or explicitly undecorated.

use std::env;

/// A stage marker: emoji when decorated, a bracketed tag otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    emoji: &'static str,
    tag: &'static str,
}

/// Files were staged into the scratch directory.
pub const STAGE: Marker = Marker {
    emoji: "📦",
    tag: "[STAGE]",
};

/// The scratch directory was kept past the run.
pub const KEEP: Marker = Marker {
    emoji: "📂",
    tag: "[KEEP]",
};

/// Staging details for inspection.
pub const DEBUG: Marker = Marker {
    emoji: "🔍",
    tag: "[DEBUG]",
};

/// The accumulated tree display.
pub const TREE: Marker = Marker {
    emoji: "🌳",
    tag: "[TREE]",
};

/// The run finished.
pub const DONE: Marker = Marker {
    emoji: "✅",
    tag: "[DONE]",
};

/// Resolved decoration choice for one run.
#[derive(Debug, Clone)]
pub struct Status {
    decorated: bool,
}

impl Status {
    /// Resolve the `--color` flag. `always` and `never` are final;
    /// anything else asks the environment and the stderr terminal.
    pub fn from_flag(flag: &str) -> Self {
        let decorated = if flag.eq_ignore_ascii_case("always") {
            true
        } else if flag.eq_ignore_ascii_case("never") {
            false
        } else {
            decoration_wanted()
        };

        Status { decorated }
    }

    /// Render `marker` under this choice.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.decorated {
            marker.emoji
        } else {
            marker.tag
        }
    }
}

/// Decoration default: `NO_COLOR` (https://no-color.org/, presence alone
/// counts) and `CLICOLOR=0` opt out, `CLICOLOR_FORCE` opts in, and a dumb
/// or unattended stderr falls back to plain tags.
fn decoration_wanted() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if env::var("CLICOLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("CLICOLOR_FORCE").is_ok_and(|force| !force.is_empty() && force != "0") {
        return true;
    }

    env::var("TERM").as_deref() != Ok("dumb") && console::user_attended_stderr()
}
