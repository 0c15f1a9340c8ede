//! Environment-variable substitution for staged files
//!
//! Substitution operates on an explicit, ordered list of `(key, value)`
//! pairs captured once per run — never on ambient process state. The
//! expansion itself is delegated to `shellexpand` in its non-failing mode:
//! `$NAME` and `${NAME}` references whose name is not in the list pass
//! through unchanged, which keeps manifests with unrelated dollar tokens
//! (such as `$patch: delete` directives) intact.

use std::borrow::Cow;

/// Capture the process environment as an ordered list of pairs.
pub fn capture_env() -> Vec<(String, String)> {
    std::env::vars().collect()
}

/// Expand `$NAME` / `${NAME}` references in `text` against `env`.
///
/// The last entry for a name wins, so appended overrides shadow earlier
/// captures. Unresolved names are left as-is.
pub fn substitute(text: &str, env: &[(String, String)]) -> String {
    shellexpand::env_with_context_no_errors(text, |name| {
        env.iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| Cow::from(value))
    })
    .into_owned()
}

/// Parse a `KEY=VALUE` command-line override.
pub fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
