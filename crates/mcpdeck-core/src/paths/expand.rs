//! Environment-variable placeholder expansion for config paths.
//!
//! Config paths are stored with their placeholders intact and expanded
//! at materialization time against the current process environment.
//! Recognized syntaxes: `%NAME%` (how the built-in Windows paths are
//! stored) and `${NAME}`. An unset variable expands to the empty string
//! in both forms — lossy on purpose, not an error.

use std::env;

/// Expand every recognized placeholder in `path`.
pub fn expand_placeholders(path: &str) -> String {
    expand_braced(&expand_percent(path))
}

fn env_or_empty(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Variable names: alphanumerics, underscores, and the parentheses that
/// appear in names like `ProgramFiles(x86)`.
fn is_var_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')'))
}

/// Expand `%NAME%` tokens. A `%` without a closing partner, or with
/// anything other than a variable name between the pair, is kept
/// literally.
fn expand_percent(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) if end > 0 && is_var_name(&after[..end]) => {
                out.push_str(&env_or_empty(&after[..end]));
                rest = &after[end + 1..];
            }
            _ => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Expand `${NAME}` tokens. `$` outside that form is kept literally.
fn expand_braced(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 && is_var_name(&after[..end]) => {
                out.push_str(&env_or_empty(&after[..end]));
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn test_expands_percent_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set("MCPDECK_TEST_APPDATA", "/home/u/appdata");

        let expanded = expand_placeholders(r"%MCPDECK_TEST_APPDATA%\Claude\config.json");
        assert_eq!(expanded, r"/home/u/appdata\Claude\config.json");
    }

    #[test]
    fn test_expands_braced_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set("MCPDECK_TEST_HOME", "/home/u");

        let expanded = expand_placeholders("${MCPDECK_TEST_HOME}/.cursor/mcp.json");
        assert_eq!(expanded, "/home/u/.cursor/mcp.json");
    }

    #[test]
    fn test_unset_variable_expands_to_empty() {
        let _guard = ENV_LOCK.lock().unwrap();
        let expanded = expand_placeholders("%MCPDECK_TEST_UNSET%/config.json");
        assert_eq!(expanded, "/config.json");
    }

    #[test]
    fn test_unterminated_tokens_kept_literally() {
        let _guard = ENV_LOCK.lock().unwrap();
        assert_eq!(expand_placeholders("50% done"), "50% done");
        assert_eq!(expand_placeholders("${oops"), "${oops");
    }

    #[test]
    fn test_non_variable_percent_pairs_kept_literally() {
        let _guard = ENV_LOCK.lock().unwrap();
        assert_eq!(expand_placeholders("50% done, 100% soon"), "50% done, 100% soon");
    }

    #[test]
    fn test_plain_path_passes_through() {
        assert_eq!(expand_placeholders("/tmp/cfg.json"), "/tmp/cfg.json");
    }

    #[test]
    fn test_multiple_tokens() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _a = EnvVarGuard::set("MCPDECK_TEST_A", "one");
        let _b = EnvVarGuard::set("MCPDECK_TEST_B", "two");
        assert_eq!(
            expand_placeholders("%MCPDECK_TEST_A%/${MCPDECK_TEST_B}"),
            "one/two"
        );
    }
}
