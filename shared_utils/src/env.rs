use std::path::PathBuf;

use thiserror::Error;

/// Environment variable consulted when a tool is started without `--root`.
pub const ROOT_ENV_VAR: &str = "DASHBOARD_ROOT";

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Empty values count as missing.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

/// Load a `.env` file from the current directory or its ancestors, if any.
///
/// Variables already set in the process environment are not overridden.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
}

/// Resolve the project/data root for a tool run.
///
/// Precedence: the explicit CLI value, then [`ROOT_ENV_VAR`], then the current
/// directory.
pub fn resolve_root(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(p) = explicit {
        return p;
    }
    match get_env_var(ROOT_ENV_VAR) {
        Ok(v) => PathBuf::from(v.trim()),
        Err(_) => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn explicit_root_wins_over_env() {
        unsafe { std::env::set_var(ROOT_ENV_VAR, "/from/env") };
        let root = resolve_root(Some(PathBuf::from("/from/cli")));
        unsafe { std::env::remove_var(ROOT_ENV_VAR) };
        assert_eq!(root, PathBuf::from("/from/cli"));
    }

    #[test]
    #[serial]
    fn env_root_used_when_no_flag() {
        unsafe { std::env::set_var(ROOT_ENV_VAR, " /from/env ") };
        let root = resolve_root(None);
        unsafe { std::env::remove_var(ROOT_ENV_VAR) };
        assert_eq!(root, PathBuf::from("/from/env"));
    }

    #[test]
    #[serial]
    fn falls_back_to_cwd() {
        unsafe { std::env::remove_var(ROOT_ENV_VAR) };
        assert_eq!(resolve_root(None), PathBuf::from("."));
        let err = get_env_var(ROOT_ENV_VAR).unwrap_err();
        assert_eq!(err.to_string(), "Missing environment variable: DASHBOARD_ROOT");
    }
}
