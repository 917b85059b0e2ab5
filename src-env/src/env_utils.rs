//! Environment variable utilities for deboard
//!
//! This module resolves the backend URL (`DEBOARD_API_URL`) and the client
//! state directory (`DEBOARD_DIR`) where the authentication token is kept.
//!
//! Every resolver comes in two flavours: one reading the process environment
//! and a `*_with` variant taking the lookup as a closure.

use crate::constants::{
    API_URL_VAR, DEFAULT_API_URL, DEFAULT_STATE_DIR_NAME, STATE_DIR_VAR, TOKEN_FILE,
};
use std::env;
use std::path::PathBuf;

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Neither DEBOARD_DIR nor HOME is set. Please point DEBOARD_DIR at a writable directory (e.g., export DEBOARD_DIR=$PWD/.deboard)"
    )]
    StateDirNotSet,

    #[error("{var} must be an http(s) URL, got: {value}")]
    InvalidApiUrl { var: &'static str, value: String },

    #[error("Failed to create state directory {0}: {1}")]
    StateDirCreationFailed(PathBuf, std::io::Error),
}

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Get the backend base URL
///
/// Falls back to `http://localhost:3000/api` when `DEBOARD_API_URL` is unset
/// or empty. A trailing slash is stripped so paths can be appended verbatim.
///
/// # Errors
///
/// Returns an error if the variable is set to something that is not an
/// http(s) URL.
///
/// # Example
///
/// ```no_run
/// use deboard_env::env_utils::get_api_base_url;
///
/// let base = get_api_base_url()?;
/// println!("Backend: {}", base);
/// # Ok::<(), deboard_env::env_utils::EnvError>(())
/// ```
pub fn get_api_base_url() -> Result<String, EnvError> {
    get_api_base_url_with(process_env)
}

/// Same as [`get_api_base_url`] with an explicit variable lookup
pub fn get_api_base_url_with<F>(lookup: F) -> Result<String, EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(API_URL_VAR) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => return Ok(DEFAULT_API_URL.to_string()),
    };

    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(EnvError::InvalidApiUrl {
            var: API_URL_VAR,
            value,
        });
    }

    Ok(value.trim_end_matches('/').to_string())
}

/// Get the client state directory, creating it if necessary
///
/// Uses `DEBOARD_DIR` when set, `$HOME/.deboard` otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - neither DEBOARD_DIR nor HOME is set
/// - the directory cannot be created
pub fn get_state_dir() -> Result<PathBuf, EnvError> {
    get_state_dir_with(process_env)
}

/// Same as [`get_state_dir`] with an explicit variable lookup
pub fn get_state_dir_with<F>(lookup: F) -> Result<PathBuf, EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    let dir = match lookup(STATE_DIR_VAR).filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = lookup("HOME")
                .filter(|v| !v.is_empty())
                .ok_or(EnvError::StateDirNotSet)?;
            PathBuf::from(home).join(DEFAULT_STATE_DIR_NAME)
        }
    };

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| EnvError::StateDirCreationFailed(dir.clone(), e))?;
        log::debug!("created state directory {}", dir.display());
    }

    Ok(dir)
}

/// Get the path of the persisted bearer token
///
/// The file itself is not created here, only its directory.
pub fn get_token_path() -> Result<PathBuf, EnvError> {
    get_token_path_with(process_env)
}

/// Same as [`get_token_path`] with an explicit variable lookup
pub fn get_token_path_with<F>(lookup: F) -> Result<PathBuf, EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(get_state_dir_with(lookup)?.join(TOKEN_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_api_url_default() {
        let url = get_api_base_url_with(lookup_from(&[])).unwrap();
        assert_eq!(url, DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_empty_falls_back() {
        let url = get_api_base_url_with(lookup_from(&[(API_URL_VAR, "  ")])).unwrap();
        assert_eq!(url, DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_trailing_slash_stripped() {
        let url =
            get_api_base_url_with(lookup_from(&[(API_URL_VAR, "https://de.example.org/api/")]))
                .unwrap();
        assert_eq!(url, "https://de.example.org/api");
    }

    #[test]
    fn test_api_url_rejects_other_schemes() {
        let result = get_api_base_url_with(lookup_from(&[(API_URL_VAR, "ftp://nope")]));
        assert!(matches!(result, Err(EnvError::InvalidApiUrl { .. })));
    }

    #[test]
    fn test_state_dir_not_set() {
        let result = get_state_dir_with(lookup_from(&[]));
        assert!(matches!(result, Err(EnvError::StateDirNotSet)));
    }

    #[test]
    fn test_state_dir_created_from_var() {
        let tmp = tempfile::tempdir().unwrap();
        let wanted = tmp.path().join("nested").join("state");
        let wanted_str = wanted.to_string_lossy().to_string();

        let dir = get_state_dir_with(lookup_from(&[(STATE_DIR_VAR, wanted_str.as_str())])).unwrap();
        assert_eq!(dir, wanted);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_state_dir_under_home() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().to_string_lossy().to_string();

        let dir = get_state_dir_with(lookup_from(&[("HOME", home.as_str())])).unwrap();
        assert_eq!(dir, tmp.path().join(DEFAULT_STATE_DIR_NAME));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_token_path() {
        let tmp = tempfile::tempdir().unwrap();
        let state = tmp.path().to_string_lossy().to_string();

        let path = get_token_path_with(lookup_from(&[(STATE_DIR_VAR, state.as_str())])).unwrap();
        assert_eq!(path, tmp.path().join(TOKEN_FILE));
        assert!(!path.exists());
    }
}
