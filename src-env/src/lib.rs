//! Environment utilities for the DE research dashboard
//!
//! Resolves where the backend lives, where client state is persisted and
//! sets up logging for the binaries.

pub mod constants;
pub mod env_utils;
pub mod logging;

pub use env_utils::{
    EnvError, get_api_base_url, get_api_base_url_with, get_state_dir, get_state_dir_with,
    get_token_path, get_token_path_with,
};
pub use logging::init_logging;
