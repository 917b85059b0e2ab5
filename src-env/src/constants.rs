/// Environment variable holding the backend base URL
pub const API_URL_VAR: &str = "DEBOARD_API_URL";

/// Environment variable pointing at the client state directory
pub const STATE_DIR_VAR: &str = "DEBOARD_DIR";

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Name of the state directory created under `$HOME`
pub const DEFAULT_STATE_DIR_NAME: &str = ".deboard";

/// File (inside the state directory) holding the bearer token
pub const TOKEN_FILE: &str = "token";
