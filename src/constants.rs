//! Centralized constants for addresses, exit codes, and environment names.

/// Address used when neither a flag, env var, nor config file names one.
pub const DEFAULT_ADDRESS: &str = "https://127.0.0.1:8200";

/// Source token meaning "read the policy from standard input".
pub const STDIN_SOURCE: &str = "-";

/// Exit code for a successful write.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for usage, source, and remote errors.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for client construction (configuration) errors.
pub const EXIT_CONFIG: i32 = 2;

/// Config file looked up in `$HOME` when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".vault";

/// Token file looked up in `$HOME` when `VAULT_TOKEN` is unset.
pub const TOKEN_FILE_NAME: &str = ".vault-token";

/// Header carrying the client token on API requests.
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Path segments of the policy endpoint, relative to the server address.
pub const POLICY_API_SEGMENTS: &[&str] = &["v1", "sys", "policy"];

/// Per-request timeout for API calls, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "VAULT_LOG";

/// Log filter used when `VAULT_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";
