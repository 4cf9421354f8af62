//! Diagnostic logging to stderr.
//!
//! Quiet by default so command output is unchanged; raise with `VAULT_LOG=debug`.

use crate::constants;
use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
