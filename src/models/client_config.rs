//! Client configuration file model.

use serde::Deserialize;
use std::path::PathBuf;

/// Connection settings read from the TOML config file.
///
/// Every field is optional; flags and environment variables take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub address: Option<String>,

    /// PEM bundle used to verify the server certificate.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Directory of PEM files; wins over `ca_cert` when both are set.
    #[serde(default)]
    pub ca_path: Option<PathBuf>,

    #[serde(default)]
    pub tls_skip_verify: Option<bool>,
}
