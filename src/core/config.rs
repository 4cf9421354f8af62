//! Client configuration resolution: flag > env > config file > default.
//!
//! Environment variables are folded into the flag values by clap before
//! they reach this module, so [`ConnectionOverrides`] already carries both.

use crate::constants;
use crate::error::ClientError;
use crate::models::client_config::ConfigFile;
use reqwest::Url;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Connection values supplied on the command line or through the environment.
#[derive(Clone, Default)]
pub struct ConnectionOverrides {
    pub address: Option<String>,
    pub ca_cert: Option<PathBuf>,
    pub ca_path: Option<PathBuf>,
    pub tls_skip_verify: Option<bool>,
    pub config: Option<PathBuf>,
    pub token: Option<String>,
}

/// Fully resolved settings for building a policy client.
#[derive(Clone)]
pub struct ClientConfig {
    pub address: Url,
    pub ca_cert: Option<PathBuf>,
    pub ca_path: Option<PathBuf>,
    pub tls_skip_verify: bool,
    pub token: Option<Zeroizing<String>>,
}

impl ClientConfig {
    /// Resolve settings from overrides, the config file, and the token file.
    ///
    /// `home` is the user's home directory, used for the default config and
    /// token file locations. `None` skips both lookups.
    pub fn resolve(overrides: ConnectionOverrides, home: Option<&Path>) -> Result<Self, ClientError> {
        // the home default is optional; an explicit --config path is not
        let config_path = overrides.config.clone().or_else(|| {
            home.map(|h| h.join(constants::CONFIG_FILE_NAME))
                .filter(|p| p.is_file())
        });
        let file = match &config_path {
            Some(path) => load_file(path)?,
            None => ConfigFile::default(),
        };

        let token = match overrides.token.filter(|t| !t.trim().is_empty()) {
            Some(t) => Some(Zeroizing::new(t)),
            None => match home {
                Some(h) => read_token_file(&h.join(constants::TOKEN_FILE_NAME))?,
                None => None,
            },
        };

        let address = overrides
            .address
            .or(file.address)
            .unwrap_or_else(|| constants::DEFAULT_ADDRESS.to_string());

        Ok(Self {
            address: parse_address(&address)?,
            ca_cert: overrides.ca_cert.or(file.ca_cert),
            ca_path: overrides.ca_path.or(file.ca_path),
            tls_skip_verify: overrides
                .tls_skip_verify
                .or(file.tls_skip_verify)
                .unwrap_or(false),
            token,
        })
    }
}

// Tokens never show up in debug output.
impl fmt::Debug for ConnectionOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOverrides")
            .field("address", &self.address)
            .field("ca_cert", &self.ca_cert)
            .field("ca_path", &self.ca_path)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address.as_str())
            .field("ca_cert", &self.ca_cert)
            .field("ca_path", &self.ca_path)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Load the TOML config file. A missing file yields the defaults.
pub fn load_file(path: &Path) -> Result<ConfigFile, ClientError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(e) => {
            return Err(ClientError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };
    toml::from_str(&content).map_err(|e| ClientError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read a token file, trimming surrounding whitespace. Missing or blank files yield `None`.
pub fn read_token_file(path: &Path) -> Result<Option<Zeroizing<String>>, ClientError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Zeroizing::new(raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ClientError::TokenFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let token = raw.trim();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(Zeroizing::new(token.to_string())))
}

/// Parse and check a server address. Only `http` and `https` are accepted.
pub fn parse_address(address: &str) -> Result<Url, ClientError> {
    let url = Url::parse(address).map_err(|e| ClientError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::InvalidAddress {
                address: address.to_string(),
                reason: format!("unsupported scheme '{}' (use http or https)", other),
            })
        }
    }
    if url.host_str().is_none() {
        return Err(ClientError::InvalidAddress {
            address: address.to_string(),
            reason: "missing host".into(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_home() {
        let config = ClientConfig::resolve(ConnectionOverrides::default(), None).unwrap();
        assert_eq!(config.address.as_str(), "https://127.0.0.1:8200/");
        assert!(config.ca_cert.is_none());
        assert!(config.ca_path.is_none());
        assert!(!config.tls_skip_verify);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_config_file_from_home() {
        let home = TempDir::new().unwrap();
        write(
            home.path(),
            ".vault",
            "address = \"http://vault.internal:8200\"\nca_cert = \"/etc/ca.pem\"\ntls_skip_verify = true\n",
        );
        let config = ClientConfig::resolve(ConnectionOverrides::default(), Some(home.path())).unwrap();
        assert_eq!(config.address.as_str(), "http://vault.internal:8200/");
        assert_eq!(config.ca_cert, Some(PathBuf::from("/etc/ca.pem")));
        assert!(config.tls_skip_verify);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let home = TempDir::new().unwrap();
        write(
            home.path(),
            ".vault",
            "address = \"http://from-file:8200\"\nca_path = \"/etc/file-cas\"\n",
        );
        let overrides = ConnectionOverrides {
            address: Some("https://from-flag:8200".into()),
            ca_path: Some(PathBuf::from("/etc/flag-cas")),
            ..Default::default()
        };
        let config = ClientConfig::resolve(overrides, Some(home.path())).unwrap();
        assert_eq!(config.address.host_str(), Some("from-flag"));
        assert_eq!(config.ca_path, Some(PathBuf::from("/etc/flag-cas")));
    }

    #[test]
    fn test_override_reenables_verification() {
        let home = TempDir::new().unwrap();
        write(home.path(), ".vault", "tls_skip_verify = true\n");
        let overrides = ConnectionOverrides {
            tls_skip_verify: Some(false),
            ..Default::default()
        };
        let config = ClientConfig::resolve(overrides, Some(home.path())).unwrap();
        assert!(!config.tls_skip_verify);
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "client.toml", "address = \"http://explicit:1234\"\n");
        let overrides = ConnectionOverrides {
            config: Some(path),
            ..Default::default()
        };
        let config = ClientConfig::resolve(overrides, None).unwrap();
        assert_eq!(config.address.port(), Some(1234));
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        let file = load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_unknown_config_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "client.toml", "adress = \"typo\"\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }

    #[test]
    fn test_token_from_override_beats_token_file() {
        let home = TempDir::new().unwrap();
        write(home.path(), ".vault-token", "file-token\n");
        let overrides = ConnectionOverrides {
            token: Some("env-token".into()),
            ..Default::default()
        };
        let config = ClientConfig::resolve(overrides, Some(home.path())).unwrap();
        assert_eq!(config.token.as_deref().map(String::as_str), Some("env-token"));
    }

    #[test]
    fn test_token_file_trimmed() {
        let home = TempDir::new().unwrap();
        write(home.path(), ".vault-token", "  s.abc123 \n");
        let config = ClientConfig::resolve(ConnectionOverrides::default(), Some(home.path())).unwrap();
        assert_eq!(config.token.as_deref().map(String::as_str), Some("s.abc123"));
    }

    #[test]
    fn test_blank_token_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "token", "\n\n");
        assert!(read_token_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let overrides = ConnectionOverrides {
            token: Some("s.secret".into()),
            ..Default::default()
        };
        assert!(!format!("{:?}", overrides).contains("s.secret"));
        let config = ClientConfig::resolve(overrides, None).unwrap();
        let dbg = format!("{:?}", config);
        assert!(!dbg.contains("s.secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn test_parse_address_rejects_bad_input() {
        assert!(parse_address("not a url").is_err());
        assert!(parse_address("ftp://vault:21").is_err());
        assert!(parse_address("http://127.0.0.1:8200").is_ok());
        assert!(parse_address("https://vault.example.com/prefix/").is_ok());
    }
}
