//! HTTP implementation of [`PolicyClient`] against the vault REST API.

use crate::constants;
use crate::core::client::PolicyClient;
use crate::core::config::ClientConfig;
use crate::error::ClientError;
use crate::models::policy::{ApiErrorResponse, PutPolicyRequest};
use reqwest::blocking::Client;
use reqwest::{Certificate, Url};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

pub struct HttpPolicyClient {
    http: Client,
    address: Url,
    token: Option<Zeroizing<String>>,
}

impl HttpPolicyClient {
    /// Build a client from resolved settings. Fails on unreadable CA material
    /// or TLS backend errors; never touches the network.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder =
            Client::builder().timeout(Duration::from_secs(constants::REQUEST_TIMEOUT_SECS));

        for cert in root_certificates(&config)? {
            builder = builder.add_root_certificate(cert);
        }
        if config.tls_skip_verify {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        if config.token.is_none() {
            debug!("no client token configured; requests are unauthenticated");
        }

        let http = builder.build().map_err(ClientError::Tls)?;
        Ok(Self {
            http,
            address: config.address,
            token: config.token,
        })
    }

    /// `{address}/v1/sys/policy/{name}`, keeping any path prefix on the address.
    pub fn policy_url(&self, name: &str) -> Result<Url, ClientError> {
        let mut url = self.address.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidAddress {
                address: self.address.to_string(),
                reason: "address cannot carry a path".into(),
            })?
            .pop_if_empty()
            .extend(constants::POLICY_API_SEGMENTS)
            .push(name);
        Ok(url)
    }
}

impl PolicyClient for HttpPolicyClient {
    fn put_policy(&self, name: &str, rules: &str) -> Result<(), ClientError> {
        let url = self.policy_url(name)?;
        debug!(url = %url, bytes = rules.len(), "sending policy");

        let mut request = self.http.put(url.clone()).json(&PutPolicyRequest { rules });
        if let Some(token) = &self.token {
            request = request.header(constants::TOKEN_HEADER, token.as_str());
        }

        let response = request.send().map_err(|source| ClientError::Transport {
            method: "PUT",
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            info!(policy = name, status = status.as_u16(), "policy accepted");
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(ClientError::Api {
            method: "PUT",
            url: url.to_string(),
            status: status.as_u16(),
            errors: parse_error_body(&body),
        })
    }
}

/// Server error list, falling back to the raw body when it is not the usual JSON shape.
fn parse_error_body(body: &str) -> Vec<String> {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(resp) if !resp.errors.is_empty() => resp.errors,
        _ => {
            let trimmed = body.trim();
            if trimmed.is_empty() || trimmed == "{}" {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
    }
}

/// CA roots to trust in addition to the built-in set. `ca_path` wins over `ca_cert`.
fn root_certificates(config: &ClientConfig) -> Result<Vec<Certificate>, ClientError> {
    if let Some(dir) = &config.ca_path {
        return load_ca_dir(dir);
    }
    if let Some(file) = &config.ca_cert {
        return load_ca_file(file);
    }
    Ok(Vec::new())
}

fn load_ca_file(path: &Path) -> Result<Vec<Certificate>, ClientError> {
    let pem = fs::read(path).map_err(|source| ClientError::CaCertRead {
        path: path.to_path_buf(),
        source,
    })?;
    let certs = Certificate::from_pem_bundle(&pem).map_err(|source| ClientError::CaCertParse {
        path: path.to_path_buf(),
        source,
    })?;
    if certs.is_empty() {
        return Err(ClientError::CaBundle {
            path: path.to_path_buf(),
            reason: "no PEM certificates found".into(),
        });
    }
    Ok(certs)
}

fn load_ca_dir(dir: &Path) -> Result<Vec<Certificate>, ClientError> {
    if !dir.is_dir() {
        return Err(ClientError::CaBundle {
            path: dir.to_path_buf(),
            reason: "not a directory".into(),
        });
    }

    let pattern = format!("{}/*.pem", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries = glob::glob(&pattern).map_err(|e| ClientError::CaBundle {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut certs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ClientError::CaBundle {
            path: e.path().to_path_buf(),
            reason: e.error().to_string(),
        })?;
        if !path.is_file() {
            continue;
        }
        certs.extend(load_ca_file(&path)?);
    }

    if certs.is_empty() {
        return Err(ClientError::CaBundle {
            path: dir.to_path_buf(),
            reason: "no *.pem files found".into(),
        });
    }
    debug!(count = certs.len(), dir = %dir.display(), "loaded CA certificates");
    Ok(certs)
}
