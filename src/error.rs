//! Error types for client construction and the `policy-write` command.

use crate::constants;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while building or using the remote policy client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server address is not a usable http(s) URL.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The config file exists but could not be read or parsed.
    #[error("config file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// The token file exists but could not be read.
    #[error("read token file {}: {source}", .path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CA certificate file could not be read.
    #[error("read CA certificate {}: {source}", .path.display())]
    CaCertRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CA certificate file was read but is not valid PEM.
    #[error("parse CA certificate {}: {source}", .path.display())]
    CaCertParse {
        path: PathBuf,
        #[source]
        source: reqwest::Error,
    },

    /// The CA directory or bundle yielded no usable certificates.
    #[error("CA certificates {}: {reason}", .path.display())]
    CaBundle { path: PathBuf, reason: String },

    /// The TLS-enabled HTTP client could not be built.
    #[error("build HTTP client: {0}")]
    Tls(#[source] reqwest::Error),

    /// The request never produced a response (connect, TLS, timeout).
    #[error("{method} {url}: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{}", render_api_error(.method, .url, .status, .errors))]
    Api {
        method: &'static str,
        url: String,
        status: u16,
        errors: Vec<String>,
    },
}

fn render_api_error(method: &str, url: &str, status: &u16, errors: &[String]) -> String {
    let mut out = format!(
        "Error making API request.\n\nURL: {} {}\nCode: {}.",
        method, url, status
    );
    if errors.is_empty() {
        out.push_str(" No error details returned.");
        return out;
    }
    out.push_str(" Errors:\n");
    for err in errors {
        out.push_str("\n* ");
        out.push_str(err);
    }
    out
}

/// Terminal failures of a `policy-write` invocation.
///
/// Every variant maps to a process exit code via [`PolicyWriteError::exit_code`].
#[derive(Debug, Error)]
pub enum PolicyWriteError {
    /// Wrong positional argument count or an empty policy name.
    #[error("{0}")]
    Usage(String),

    /// The remote client could not be constructed.
    #[error("Error initializing client: {0}")]
    Configuration(#[source] ClientError),

    /// The policy file could not be opened.
    #[error("Error opening file: open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The policy source failed mid-read or was not valid UTF-8.
    #[error("Error reading file: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// The server rejected the write, or the request never completed.
    #[error("Error: {0}")]
    Remote(#[source] ClientError),
}

impl PolicyWriteError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PolicyWriteError::Configuration(_) => constants::EXIT_CONFIG,
            PolicyWriteError::Usage(_)
            | PolicyWriteError::Open { .. }
            | PolicyWriteError::Read { .. }
            | PolicyWriteError::Remote(_) => constants::EXIT_FAILURE,
        }
    }
}
