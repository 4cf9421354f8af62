//! CLI routing and command dispatch.

use crate::core::client::PolicyClient;
use crate::core::config::{ClientConfig, ConnectionOverrides};
use crate::core::http::HttpPolicyClient;
use crate::core::source::OsFilesystem;
use crate::error::ClientError;
use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use std::env;
use std::fmt;
use std::io;
use std::path::PathBuf;
use tracing::debug;

pub mod policy_write;

/// Connection and TLS options shared by every command.
///
/// These only affect how the remote client is built.
#[derive(Args, Clone, Default)]
pub struct ConnectionArgs {
    /// The address of the vault server
    #[arg(long, global = true, env = "VAULT_ADDR", value_name = "ADDR")]
    pub address: Option<String>,

    /// PEM encoded CA cert file to verify the server certificate
    #[arg(long, global = true, env = "VAULT_CACERT", value_name = "PATH")]
    pub ca_cert: Option<PathBuf>,

    /// Directory of PEM encoded CA cert files (wins over --ca-cert)
    #[arg(long, global = true, env = "VAULT_CAPATH", value_name = "PATH")]
    pub ca_path: Option<PathBuf>,

    /// Do not verify the server TLS certificate (not recommended)
    #[arg(
        long,
        global = true,
        env = "VAULT_SKIP_VERIFY",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = FalseyValueParser::new()
    )]
    pub tls_skip_verify: Option<bool>,

    /// Client config file (default: ~/.vault)
    #[arg(long, global = true, env = "VAULT_CONFIG_PATH", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "VAULT_TOKEN", hide = true, hide_env_values = true)]
    pub token: Option<String>,
}

impl ConnectionArgs {
    pub fn into_overrides(self) -> ConnectionOverrides {
        ConnectionOverrides {
            address: self.address,
            ca_cert: self.ca_cert,
            ca_path: self.ca_path,
            tls_skip_verify: self.tls_skip_verify,
            config: self.config,
            token: self.token,
        }
    }
}

impl fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionArgs")
            .field("address", &self.address)
            .field("ca_cert", &self.ca_cert)
            .field("ca_path", &self.ca_path)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Parser, Debug)]
#[command(name = "vault", version, about = "Command-line client for a vault server")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch the command against the real process streams. Returns the exit code.
    pub fn run(self) -> i32 {
        debug!(command = self.command.name(), "dispatching");
        let overrides = self.connection.into_overrides();
        let factory = move || -> Result<Box<dyn PolicyClient>, ClientError> {
            let home = env::var_os("HOME").map(PathBuf::from);
            let config = ClientConfig::resolve(overrides, home.as_deref())?;
            Ok(Box::new(HttpPolicyClient::new(config)?))
        };

        let stdin = io::stdin();
        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut stdin = stdin.lock();
        let mut stdout = stdout.lock();
        let mut stderr = stderr.lock();
        let mut streams = policy_write::Streams {
            stdin: &mut stdin,
            stdout: &mut stdout,
            stderr: &mut stderr,
        };

        match self.command {
            Commands::PolicyWrite(args) => {
                policy_write::execute(&args.args, factory, &mut streams, &OsFilesystem)
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a policy to the server
    #[command(name = "policy-write", long_about = policy_write::ABOUT)]
    PolicyWrite(policy_write::PolicyWriteArgs),
}

impl Commands {
    /// Command name for error messages.
    pub fn name(&self) -> &str {
        match self {
            Commands::PolicyWrite(_) => "policy-write",
        }
    }
}
