//! `policy-write`: submit a named policy read from a file or stdin.

use crate::constants;
use crate::core::client::PolicyClient;
use crate::core::source::{self, Filesystem, PolicySource};
use crate::error::{ClientError, PolicyWriteError};
use clap::Args;
use std::io::{Read, Write};
use tracing::{debug, info};

/// Long help for `--help`; clap renders usage and options itself.
pub const ABOUT: &str = "\
Write a policy with the given name from the contents of a file or stdin.

If the path is \"-\", the policy is read from stdin. Otherwise, it is
loaded from the file at the given path.";

/// Printed on a usage error, where clap's renderer is not involved.
pub const USAGE: &str = "\
Usage: vault policy-write [options] name path

  Write a policy with the given name from the contents of a file or stdin.

  If the path is \"-\", the policy is read from stdin. Otherwise, it is
  loaded from the file at the given path.

General Options:

  --address=addr          The address of the vault server.

  --ca-cert=path          Path to a PEM encoded CA cert file used to verify
                          the server's TLS certificate.

  --ca-path=path          Path to a directory of PEM encoded CA cert files
                          used to verify the server's TLS certificate. If
                          both --ca-cert and --ca-path are given, --ca-path
                          is used.

  --tls-skip-verify       Do not verify the server's TLS certificate. Not
                          recommended outside of local testing.";

#[derive(Args, Debug)]
pub struct PolicyWriteArgs {
    /// Policy name, then the path to read it from ("-" for stdin)
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// A validated `policy-write` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub source: PolicySource,
}

impl Invocation {
    /// Build from the positional arguments left after flag parsing.
    pub fn from_args(args: &[String]) -> Result<Self, PolicyWriteError> {
        let [name, source] = args else {
            return Err(PolicyWriteError::Usage(
                "policy-write expects exactly two arguments".into(),
            ));
        };
        if name.is_empty() {
            return Err(PolicyWriteError::Usage("policy name must not be empty".into()));
        }
        Ok(Self {
            name: name.clone(),
            source: PolicySource::parse(source),
        })
    }
}

/// Process streams, passed in so tests can capture them.
pub struct Streams<'a> {
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

/// Run `policy-write` and return the process exit code.
///
/// `client_factory` is called at most once, and only after the arguments
/// validate. The remote write happens at most once, and only after the whole
/// policy is in memory.
pub fn execute<F, FS>(args: &[String], client_factory: F, streams: &mut Streams<'_>, fs: &FS) -> i32
where
    F: FnOnce() -> Result<Box<dyn PolicyClient>, ClientError>,
    FS: Filesystem,
{
    match write_policy(args, client_factory, streams.stdin, fs) {
        Ok(name) => {
            // stdout failures (closed pipe) do not undo a completed write
            let _ = writeln!(streams.stdout, "Policy '{}' written.", name);
            constants::EXIT_SUCCESS
        }
        Err(err) => {
            report(streams.stderr, &err);
            err.exit_code()
        }
    }
}

fn write_policy<F, FS>(
    args: &[String],
    client_factory: F,
    stdin: &mut dyn Read,
    fs: &FS,
) -> Result<String, PolicyWriteError>
where
    F: FnOnce() -> Result<Box<dyn PolicyClient>, ClientError>,
    FS: Filesystem,
{
    let invocation = Invocation::from_args(args)?;
    debug!(policy = %invocation.name, source = %invocation.source, "arguments validated");

    let client = client_factory().map_err(PolicyWriteError::Configuration)?;
    debug!("client ready");

    let rules = source::read_policy(&invocation.source, stdin, fs)?;

    client
        .put_policy(&invocation.name, &rules)
        .map_err(PolicyWriteError::Remote)?;
    info!(policy = %invocation.name, "policy written");

    Ok(invocation.name)
}

fn report(stderr: &mut dyn Write, err: &PolicyWriteError) {
    if let PolicyWriteError::Usage(_) = err {
        let _ = writeln!(stderr, "{}", USAGE);
        let _ = writeln!(stderr);
    }
    let _ = writeln!(stderr, "{}", err);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_args_file() {
        let inv = Invocation::from_args(&args(&["ops", "/etc/ops.hcl"])).unwrap();
        assert_eq!(inv.name, "ops");
        assert_eq!(inv.source, PolicySource::File("/etc/ops.hcl".into()));
    }

    #[test]
    fn test_from_args_stdin() {
        let inv = Invocation::from_args(&args(&["ops", "-"])).unwrap();
        assert_eq!(inv.source, PolicySource::Stdin);
    }

    #[test]
    fn test_from_args_wrong_count() {
        for bad in [vec![], args(&["ops"]), args(&["ops", "a", "b"])] {
            let err = Invocation::from_args(&bad).unwrap_err();
            assert!(matches!(err, PolicyWriteError::Usage(_)));
            assert_eq!(err.to_string(), "policy-write expects exactly two arguments");
        }
    }

    #[test]
    fn test_from_args_empty_name() {
        let err = Invocation::from_args(&args(&["", "-"])).unwrap_err();
        assert!(matches!(err, PolicyWriteError::Usage(_)));
    }

    #[test]
    fn test_report_usage_includes_help() {
        let mut out = Vec::new();
        report(&mut out, &PolicyWriteError::Usage("policy-write expects exactly two arguments".into()));
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Usage: vault policy-write"));
        assert!(text.ends_with("\n\npolicy-write expects exactly two arguments\n"));
    }
}
