//! Policy source resolution: standard input or a named file.

use crate::constants;
use crate::error::PolicyWriteError;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the policy text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    Stdin,
    File(PathBuf),
}

impl PolicySource {
    /// `-` selects standard input; anything else is a path.
    pub fn parse(token: &str) -> Self {
        if token == constants::STDIN_SOURCE {
            PolicySource::Stdin
        } else {
            PolicySource::File(PathBuf::from(token))
        }
    }
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicySource::Stdin => write!(f, "<stdin>"),
            PolicySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Filesystem access used to open policy files.
pub trait Filesystem {
    type File: Read;

    fn open(&self, path: &Path) -> io::Result<Self::File>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    type File = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

/// Read the whole policy from `source` into memory.
///
/// `stdin` is only touched for [`PolicySource::Stdin`]. A file handle lives
/// only for the duration of this call.
pub fn read_policy<F: Filesystem>(
    source: &PolicySource,
    stdin: &mut dyn Read,
    fs: &F,
) -> Result<String, PolicyWriteError> {
    match source {
        PolicySource::Stdin => read_all(stdin),
        PolicySource::File(path) => {
            let mut file = fs.open(path).map_err(|source| PolicyWriteError::Open {
                path: path.clone(),
                source,
            })?;
            read_all(&mut file)
        }
    }
}

fn read_all<R: Read + ?Sized>(reader: &mut R) -> Result<String, PolicyWriteError> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|source| PolicyWriteError::Read { source })?;
    debug!(bytes = buf.len(), "policy buffered");
    Ok(buf)
}
