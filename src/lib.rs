//! Command-line client for writing access policies to a remote vault server.
//!
//! Implements `vault policy-write`: reads a named policy from a file or
//! standard input and submits it in a single authenticated API call.
//!
//! ## Modules
//! - `cli` — Argument parsing and the `policy-write` handler
//! - `core` — Client config resolution, policy sources, HTTP client
//! - `error` — Error taxonomy and exit codes
//! - `models` — Config file and API payload structures
//! - `util` — Logging setup

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;
