//! Core logic: config resolution, policy sources, and the remote client.

pub mod client;
pub mod config;
pub mod http;
pub mod source;
