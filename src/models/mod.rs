//! Data structures for the config file and API payloads.

pub mod client_config;
pub mod policy;
