//! The remote write capability consumed by `policy-write`.

use crate::error::ClientError;

/// A remote store that accepts named policies.
///
/// Implementations own transport concerns (TLS, auth, timeouts). Callers
/// invoke [`PolicyClient::put_policy`] once per write and never retry.
pub trait PolicyClient {
    /// Create or replace the policy `name` with the full text `rules`.
    fn put_policy(&self, name: &str, rules: &str) -> Result<(), ClientError>;
}
