//! Principal identity type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An authenticated caller identity: voter, poll creator, or ledger owner.
///
/// Principals are `0x`-prefixed address strings. The ledger treats them as
/// opaque and unforgeable; whoever runs the boundary (an HTTP server, a
/// chain runtime) is responsible for authenticating them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal(String);

/// Error returned when parsing a malformed principal string.
#[derive(Debug, Error)]
#[error("invalid principal address: {0:?}")]
pub struct InvalidPrincipal(pub String);

impl Principal {
    /// The standard prefix for all principal addresses.
    pub const PREFIX: &'static str = "0x";

    /// Create a principal from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `0x`. Use [`Principal::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "principal must start with 0x");
        Self(s)
    }

    /// Parse a principal from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, InvalidPrincipal> {
        if raw.starts_with(Self::PREFIX) && raw.len() > Self::PREFIX.len() {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidPrincipal(raw.to_string()))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_address() {
        let p = Principal::parse("0xabc123").unwrap();
        assert_eq!(p.as_str(), "0xabc123");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(Principal::parse("abc123").is_err());
    }

    #[test]
    fn parse_rejects_bare_prefix() {
        assert!(Principal::parse("0x").is_err());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_bad_prefix() {
        Principal::new("not-an-address");
    }
}
