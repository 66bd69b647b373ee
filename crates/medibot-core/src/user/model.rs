//! Identity domain model.
//!
//! The display name is the only credential the remote API knows about.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MedibotError, Result};

/// A signed-in user's display name.
///
/// Always trimmed and never empty. Construct with [`Identity::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validates raw user input and builds an identity from it.
    ///
    /// Surrounding whitespace is dropped; a blank name is a validation error.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MedibotError::validation("Username cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = MedibotError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let identity = Identity::parse("  alice \n").unwrap();
        assert_eq!(identity.as_str(), "alice");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(Identity::parse("").unwrap_err().is_validation());
        assert!(Identity::parse("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        let parsed: std::result::Result<Identity, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
    }
}
