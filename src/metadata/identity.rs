//! Module identity and public key tokens.
//!
//! A strong-named module is identified by its name, version, culture and public key. Since
//! the full key is long, references carry the *public key token* instead: the last 8 bytes of
//! the SHA-1 hash of the key, in reverse order. This module computes that token and renders
//! the identity the way the host runtime prints assembly-qualified names.
//!
//! # Example
//! ```rust
//! use dotinspect::metadata::identity::Identity;
//!
//! let token = Identity::Token(0xb77a_5c56_1934_e089);
//! assert_eq!(token.to_token(), 0xb77a_5c56_1934_e089);
//! assert_eq!(token.to_string(), "b77a5c561934e089");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::Result;

/// A public key, or the token derived from one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The full public key
    PubKey(Vec<u8>),
    /// 8-byte token: the end of the SHA-1 hash of the public key
    Token(u64),
}

impl Identity {
    /// Get the token; for a public key this is the last 8 bytes of its SHA-1 hash.
    #[must_use]
    pub fn to_token(&self) -> u64 {
        match self {
            Identity::PubKey(data) => {
                let mut hasher = Sha1::new();
                hasher.update(data);

                let result = hasher.finalize();

                let mut tail = [0u8; 8];
                tail.copy_from_slice(&result[result.len() - 8..]);
                u64::from_le_bytes(tail)
            }
            Identity::Token(token) => *token,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.to_token())
    }
}

/// Name, version, culture and key of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIdentity {
    /// Simple module name, e.g. `Acme.Widgets`
    pub name: String,
    /// Four-part version, e.g. `1.2.0.0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Culture; absent or empty for culture-neutral modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    /// Public key, hex-encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Public key token, hex-encoded; used when the full key is not known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_token: Option<String>,
}

impl ModuleIdentity {
    /// Create an identity with a name and version, without culture or key.
    #[must_use]
    pub fn new(name: &str, version: &str) -> Self {
        ModuleIdentity {
            name: name.to_string(),
            version: Some(version.to_string()),
            ..Default::default()
        }
    }

    /// The key identity, preferring the full public key over a stored token.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the key or token is not valid hex.
    pub fn identity(&self) -> Result<Option<Identity>> {
        if let Some(key) = self.public_key.as_deref().filter(|key| !key.is_empty()) {
            return Ok(Some(Identity::PubKey(decode_hex(key)?)));
        }

        match self.public_key_token.as_deref().filter(|token| !token.is_empty()) {
            Some(token) => match u64::from_str_radix(token, 16) {
                Ok(value) if token.len() == 16 => Ok(Some(Identity::Token(value))),
                _ => Err(malformed_error!("Invalid public key token - {}", token)),
            },
            None => Ok(None),
        }
    }

    /// The culture label: the culture name, or `neutral`.
    #[must_use]
    pub fn culture_label(&self) -> &str {
        self.culture
            .as_deref()
            .filter(|culture| !culture.is_empty())
            .unwrap_or("neutral")
    }

    /// The version, or `0.0.0.0` when unknown.
    #[must_use]
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("0.0.0.0")
    }

    /// The display name used in assembly-qualified type names:
    /// `Name, Version=v, Culture=c, PublicKeyToken=t`.
    ///
    /// An undecodable key renders as `PublicKeyToken=null`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let token = match self.identity() {
            Ok(Some(identity)) => identity.to_string(),
            _ => "null".to_string(),
        };

        format!(
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name,
            self.version_label(),
            self.culture_label(),
            token
        )
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    if text.len() % 2 != 0 {
        return Err(malformed_error!("Odd-length hex string - {}", text.len()));
    }

    (0..text.len())
        .step_by(2)
        .map(|pos| {
            text.get(pos..pos + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| malformed_error!("Invalid hex at offset {}", pos))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ECMA standard public key, token b77a5c561934e089
    const ECMA_KEY: &str = "00000000000000000400000000000000";

    #[test]
    fn token_from_ecma_key() {
        let identity = Identity::PubKey(decode_hex(ECMA_KEY).unwrap());
        assert_eq!(identity.to_string(), "b77a5c561934e089");
    }

    #[test]
    fn token_is_passed_through() {
        assert_eq!(Identity::Token(0x1234).to_token(), 0x1234);
        assert_eq!(Identity::Token(0x1234).to_string(), "0000000000001234");
    }

    #[test]
    fn display_name_without_key() {
        let identity = ModuleIdentity::new("Acme.Widgets", "1.2.0.0");
        assert_eq!(
            identity.display_name(),
            "Acme.Widgets, Version=1.2.0.0, Culture=neutral, PublicKeyToken=null"
        );
    }

    #[test]
    fn display_name_with_key_and_culture() {
        let identity = ModuleIdentity {
            name: "mscorlib".to_string(),
            version: Some("4.0.0.0".to_string()),
            culture: Some("en-US".to_string()),
            public_key: Some(ECMA_KEY.to_string()),
            public_key_token: None,
        };
        assert_eq!(
            identity.display_name(),
            "mscorlib, Version=4.0.0.0, Culture=en-US, PublicKeyToken=b77a5c561934e089"
        );
    }

    #[test]
    fn stored_token() {
        let identity = ModuleIdentity {
            public_key_token: Some("b03f5f7f11d50a3a".to_string()),
            ..ModuleIdentity::new("System.Core", "4.0.0.0")
        };
        assert_eq!(
            identity.identity().unwrap(),
            Some(Identity::Token(0xb03f_5f7f_11d5_0a3a))
        );
    }

    #[test]
    fn invalid_key_material() {
        let odd = ModuleIdentity {
            public_key: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(odd.identity().is_err());
        assert!(odd.display_name().ends_with("PublicKeyToken=null"));

        let short_token = ModuleIdentity {
            public_key_token: Some("abcd".to_string()),
            ..Default::default()
        };
        assert!(short_token.identity().is_err());
    }
}
