//! Secret credential wrappers
//!
//! The Garmin password and the Notion token are held in [`SecretString`] from
//! the moment they are read. The inner buffer is zeroized on drop and `Debug`
//! output is redacted, so a logged config never leaks either value.
//!
//! ```rust
//! use garmin_backfill::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("secret_abc".to_string());
//! assert_eq!(token.expose_secret().as_str(), "secret_abc");
//! assert!(!format!("{token:?}").contains("secret_abc"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Owned credential text; zeroized on drop, never printed
#[derive(Clone, Zeroize, Serialize, Deserialize)]
#[zeroize(drop)]
#[serde(transparent)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    /// True for empty or whitespace-only values, which count as unset
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Credential as held in configuration
pub type SecretString = Secret<SecretValue>;

pub fn secret_string(value: String) -> SecretString {
    Secret::new(value.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("hunter2".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let secret = secret_string("   ".to_string());
        assert!(secret.expose_secret().is_empty());
        assert!(!secret_string("x".to_string()).expose_secret().is_empty());
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            token: SecretString,
        }

        let section: Section = toml::from_str(r#"token = "secret_abc""#).unwrap();
        assert_eq!(section.token.expose_secret(), "secret_abc");
    }
}
