//! Authorization endpoint configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [authorize]
//! min_state_length = 16
//! ```

use serde::{Deserialize, Serialize};

/// Smallest state length the endpoint will ever accept.
///
/// Shorter values cannot be considered unguessable (RFC 6819 4.4.1.8).
pub const MIN_STATE_LENGTH: usize = 8;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured value is outside its allowed range.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },
}

/// Authorization endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthorizeConfig {
    /// Minimum number of characters in the `state` parameter.
    /// Values below [`MIN_STATE_LENGTH`] are rejected by [`Self::validate`].
    pub min_state_length: usize,
}

impl Default for AuthorizeConfig {
    fn default() -> Self {
        Self {
            min_state_length: MIN_STATE_LENGTH,
        }
    }
}

impl AuthorizeConfig {
    /// Creates a new configuration with a custom minimum state length.
    #[must_use]
    pub fn with_min_state_length(mut self, length: usize) -> Self {
        self.min_state_length = length;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_state_length` is lower than [`MIN_STATE_LENGTH`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_state_length < MIN_STATE_LENGTH {
            return Err(ConfigError::InvalidValue {
                field: "min_state_length",
                message: format!(
                    "must be at least {MIN_STATE_LENGTH}, got {}",
                    self.min_state_length
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthorizeConfig::default();
        assert_eq!(config.min_state_length, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weaker_state_length_rejected() {
        let config = AuthorizeConfig::default().with_min_state_length(4);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_state_length"));
    }

    #[test]
    fn test_stricter_state_length_allowed() {
        let config = AuthorizeConfig::default().with_min_state_length(32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AuthorizeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AuthorizeConfig::default());

        let config: AuthorizeConfig =
            serde_json::from_str(r#"{"min_state_length": 12}"#).unwrap();
        assert_eq!(config.min_state_length, 12);
    }
}
