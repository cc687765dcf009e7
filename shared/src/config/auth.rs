//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Token validity duration in milliseconds
    pub expiration_ms: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            expiration_ms: 3_600_000, // 1 hour
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiration_ms = minutes * 60_000;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let expiration_ms = std::env::var("JWT_EXPIRATION_MS")
            .unwrap_or_else(|_| "3600000".to_string())
            .parse()
            .unwrap_or(3_600_000);

        Self {
            jwt: JwtConfig {
                secret,
                expiration_ms,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expiration_ms, 3_600_000);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_expiry_minutes(30);

        assert_eq!(config.expiration_ms, 1_800_000);
        assert!(!config.is_using_default_secret());
    }
}
