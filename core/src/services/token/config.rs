//! Configuration for the token service

use signet_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub secret: String,
    /// Token validity duration in milliseconds
    pub expiration_ms: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            expiration_ms: 3_600_000,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            expiration_ms: config.expiration_ms,
        }
    }
}
