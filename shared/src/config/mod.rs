//! Configuration module
//!
//! Configuration is loaded once at process start and treated as immutable
//! afterwards. Only the signing secret and the token validity window are
//! configurable; the issuer claim is a fixed literal in the core crate.

pub mod auth;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
