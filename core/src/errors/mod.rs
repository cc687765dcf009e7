//! Domain-specific error types for token operations.
//!
//! Validation failures are normalized into a single typed error with a
//! descriptive reason; callers branch on the variant instead of catching
//! exceptions. Nothing here is retried or logged - the caller decides how
//! to respond.

use thiserror::Error;

/// Token validation and issuance errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token validation failed")]
    ValidationFailed,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

pub type TokenResult<T> = Result<T, TokenError>;
