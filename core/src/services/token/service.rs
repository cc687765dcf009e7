//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{TokenError, TokenResult};

use super::config::TokenServiceConfig;

/// Authorization scheme prefix recognized by [`bearer_token`].
/// The match is case-sensitive.
const BEARER_PREFIX: &str = "Bearer ";

/// Service for issuing and validating self-contained JWT tokens
///
/// The service is stateless: validity is entirely encoded in the token
/// itself, and any unexpired token with a valid signature is accepted.
/// There is no revocation list and no server-side token storage.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// The HMAC keys are derived from the configured secret once, here;
    /// the configuration is never re-read afterwards.
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is a pure wall-clock comparison, no clock-skew tolerance.
        validation.leeway = 0;
        // The issuer claim is written at issuance but not checked here.

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a signed access token for the given identity and roles
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity to embed as the `sub` claim
    /// * `roles` - Role names embedded as the `role` claim, order preserved
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact serialized token
    /// * `Err(TokenError)` - Signing failed
    pub fn issue_token(&self, subject: &str, roles: Vec<String>) -> TokenResult<String> {
        let claims = Claims::new(subject, roles, self.config.expiration_ms);
        self.encode_jwt(&claims)
    }

    /// Re-signs an existing claims set with a fresh validity window
    ///
    /// Refresh tokens reuse the access-token expiration policy.
    pub fn issue_refresh_token(&self, claims: &Claims) -> TokenResult<String> {
        self.encode_jwt(&claims.renewed(self.config.expiration_ms))
    }

    /// Verifies signature integrity and expiration of a token
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The token is valid
    /// * `Err(TokenError)` - Expired, malformed, or otherwise invalid
    pub fn validate_token(&self, token: &str) -> TokenResult<()> {
        self.decode_claims(token).map(|_| ())
    }

    /// Parses a token and returns its subject claim
    ///
    /// Failures propagate with the same taxonomy as [`validate_token`];
    /// callers are expected to validate first.
    pub fn extract_subject(&self, token: &str) -> TokenResult<String> {
        Ok(self.decode_claims(token)?.sub)
    }

    /// Best-effort claim extraction
    ///
    /// Returns `None` instead of an error on any parse or validation
    /// failure. Used for optional claim inspection paths.
    pub fn extract_claims(&self, token: &str) -> Option<Claims> {
        self.decode_claims(token).ok()
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> TokenResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Decodes a token into claims, verifying signature and expiry
    fn decode_claims(&self, token: &str) -> TokenResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}

/// Returns the credential following the `"Bearer "` scheme prefix, if any
///
/// An absent header, a missing prefix, or an empty remainder all yield
/// `None`. Pure string operation, no cryptography.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

/// Maps jsonwebtoken failures onto the domain error taxonomy
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::MalformedToken,
        _ => TokenError::ValidationFailed,
    }
}
