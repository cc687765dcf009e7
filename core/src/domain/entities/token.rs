//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// JWT issuer, stamped into every token. The issuer is informational
/// metadata: it is written at issuance and not checked during validation.
pub const ISSUER: &str = "signet";

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identity, typically an email)
    pub sub: String,

    /// Role names granted to the subject, in grant order
    pub role: Vec<String>,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims valid for `validity_ms` milliseconds from now
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity the token is issued to
    /// * `roles` - Role names granted to the subject
    /// * `validity_ms` - Validity window in milliseconds
    ///
    /// # Returns
    ///
    /// A new `Claims` instance with `iat` set to the current time
    pub fn new(subject: impl Into<String>, roles: Vec<String>, validity_ms: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::milliseconds(validity_ms);

        Self {
            sub: subject.into(),
            role: roles,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Re-stamps the claims with a fresh validity window
    ///
    /// The subject and roles carry over unchanged; `iat` and `exp` are
    /// recomputed from the current time.
    pub fn renewed(&self, validity_ms: i64) -> Self {
        Self::new(self.sub.clone(), self.role.clone(), validity_ms)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Convenience helper for role checks
    pub fn has_role(&self, role: &str) -> bool {
        self.role.iter().any(|value| value == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new(
            "alice@example.com",
            vec!["ADMIN".to_string(), "USER".to_string()],
            3_600_000,
        );

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.role, vec!["ADMIN", "USER"]);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new("alice@example.com", vec![], 3_600_000);

        // Set expiration to past
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_role_check() {
        let claims = Claims::new(
            "alice@example.com",
            vec!["ADMIN".to_string()],
            3_600_000,
        );

        assert!(claims.has_role("ADMIN"));
        assert!(!claims.has_role("USER"));
        assert!(!claims.has_role("admin"));
    }

    #[test]
    fn test_renewed_claims() {
        let mut claims = Claims::new(
            "alice@example.com",
            vec!["USER".to_string()],
            3_600_000,
        );
        claims.iat -= 1800;
        claims.exp -= 1800;

        let renewed = claims.renewed(3_600_000);

        assert_eq!(renewed.sub, claims.sub);
        assert_eq!(renewed.role, claims.role);
        assert_eq!(renewed.exp - renewed.iat, 3600);
        assert!(renewed.exp > claims.exp);
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new(
            "alice@example.com",
            vec!["ADMIN".to_string(), "USER".to_string()],
            3_600_000,
        );

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
