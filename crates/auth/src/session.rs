//! Authenticated sessions and the provider that derives them from tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Serialize;
use thiserror::Error;

use learnhub_core::UserId;

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};
use crate::roles::Role;

/// Identity attached to a single request.
///
/// `role` may be absent when the identity provider issued a session before a
/// role was assigned; such sessions are treated as unauthenticated for
/// navigation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: UserId,
    pub role: Option<Role>,
}

impl Session {
    pub fn new(user_id: UserId, role: Option<Role>) -> Self {
        Self { user_id, role }
    }

    /// A blank role claim counts as no role at all.
    pub fn from_claims(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims
                .role
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(Role::from_claim),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("malformed or unsigned session token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Resolves the session for a request from an opaque token.
pub trait SessionProvider: Send + Sync {
    fn session(&self, token: &str, now: DateTime<Utc>) -> Result<Session, SessionError>;
}

/// HS256-signed JWT session tokens.
pub struct Hs256SessionProvider {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256SessionProvider {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time window lives in `issued_at`/`expires_at` and is checked by
        // `validate_claims`, not by the registered `exp` claim.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl SessionProvider for Hs256SessionProvider {
    fn session(&self, token: &str, now: DateTime<Utc>) -> Result<Session, SessionError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

        validate_claims(&data.claims, now)?;

        Ok(Session::from_claims(&data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &[u8] = b"test-secret";

    fn mint(secret: &[u8], role: Option<&str>, issued_at: DateTime<Utc>) -> (UserId, String) {
        let sub = UserId::new();
        let claims = SessionClaims {
            sub,
            role: role.map(str::to_string),
            issued_at,
            expires_at: issued_at + Duration::minutes(10),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();
        (sub, token)
    }

    #[test]
    fn valid_token_yields_session_with_role() {
        let now = Utc::now();
        let (sub, token) = mint(SECRET, Some("INSTRUCTOR"), now);

        let session = Hs256SessionProvider::new(SECRET).session(&token, now).unwrap();
        assert_eq!(session, Session::new(sub, Some(Role::Instructor)));
    }

    #[test]
    fn token_without_role_yields_roleless_session() {
        let now = Utc::now();
        let (_, token) = mint(SECRET, None, now);

        let session = Hs256SessionProvider::new(SECRET).session(&token, now).unwrap();
        assert_eq!(session.role, None);
    }

    #[test]
    fn blank_role_claim_yields_roleless_session() {
        let now = Utc::now();
        for blank in ["", "   "] {
            let (_, token) = mint(SECRET, Some(blank), now);

            let session = Hs256SessionProvider::new(SECRET).session(&token, now).unwrap();
            assert_eq!(session.role, None, "claim {blank:?}");
        }
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let (_, token) = mint(b"other-secret", Some("ADMIN"), now);

        let err = Hs256SessionProvider::new(SECRET).session(&token, now).unwrap_err();
        assert!(matches!(err, SessionError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let (_, token) = mint(SECRET, Some("STUDENT"), now - Duration::hours(1));

        let err = Hs256SessionProvider::new(SECRET).session(&token, now).unwrap_err();
        assert_eq!(err, SessionError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Hs256SessionProvider::new(SECRET)
            .session("not.a.jwt", Utc::now())
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidToken(_)));
    }
}
