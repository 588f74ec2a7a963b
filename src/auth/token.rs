// JWT session token validation
//
// Token issuance belongs to the external auth provider; this service only
// mints tokens for tests and validates the bearer tokens presented to the
// API.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::models::Role;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // profile id
    pub email: String,
    pub role: Role,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Token service for JWT operations
pub struct TokenService {
    secret: String,
    session_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with secret key.
    /// Session tokens expire in 1 hour (3600 seconds).
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            session_duration: 3600,
        }
    }

    /// Generate a session token
    pub fn generate_session_token(
        &self,
        profile_id: Uuid,
        email: &str,
        role: Role,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let exp = now + self.session_duration;

        let claims = Claims {
            sub: profile_id,
            email: email.to_string(),
            role,
            iat: now,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate a session token and return its claims
    pub fn validate_session_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::default();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::ExpiredToken
            } else {
                AuthError::InvalidToken
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn test_session_token_round_trip() {
        let service = test_token_service();
        let profile_id = Uuid::new_v4();

        let token = service
            .generate_session_token(profile_id, "noa@example.com", Role::Customer)
            .unwrap();
        let claims = service.validate_session_token(&token).unwrap();

        assert_eq!(claims.sub, profile_id);
        assert_eq!(claims.email, "noa@example.com");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_with_wrong_secret_rejected() {
        let service = test_token_service();
        let other = TokenService::new("a_different_secret".to_string());

        let token = other
            .generate_session_token(Uuid::new_v4(), "noa@example.com", Role::Customer)
            .unwrap();

        assert!(matches!(
            service.validate_session_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_token_service();
        assert!(matches!(
            service.validate_session_token("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
