//! Authentication extractor
//!
//! Identity is optional on every advisory endpoint. A request without an
//! Authorization header is anonymous; one carrying a bad bearer token is
//! rejected.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Caller identity, `None` for anonymous requests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity(pub Option<Uuid>);

impl Identity {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0
    }

    /// Prefer the authenticated user, otherwise fall back to `other`
    pub fn or(self, other: Option<Uuid>) -> Option<Uuid> {
        self.0.or(other)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Identity(None));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::InvalidToken("Missing bearer scheme".to_string()))?;

        let user_id = decode_user_id(bearer.token(), &state.config.jwt.secret)?;
        Ok(Identity(Some(user_id)))
    }
}

/// Decode and validate a JWT token, returning the user it was issued to
pub fn decode_user_id(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::InvalidToken(e.to_string()))?;

    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::InvalidToken("Invalid user ID in token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(sub: &str, secret: &str, exp_offset: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + exp_offset,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let user_id = Uuid::new_v4();
        let token = token_for(&user_id.to_string(), "secret", 3600);
        assert_eq!(decode_user_id(&token, "secret").unwrap(), user_id);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = token_for(&Uuid::new_v4().to_string(), "secret", 3600);
        assert!(matches!(
            decode_user_id(&token, "other"),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = token_for(&Uuid::new_v4().to_string(), "secret", -3600);
        assert!(decode_user_id(&token, "secret").is_err());
    }

    #[test]
    fn test_rejects_non_uuid_subject() {
        let token = token_for("farmer-42", "secret", 3600);
        assert!(decode_user_id(&token, "secret").is_err());
    }

    #[test]
    fn test_identity_precedence() {
        let authed = Uuid::new_v4();
        let claimed = Uuid::new_v4();
        assert_eq!(Identity(Some(authed)).or(Some(claimed)), Some(authed));
        assert_eq!(Identity(None).or(Some(claimed)), Some(claimed));
        assert_eq!(Identity::default().or(None), None);
    }
}
