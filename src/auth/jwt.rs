use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Account, Role};

const ACCESS_TOKEN_TTL_MINUTES: i64 = 60;
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// HS256 signer/verifier for the access/refresh token pair. Access and
/// refresh tokens use separate secrets so one cannot stand in for the
/// other.
pub struct Jwt {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl Jwt {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }

    pub fn issue_pair(&self, account: &Account) -> Result<TokenPair> {
        let now = Utc::now();

        let access_token = self.sign(
            account,
            now.timestamp(),
            (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp(),
            &self.access_encoding,
        )?;
        let refresh_token = self.sign(
            account,
            now.timestamp(),
            (now + Duration::days(REFRESH_TOKEN_TTL_DAYS)).timestamp(),
            &self.refresh_encoding,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// A fresh access token minted from a valid refresh token.
    pub fn refresh_access(&self, refresh_token: &str) -> Result<String> {
        let claims = self.verify(refresh_token, &self.refresh_decoding)?;
        let now = Utc::now();

        let claims = Claims {
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp(),
            ..claims
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to encode token: {}", e)))
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        self.verify(token, &self.access_decoding)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        self.verify(token, &self.refresh_decoding)
    }

    fn sign(&self, account: &Account, iat: i64, exp: i64, key: &EncodingKey) -> Result<String> {
        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            iat,
            exp,
        };

        encode(&Header::default(), &claims, key)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to encode token: {}", e)))
    }

    fn verify(&self, token: &str, key: &DecodingKey) -> Result<Claims> {
        decode::<Claims>(token, key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "clinic@example.com".to_string(),
            password: "hash".to_string(),
            role,
            otp: None,
            otp_expires_at: None,
            is_email_verified: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trips() {
        let jwt = Jwt::new("access-secret", "refresh-secret");
        let account = account(Role::Provider);

        let pair = jwt.issue_pair(&account).unwrap();
        let claims = jwt.verify_access(&pair.access_token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, account.email);
        assert_eq!(claims.role, Role::Provider);
    }

    #[test]
    fn refresh_token_is_not_a_valid_access_token() {
        let jwt = Jwt::new("access-secret", "refresh-secret");
        let pair = jwt.issue_pair(&account(Role::Patient)).unwrap();

        assert!(jwt.verify_access(&pair.refresh_token).is_err());
        assert!(jwt.verify_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let jwt = Jwt::new("access-secret", "refresh-secret");
        let other = Jwt::new("different", "secrets");

        let pair = other.issue_pair(&account(Role::Patient)).unwrap();
        assert!(jwt.verify_access(&pair.access_token).is_err());
    }

    #[test]
    fn refresh_access_mints_a_verifiable_token() {
        let jwt = Jwt::new("access-secret", "refresh-secret");
        let account = account(Role::Patient);

        let pair = jwt.issue_pair(&account).unwrap();
        let access = jwt.refresh_access(&pair.refresh_token).unwrap();

        let claims = jwt.verify_access(&access).unwrap();
        assert_eq!(claims.sub, account.id);
    }

    #[test]
    fn garbage_tokens_are_unauthorized() {
        let jwt = Jwt::new("access-secret", "refresh-secret");
        assert!(matches!(
            jwt.verify_access("not-a-token"),
            Err(ApiError::Unauthorized)
        ));
    }
}
