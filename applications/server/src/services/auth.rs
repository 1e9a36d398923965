/// Authentication service - JWT and password handling
///
/// Issues the identity claims the rest of the application consumes as
/// `cantor_core::auth::AuthUser`: a stable user id plus the sign-in email.
use crate::error::{Result, ServerError};
use cantor_core::auth::AuthUser;
use cantor_core::types::{User, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_expiration: Duration,
    refresh_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// The two tokens handed out on login and refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            secret,
            access_expiration: Duration::hours(access_expiration_hours as i64),
            refresh_expiration: Duration::days(refresh_expiration_days as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Issue an access/refresh token pair for a signed-in user
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_token(
                &user.id,
                &user.email,
                TokenType::Access,
                self.access_expiration,
            )?,
            refresh_token: self.create_token(
                &user.id,
                &user.email,
                TokenType::Refresh,
                self.refresh_expiration,
            )?,
        })
    }

    /// Issue a fresh access token after a successful refresh
    pub fn refresh_access_token(&self, user: &User) -> Result<String> {
        self.create_token(
            &user.id,
            &user.email,
            TokenType::Access,
            self.access_expiration,
        )
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify an access token and return the identity claim it carries
    pub fn verify_access_token(&self, token: &str) -> Result<AuthUser> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(AuthUser::new(UserId::new(claims.sub), claims.email))
    }

    /// Verify a refresh token and return the user id it was issued to
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }

    fn create_token(
        &self,
        user_id: &UserId,
        email: &str,
        token_type: TokenType,
        expiration: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + expiration;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("secret".to_string(), 24, 30)
    }

    fn user() -> User {
        User::new("alice@example.com", "Alice")
    }

    #[test]
    fn password_hashing_round_trip() {
        let auth = service();
        let hash = auth.hash_password("my_secure_password").unwrap();
        assert!(auth.verify_password("my_secure_password", &hash).unwrap());
        assert!(!auth.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn access_token_carries_identity() {
        let auth = service();
        let user = user();

        let pair = auth.issue_pair(&user).unwrap();
        let claim = auth.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claim.uid, user.id);
        assert_eq!(claim.email, "alice@example.com");
    }

    #[test]
    fn refresh_token_round_trip() {
        let auth = service();
        let user = user();

        let pair = auth.issue_pair(&user).unwrap();
        let uid = auth.verify_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(uid, user.id);
    }

    #[test]
    fn token_types_do_not_cross() {
        let auth = service();
        let user = user();
        let pair = auth.issue_pair(&user).unwrap();

        assert!(auth.verify_refresh_token(&pair.access_token).is_err());
        assert!(auth.verify_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let auth = service();
        let other = AuthService::new("other-secret".to_string(), 24, 30);
        let pair = other.issue_pair(&user()).unwrap();

        assert!(auth.verify_access_token(&pair.access_token).is_err());
    }
}
