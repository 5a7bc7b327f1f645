//! Session token issuing and verification.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserRole;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Interface the authentication flow uses to mint and check session tokens
pub trait TokenIssuer: Send + Sync {
    /// Sign a session token for a user
    ///
    /// `role` is included as a claim when present (login tokens) and
    /// omitted entirely otherwise (registration tokens).
    fn sign_session(
        &self,
        user_id: Uuid,
        email: &str,
        role: Option<UserRole>,
    ) -> Result<String, TokenError>;

    /// Verify a session token and return its claims
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// JWT implementation of [`TokenIssuer`] using HS256
pub struct JwtTokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    /// Creates a new token service from configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt.issuer]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) => {
                TokenError::InvalidTokenFormat
            }
            _ => TokenError::InvalidClaims,
        }
    }
}

impl TokenIssuer for JwtTokenService {
    fn sign_session(
        &self,
        user_id: Uuid,
        email: &str,
        role: Option<UserRole>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(
            user_id,
            email,
            role,
            Utc::now(),
            self.config.jwt.access_token_expiry,
            self.config.jwt.issuer.clone(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(Self::map_decode_error)
    }
}
