//! Anti-forgery service - issues and verifies request verification tokens.
//!
//! Tokens are short-lived HS256 JWTs carrying a fixed purpose claim, so a
//! token minted for anything else is never accepted here.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, ANTIFORGERY_HEADER, ANTIFORGERY_PURPOSE, SECONDS_PER_MINUTE};
use crate::errors::{AppError, AppResult};

/// Anti-forgery token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub purpose: String,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly issued token
#[derive(Debug, Serialize, ToSchema)]
pub struct AntiforgeryToken {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Header the token must be sent in
    #[schema(example = "RequestVerificationToken")]
    pub header: String,
    /// Lifetime in seconds
    #[schema(example = 7200)]
    pub expires_in: i64,
}

/// Anti-forgery service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait AntiforgeryService: Send + Sync {
    fn issue(&self) -> AppResult<AntiforgeryToken>;

    /// Accept only unexpired tokens signed with our secret for this purpose
    fn verify(&self, token: &str) -> AppResult<()>;
}

/// Concrete implementation of AntiforgeryService.
pub struct Antiforgery {
    config: Config,
}

impl Antiforgery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl AntiforgeryService for Antiforgery {
    fn issue(&self) -> AppResult<AntiforgeryToken> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.config.antiforgery_ttl_minutes);

        let claims = Claims {
            purpose: ANTIFORGERY_PURPOSE.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.antiforgery_secret_bytes()),
        )?;

        Ok(AntiforgeryToken {
            token,
            header: ANTIFORGERY_HEADER.to_string(),
            expires_in: self.config.antiforgery_ttl_minutes * SECONDS_PER_MINUTE,
        })
    }

    fn verify(&self, token: &str) -> AppResult<()> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.antiforgery_secret_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Anti-forgery token rejected");
            AppError::InvalidAntiforgeryToken
        })?;

        if token_data.claims.purpose != ANTIFORGERY_PURPOSE {
            return Err(AppError::InvalidAntiforgeryToken);
        }
        Ok(())
    }
}
