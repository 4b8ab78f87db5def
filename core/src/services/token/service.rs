//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use todo_shared::MIN_SIGNING_KEY_BYTES;
use uuid::Uuid;

use crate::domain::entities::token::{AccessToken, Claims};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::AccessTokenRepository;

use super::config::TokenServiceConfig;

/// Service for issuing, verifying and revoking JWT access tokens
pub struct TokenService<T: AccessTokenRepository> {
    pub(crate) repository: Arc<T>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<T: AccessTokenRepository> TokenService<T> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Access token store consulted on every validation
    /// * `config` - Token service configuration
    ///
    /// # Errors
    ///
    /// * `TokenError::WeakSigningKey` - Decoded secret shorter than
    ///   [`MIN_SIGNING_KEY_BYTES`]
    pub fn new(repository: Arc<T>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        let key = config.signing_key();
        if key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(TokenError::WeakSigningKey {
                min_bytes: MIN_SIGNING_KEY_BYTES,
            }
            .into());
        }
        let encoding_key = EncodingKey::from_secret(&key);
        let decoding_key = DecodingKey::from_secret(&key);

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    /// Generates a signed access token bound to `username`
    ///
    /// The token is not persisted. Use [`issue`](Self::issue) to record it.
    pub fn generate_token(&self, username: &str) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            username,
            Duration::seconds(self.config.access_token_expiry_seconds),
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Decodes a JWT, checking signature and expiry only
    fn decode_claims(&self, jwt: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(jwt, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;

        Ok(token_data.claims)
    }

    /// Returns the username a token was issued to
    ///
    /// # Errors
    ///
    /// Fails when the signature is invalid, the token is malformed or expired.
    pub fn extract_username(&self, jwt: &str) -> Result<String, DomainError> {
        self.decode_claims(jwt).map(|claims| claims.sub)
    }

    /// Validates a token for `username` and returns its stored record
    ///
    /// # Returns
    ///
    /// * `Ok(AccessToken)` - Signature, expiry and subject check out and the
    ///   token is recorded as not logged out
    /// * `Err(TokenError::SubjectMismatch)` - Token belongs to someone else
    /// * `Err(TokenError::TokenRevoked)` - Token unknown to the store or logged out
    pub async fn validate(&self, jwt: &str, username: &str) -> Result<AccessToken, DomainError> {
        let claims = self.decode_claims(jwt)?;
        if !claims.is_for(username) {
            return Err(TokenError::SubjectMismatch.into());
        }
        self.stored_valid(jwt).await
    }

    /// Verifies a token without an expected subject
    ///
    /// Returns the decoded claims together with the stored record.
    pub async fn verify(&self, jwt: &str) -> Result<(Claims, AccessToken), DomainError> {
        let claims = self.decode_claims(jwt)?;
        let record = self.stored_valid(jwt).await?;
        Ok((claims, record))
    }

    /// Convenience check over [`validate`](Self::validate)
    pub async fn is_valid(&self, jwt: &str, username: &str) -> bool {
        self.validate(jwt, username).await.is_ok()
    }

    async fn stored_valid(&self, jwt: &str) -> Result<AccessToken, DomainError> {
        match self.repository.find_by_token(jwt).await? {
            Some(record) if record.is_valid() => Ok(record),
            _ => Err(TokenError::TokenRevoked.into()),
        }
    }

    /// Issues a new access token for `user`, revoking every earlier one
    ///
    /// Revocation and insertion happen in one store operation.
    ///
    /// # Returns
    ///
    /// The signed JWT and the number of tokens that were revoked.
    pub async fn issue(&self, user: &User) -> Result<(String, usize), DomainError> {
        let jwt = self.generate_token(&user.username)?;
        let revoked = self
            .repository
            .replace_for_user(AccessToken::new(user.id, jwt.clone()))
            .await?;

        tracing::debug!(
            user_id = %user.id,
            revoked_tokens = revoked,
            event = "access_token_issued",
            "Issued access token"
        );

        Ok((jwt, revoked))
    }

    /// Revokes one access token, leaving the user's other records alone
    pub async fn revoke(&self, jwt: &str) -> Result<bool, DomainError> {
        self.repository.revoke_token(jwt).await
    }

    /// Revokes every valid access token of a user
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let revoked = self.repository.revoke_all_for_user(user_id).await?;

        tracing::debug!(
            user_id = %user_id,
            revoked_tokens = revoked,
            event = "access_tokens_revoked",
            "Revoked access tokens"
        );

        Ok(revoked)
    }
}
