//! Stateless access token codec.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::claims::Claims;
use crate::domain::entities::principal::Principal;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Placeholder secrets that must never reach a running service
const FORBIDDEN_SECRETS: &[&str] = &["", "changeme", "secret", "change-me-in-production"];

/// Service for issuing and validating signed access tokens
///
/// Issuer and verifier are the same process, so a symmetric MAC (HS256)
/// under a single server-held secret is sufficient. The secret is
/// injected once at construction and read-only afterwards; the service is
/// safely shared across concurrent validations.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service
    ///
    /// Refuses to construct when the secret is empty or a known
    /// placeholder: a predictable secret makes every token forgeable, so
    /// an unconfigured deployment must fail at startup rather than run.
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if FORBIDDEN_SECRETS.contains(&config.secret.as_str()) {
            return Err(DomainError::Internal {
                message: "Token signing secret is not configured".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Pinning the algorithm list closes algorithm-confusion attacks: a
        // token declaring any other family fails before key material is used.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a signed access token for the given identity
    ///
    /// Claims carry `issued_at = not_before = now` and expire after the
    /// configured lifetime.
    pub fn issue(
        &self,
        user_id: u64,
        email: &str,
        role_id: u64,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, email, role_id, self.config.token_ttl_hours);
        self.encode(&claims)
    }

    /// Validates a token string and returns the principal it asserts
    ///
    /// Rejects malformed encodings, wrong algorithm families, bad
    /// signatures, expired tokens, and not-yet-valid tokens. The boundary
    /// translates every variant to the same external 401.
    pub fn validate(&self, token: &str) -> Result<Principal, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::Expired)
                }
                jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                    DomainError::Token(TokenError::NotYetValid)
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidFormat),
            })?;

        Ok(token_data.claims.principal())
    }

    /// Encodes a claim set into a signed token string
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }
}
