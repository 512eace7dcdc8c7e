//! Session credential verification.
//!
//! The credential is an HS256-signed token issued by the authentication
//! collaborator (login flow). This module only reads and verifies it; Folio
//! never mints or mutates tokens. Verification failures of any kind are
//! expected outcomes, mapped by the gate to a login redirect — they are not
//! server errors.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::FolioError;
use crate::principal::{Principal, Role};

/// Claims carried in a session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject identifier (user id or email).
    pub sub: String,
    pub role: Role,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }
}

/// Why a presented credential was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no credential presented")]
    Missing,

    #[error("credential has expired")]
    Expired,

    #[error("credential signature is invalid")]
    SignatureInvalid,

    #[error("credential is malformed: {0}")]
    Malformed(String),

    /// The verification primitive failed for a reason other than "this
    /// token is bad". Still treated as a rejection (fail closed), but
    /// logged separately so operators can see it.
    #[error("unexpected verification failure: {0}")]
    Unexpected(String),
}

/// Verifies session credentials against the configured signing secret.
///
/// Holds only the decoding key and validation rules; no per-request state.
/// Expiry is checked with zero leeway, so a token one second past its `exp`
/// is rejected exactly like an absent one.
#[derive(Clone)]
pub struct CredentialVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl CredentialVerifier {
    /// Build a verifier from the signing secret.
    ///
    /// An empty secret is a fatal configuration error: the process must not
    /// come up able to "verify" unsigned tokens.
    pub fn from_secret(secret: &[u8]) -> Result<Self, FolioError> {
        if secret.is_empty() {
            return Err(FolioError::EmptySigningSecret);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Decode and verify a credential, producing the request's principal.
    pub fn verify(&self, token: &str) -> Result<Principal, CredentialError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(map_jwt_error)?;
        let claims = data.claims;
        debug!(
            subject = %claims.sub,
            role = ?claims.role,
            expires_at = ?claims.expires_at(),
            "Session credential verified"
        );
        Ok(Principal {
            subject: claims.sub,
            role: claims.role,
            authenticated: true,
        })
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> CredentialError {
    use jsonwebtoken::errors::ErrorKind;
    match err.kind() {
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => CredentialError::Expired,
        ErrorKind::InvalidSignature => CredentialError::SignatureInvalid,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => CredentialError::Malformed(err.to_string()),
        _ => CredentialError::Unexpected(err.to_string()),
    }
}
