// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token verification against a user's public key.
//!
//! Tokens are compact JWTs. The algorithm named in the token header must be
//! on the configured allow-list, and the key record's PEM is parsed for that
//! algorithm's family. Failures are classified for logging only; callers
//! collapse them into a single `Forbidden`.

use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::identity::Claims;

/// Algorithms accepted when none are configured.
pub const DEFAULT_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::RS256, Algorithm::ES256, Algorithm::EdDSA];

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// Signature does not match the key
    InvalidSignature,
    /// Outside the `exp`/`nbf` window
    Expired,
    /// Not a decodable token, disallowed algorithm, or unusable key
    Malformed,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::InvalidSignature => write!(f, "invalid signature"),
            VerifyError::Expired => write!(f, "token expired"),
            VerifyError::Malformed => write!(f, "malformed token"),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => VerifyError::Expired,
            _ => VerifyError::Malformed,
        }
    }
}

/// Stateless token verifier.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    algorithms: Vec<Algorithm>,
    leeway: u64,
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_ALGORITHMS)
    }
}

impl TokenVerifier {
    /// Create a verifier accepting the given algorithms. HMAC algorithms are
    /// dropped: a key record holds a public key, never a shared secret.
    pub fn new(algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        let algorithms = algorithms
            .into_iter()
            .filter(|alg| !matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512))
            .collect();
        Self {
            algorithms,
            leeway: 0,
        }
    }

    /// Clock-skew tolerance applied to `exp` and `nbf`, in seconds.
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Verify `token` against `public_key_pem` and return its claims.
    ///
    /// `exp` and `nbf` are optional but enforced when present. Issuer and
    /// audience are not checked.
    pub fn verify(&self, token: &str, public_key_pem: &str) -> Result<Claims, VerifyError> {
        let header = decode_header(token)?;
        if !self.algorithms.contains(&header.alg) {
            return Err(VerifyError::Malformed);
        }

        let key = decoding_key(header.alg, public_key_pem)?;

        let mut validation = Validation::new(header.alg);
        validation.leeway = self.leeway;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}

/// Parse a PEM public key for the family of `alg`.
fn decoding_key(alg: Algorithm, pem: &str) -> Result<DecodingKey, VerifyError> {
    let pem = pem.as_bytes();
    let key = match alg {
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(pem),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
        _ => return Err(VerifyError::Malformed),
    };
    key.map_err(|_| VerifyError::Malformed)
}
