// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the authenticated identity.
//!
//! The identity is produced by [`require_authentication`]; these extractors
//! only read it back out of request extensions.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity.user_id, identity.role
//! }
//! ```
//!
//! [`require_authentication`]: super::middleware::require_authentication

use axum::{extract::FromRequestParts, http::request::Parts};

use super::roles::{require_role, ADMIN};
use super::{AuthError, Identity};

/// Extractor for the authenticated identity.
///
/// Rejects with [`AuthError::MissingIdentity`] when the route is not behind
/// the authentication middleware.
pub struct Auth(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingIdentity)
    }
}

/// Extractor that requires admin role.
pub struct AdminOnly(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>();
        require_role(identity, ADMIN)?;
        Ok(AdminOnly(identity.cloned().ok_or(AuthError::MissingIdentity)?))
    }
}
