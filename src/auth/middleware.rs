// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request gates for Axum.
//!
//! Gates run strictly in order within one request:
//!
//! 1. [`require_authentication`] resolves the caller's key record, verifies
//!    the bearer token and inserts an [`Identity`] into request extensions.
//! 2. [`require_admin`] and/or [`require_ownership`] read that identity.
//!
//! Apply the downstream gates with `route_layer` on the routes that need
//! them and the authentication gate with a `route_layer` added afterwards,
//! so that it wraps them:
//!
//! ```rust,ignore
//! let notes = Router::new()
//!     .route("/notes/{note_id}", get(get_note))
//!     .route_layer(from_fn_with_state(note_gate, require_ownership::<Note>));
//!
//! let v1 = Router::new()
//!     .merge(notes)
//!     .route_layer(from_fn_with_state(auth_gate, require_authentication));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::error::MissingInput;
use super::roles::{require_role, ADMIN};
use super::{AuthError, Identity, TokenVerifier};
use crate::storage::{KeyStore, OwnedResource, OwnershipCheck, ResourceLookup};

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extract the credential from an authorization header value: the second
/// whitespace-separated token. The scheme word itself is not inspected.
pub fn bearer_token(value: &str) -> Option<&str> {
    value.split_whitespace().nth(1)
}

/// Authenticate a request from its headers.
///
/// # Errors
/// - `Unauthenticated` when the user id, key record or credential is missing
/// - `Forbidden` when the credential is malformed or fails verification
/// - `Store` when the key store itself fails
pub async fn authenticate(
    headers: &HeaderMap,
    key_store: &dyn KeyStore,
    verifier: &TokenVerifier,
) -> Result<Identity, AuthError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::Unauthenticated(MissingInput::User))?;

    let record = key_store
        .find_key_record(user_id)
        .await?
        .filter(|record| record.user_id == user_id)
        .ok_or(AuthError::Unauthenticated(MissingInput::Key))?;

    let credential = headers
        .get(AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::Unauthenticated(MissingInput::Credential))?;

    let token = credential
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "malformed authorization header");
            AuthError::Forbidden
        })?;

    let claims = verifier
        .verify(token, &record.public_key)
        .map_err(|reason| {
            tracing::warn!(user_id = %user_id, %reason, "token verification failed");
            AuthError::Forbidden
        })?;

    Ok(Identity::from_claims(record.user_id, claims))
}

/// Authentication gate state: the key store and the verifier.
#[derive(Clone)]
pub struct AuthGate {
    key_store: Arc<dyn KeyStore>,
    verifier: Arc<TokenVerifier>,
}

impl AuthGate {
    pub fn new(key_store: Arc<dyn KeyStore>, verifier: TokenVerifier) -> Self {
        Self {
            key_store,
            verifier: Arc::new(verifier),
        }
    }

    pub fn key_store(&self) -> &dyn KeyStore {
        self.key_store.as_ref()
    }

    /// See [`authenticate`].
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        authenticate(headers, self.key_store.as_ref(), &self.verifier).await
    }
}

/// Authentication middleware function.
pub async fn require_authentication(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = gate.authenticate(request.headers()).await?;
    tracing::debug!(user_id = %identity.user_id, role = %identity.role, "request authenticated");

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Admin role middleware function.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AuthError> {
    require_role(request.extensions().get::<Identity>(), ADMIN)?;
    Ok(next.run(request).await)
}

/// A resource that passed the ownership gate, inserted into request
/// extensions for the handler.
#[derive(Debug, Clone)]
pub struct Authorized<T>(pub T);

/// Ownership gate for one resource type.
///
/// Configured with the lookup for that type and the name of the path
/// parameter carrying the resource id.
pub struct OwnershipGate<T> {
    lookup: Arc<dyn ResourceLookup<T>>,
    param: Arc<str>,
}

impl<T> Clone for OwnershipGate<T> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            param: Arc::clone(&self.param),
        }
    }
}

impl<T: OwnedResource> OwnershipGate<T> {
    pub fn new(lookup: Arc<dyn ResourceLookup<T>>, param: impl Into<Arc<str>>) -> Self {
        Self {
            lookup,
            param: param.into(),
        }
    }

    /// Name of the path parameter holding the resource id.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Load the resource and check that `identity` owns it or is an admin.
    ///
    /// A lookup failure is reported as `NotFound`; a missing id is treated
    /// the same way.
    pub async fn check(
        &self,
        identity: Option<&Identity>,
        resource_id: Option<&str>,
    ) -> Result<T, AuthError> {
        let identity = identity.ok_or(AuthError::MissingIdentity)?;
        let resource_id = resource_id.ok_or(AuthError::NotFound)?;

        let found = self.lookup.find_by_id(resource_id).await.map_err(|e| {
            tracing::warn!(error = %e, resource_id = %resource_id, "resource lookup failed");
            AuthError::NotFound
        })?;

        found.verify_owner(identity).inspect_err(|e| {
            tracing::debug!(
                user_id = %identity.user_id,
                resource_id = %resource_id,
                reason = %e,
                "ownership check failed"
            );
        })
    }
}

/// Ownership middleware function.
pub async fn require_ownership<T>(
    State(gate): State<OwnershipGate<T>>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    T: OwnedResource + Clone + 'static,
{
    let resource_id = params
        .ok()
        .and_then(|Path(mut params)| params.remove(gate.param()));

    let resource = gate
        .check(request.extensions().get::<Identity>(), resource_id.as_deref())
        .await?;

    request.extensions_mut().insert(Authorized(resource));
    Ok(next.run(request).await)
}
