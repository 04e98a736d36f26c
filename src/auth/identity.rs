// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated identity attached to a request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::roles::ADMIN;

/// Decoded token claims.
pub type Claims = Map<String, Value>;

/// Identity produced by the authentication gate.
///
/// Built once per request from verified token claims and read-only to the
/// gates and handlers that follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// User id asserted by the `x-user-id` header and bound to the key record
    pub user_id: String,

    /// Role claim, empty when the token carries none
    pub role: String,

    /// Remaining token claims, passed through untouched
    #[schema(value_type = Object)]
    pub claims: Claims,
}

impl Identity {
    /// Identity with no extra claims.
    pub fn new(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
            claims: Claims::new(),
        }
    }

    /// Create from verified claims.
    ///
    /// Any id carried in the claims is ignored: `user_id` is always the one
    /// the key record was resolved for, and it replaces the `id` claim.
    pub fn from_claims(user_id: impl Into<String>, mut claims: Claims) -> Self {
        let user_id = user_id.into();
        claims.insert("id".to_string(), Value::String(user_id.clone()));

        let role = claims
            .get("role")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            user_id,
            role,
            claims,
        }
    }

    /// Exact role match. An empty role never matches.
    pub fn has_role(&self, role: &str) -> bool {
        !self.role.is_empty() && self.role == role
    }

    /// Check if this identity is an admin.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn from_claims_reads_role() {
        let identity = Identity::from_claims("u1", claims(json!({ "role": "user" })));
        assert_eq!(identity.user_id, "u1");
        assert_eq!(identity.role, "user");
        assert!(!identity.is_admin());
    }

    #[test]
    fn header_user_id_wins_over_claims() {
        let identity = Identity::from_claims(
            "u1",
            claims(json!({ "id": "u9", "userId": "u9", "sub": "u9", "role": "admin" })),
        );
        assert_eq!(identity.user_id, "u1");
        assert_eq!(identity.claims["id"], "u1");
        assert!(identity.is_admin());
    }

    #[test]
    fn id_claim_is_set_when_token_has_none() {
        let identity = Identity::from_claims("u1", claims(json!({ "role": "user" })));
        assert_eq!(identity.claims["id"], "u1");
    }

    #[test]
    fn missing_or_non_string_role_is_empty() {
        let identity = Identity::from_claims("u1", claims(json!({ "name": "x" })));
        assert_eq!(identity.role, "");

        let identity = Identity::from_claims("u1", claims(json!({ "role": ["admin"] })));
        assert_eq!(identity.role, "");
        assert!(!identity.is_admin());
    }

    #[test]
    fn empty_role_never_matches() {
        let identity = Identity::new("u1", "");
        assert!(!identity.has_role(""));
        assert!(!identity.has_role(ADMIN));
    }
}
