// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role gate.

use super::{AuthError, Identity};

/// Role name granting privileged operations and ownership override.
pub const ADMIN: &str = "admin";

/// Permit iff the identity holds exactly `role`.
///
/// A missing identity means the role gate was mounted ahead of
/// authentication. That is reported as [`AuthError::MissingIdentity`] so the
/// misconfiguration shows up as a server error instead of a quiet 403.
pub fn require_role(identity: Option<&Identity>, role: &str) -> Result<(), AuthError> {
    let identity = identity.ok_or(AuthError::MissingIdentity)?;

    if identity.has_role(role) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = %identity.user_id,
            role = %identity.role,
            required = %role,
            "role check failed"
        );
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_permitted() {
        let identity = Identity::new("u1", "admin");
        assert!(require_role(Some(&identity), ADMIN).is_ok());
    }

    #[test]
    fn other_roles_are_forbidden() {
        for role in ["user", "", "Admin", "ADMIN", "admin ", "administrator"] {
            let identity = Identity::new("u1", role);
            let result = require_role(Some(&identity), ADMIN);
            assert!(matches!(result, Err(AuthError::Forbidden)), "role {role:?}");
        }
    }

    #[test]
    fn missing_identity_is_surfaced() {
        let result = require_role(None, ADMIN);
        assert!(matches!(result, Err(AuthError::MissingIdentity)));
    }
}
