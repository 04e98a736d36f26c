// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership rules for per-item resources.
//!
//! A resource may be accessed by its recorded owner, or by any identity
//! holding the admin role. Everyone else is refused.

use async_trait::async_trait;

use crate::auth::{AuthError, Identity};

use super::StoreResult;

/// Trait for resources that have an owner.
pub trait OwnedResource: Send + Sync {
    /// Identifier the resource is looked up by.
    fn resource_id(&self) -> &str;

    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;
}

/// Find-by-id capability for one resource type.
///
/// Instantiated per protected entity type when routes are registered.
#[async_trait]
pub trait ResourceLookup<T: OwnedResource>: Send + Sync {
    /// Resolve an id to a resource. `Ok(None)` means no such resource.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>>;
}

/// Trait for enforcing ownership on a loaded resource.
pub trait OwnershipEnforcer {
    /// Verify that the identity owns this resource or is an admin.
    ///
    /// # Errors
    /// Returns `AuthError::Unauthorized` otherwise.
    fn verify_ownership(&self, identity: &Identity) -> Result<(), AuthError>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, identity: &Identity) -> Result<(), AuthError> {
        if self.owner_user_id() == identity.user_id || identity.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

/// Extension trait for checking ownership on the result of a lookup.
pub trait OwnershipCheck<T> {
    /// Verify ownership and return the resource if authorized.
    fn verify_owner(self, identity: &Identity) -> Result<T, AuthError>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn verify_owner(self, identity: &Identity) -> Result<T, AuthError> {
        match self {
            Some(resource) => {
                resource.verify_ownership(identity)?;
                Ok(resource)
            }
            None => Err(AuthError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        owner: String,
    }

    impl OwnedResource for TestResource {
        fn resource_id(&self) -> &str {
            &self.id
        }

        fn owner_user_id(&self) -> &str {
            &self.owner
        }
    }

    fn owned_by(owner: &str) -> TestResource {
        TestResource {
            id: "item_1".to_string(),
            owner: owner.to_string(),
        }
    }

    #[test]
    fn owner_passes_regardless_of_role() {
        let resource = owned_by("u1");

        for role in ["user", "", "auditor", "admin"] {
            let identity = Identity::new("u1", role);
            assert!(resource.verify_ownership(&identity).is_ok(), "role {role:?}");
        }
    }

    #[test]
    fn non_owner_user_is_refused() {
        let resource = owned_by("u1");
        let identity = Identity::new("u2", "user");

        let result = resource.verify_ownership(&identity);
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[test]
    fn admin_overrides_ownership() {
        let resource = owned_by("u1");
        let identity = Identity::new("u2", "admin");

        assert!(resource.verify_ownership(&identity).is_ok());
    }

    #[test]
    fn role_comparison_is_exact() {
        let resource = owned_by("u1");
        let identity = Identity::new("u2", "Admin");

        assert!(resource.verify_ownership(&identity).is_err());
    }

    #[test]
    fn ownership_check_on_option_some() {
        let identity = Identity::new("u1", "user");

        let resource = Some(owned_by("u1")).verify_owner(&identity).unwrap();
        assert_eq!(resource.resource_id(), "item_1");
    }

    #[test]
    fn ownership_check_on_option_none() {
        let identity = Identity::new("u1", "admin");

        let option: Option<TestResource> = None;
        let result = option.verify_owner(&identity);
        assert!(matches!(result, Err(AuthError::NotFound)));
    }
}
