// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Gates
//!
//! ## Auth Flow
//!
//! 1. Client sends `x-user-id: <user id>` and `Authorization: Bearer <JWT>`
//! 2. Authentication gate:
//!    - Looks up the user's key record (401 if the user or key is missing)
//!    - Verifies the JWT signature and expiry against that key (403 on failure)
//!    - Attaches an [`Identity`] whose `user_id` is the header value
//! 3. Role gate: permits only identities holding the required role (403)
//! 4. Ownership gate: loads the addressed resource (404 if absent) and
//!    permits its owner or an admin (403 otherwise)
//!
//! ## Security
//!
//! - Verification failures are collapsed into one `Forbidden` response; the
//!   sub-reason is only logged
//! - The user id in the token claims is never trusted
//! - Nothing is cached across requests

pub mod error;
pub mod extractor;
pub mod identity;
pub mod middleware;
pub mod roles;
pub mod token;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{AuthError, MissingInput};
pub use extractor::{AdminOnly, Auth};
pub use identity::{Claims, Identity};
pub use middleware::{
    authenticate, require_admin, require_authentication, require_ownership, AuthGate, Authorized,
    OwnershipGate, USER_ID_HEADER,
};
pub use roles::{require_role, ADMIN};
pub use token::{TokenVerifier, VerifyError};
