// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Contracts
//!
//! The gates never talk to a database directly. Every read they need goes
//! through one of two lookup contracts, injected at construction time:
//!
//! - [`KeyStore`] resolves a user id to its [`KeyRecord`] (public key).
//! - [`ResourceLookup`] resolves a resource id to an [`OwnedResource`].
//!
//! Both are pure reads. In-memory implementations are provided for the
//! server binary and for tests.

pub mod keys;
pub mod memory;
pub mod ownership;

use thiserror::Error;

pub use keys::{InMemoryKeyStore, KeyRecord, KeyStore};
pub use memory::InMemoryRepository;
pub use ownership::{OwnedResource, OwnershipCheck, OwnershipEnforcer, ResourceLookup};

/// Error type for lookup collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// I/O error while loading seed data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored data could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for lookup collaborators.
pub type StoreResult<T> = Result<T, StoreError>;
