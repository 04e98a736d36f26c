// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthGate, OwnershipGate, TokenVerifier};
use crate::models::Note;
use crate::storage::{InMemoryKeyStore, InMemoryRepository, KeyStore};

/// Path parameter carrying a note id.
pub const NOTE_ID_PARAM: &str = "note_id";

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGate,
    pub notes: Arc<InMemoryRepository<Note>>,
}

impl AppState {
    pub fn new(key_store: Arc<dyn KeyStore>, verifier: TokenVerifier) -> Self {
        Self {
            auth: AuthGate::new(key_store, verifier),
            notes: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Ownership gate for routes addressing a single note.
    pub fn note_gate(&self) -> OwnershipGate<Note> {
        OwnershipGate::<Note>::new(self.notes.clone(), NOTE_ID_PARAM)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryKeyStore::new()), TokenVerifier::default())
    }
}
