// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-user verification keys.
//!
//! A [`KeyRecord`] binds a user id to the public key that user's tokens are
//! signed against. Records are issued elsewhere; this crate only reads them.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::StoreResult;

/// A user's current public verification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    /// User the key belongs to
    pub user_id: String,
    /// PEM-encoded public key
    pub public_key: String,
}

impl KeyRecord {
    pub fn new(user_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            public_key: public_key.into(),
        }
    }
}

/// Lookup contract for key records.
///
/// `Ok(None)` means the user has no key and must be rejected by the caller.
/// `Err` means the store itself failed and is propagated, never treated as
/// an authorization outcome.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Resolve a user id to its key record.
    async fn find_key_record(&self, user_id: &str) -> StoreResult<Option<KeyRecord>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Key store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    records: RwLock<HashMap<String, KeyRecord>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list of records. Later records win on duplicate ids.
    pub fn from_records(records: impl IntoIterator<Item = KeyRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.user_id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Load records from a JSON file containing an array of `{userId, publicKey}`.
    pub async fn load_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let raw = tokio::fs::read(path.as_ref()).await?;
        let records: Vec<KeyRecord> = serde_json::from_slice(&raw)?;
        tracing::info!(
            count = records.len(),
            path = %path.as_ref().display(),
            "Loaded key records"
        );
        Ok(Self::from_records(records))
    }

    /// Insert or replace a user's key record.
    pub async fn insert(&self, record: KeyRecord) {
        self.records
            .write()
            .await
            .insert(record.user_id.clone(), record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn find_key_record(&self, user_id: &str) -> StoreResult<Option<KeyRecord>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn finds_inserted_record() {
        let store = InMemoryKeyStore::new();
        store.insert(KeyRecord::new("u1", "pem-a")).await;

        let found = store.find_key_record("u1").await.unwrap();
        assert_eq!(found, Some(KeyRecord::new("u1", "pem-a")));
        assert!(store.find_key_record("u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn later_record_replaces_earlier() {
        let store = InMemoryKeyStore::from_records([
            KeyRecord::new("u1", "old"),
            KeyRecord::new("u1", "new"),
        ]);
        assert_eq!(store.len().await, 1);

        let found = store.find_key_record("u1").await.unwrap().unwrap();
        assert_eq!(found.public_key, "new");
    }

    #[tokio::test]
    async fn loads_camel_case_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"userId":"u1","publicKey":"pem-a"}},{{"userId":"u2","publicKey":"pem-b"}}]"#
        )
        .unwrap();

        let store = InMemoryKeyStore::load_file(file.path()).await.unwrap();
        assert_eq!(store.len().await, 2);
        let u2 = store.find_key_record("u2").await.unwrap().unwrap();
        assert_eq!(u2.public_key, "pem-b");
    }

    #[tokio::test]
    async fn load_file_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"userId":"u1"}}"#).unwrap();

        let result = InMemoryKeyStore::load_file(file.path()).await;
        assert!(matches!(result, Err(crate::storage::StoreError::Json(_))));
    }
}
