// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory repository for owned resources.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{OwnedResource, ResourceLookup, StoreResult};

/// Repository keyed by [`OwnedResource::resource_id`].
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: RwLock<HashMap<String, T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: OwnedResource + Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a resource.
    pub async fn insert(&self, item: T) {
        self.items
            .write()
            .await
            .insert(item.resource_id().to_string(), item);
    }

    /// Remove a resource, returning it if it existed.
    pub async fn remove(&self, id: &str) -> Option<T> {
        self.items.write().await.remove(id)
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.items.read().await.get(id).cloned()
    }

    /// All resources, ordered by id.
    pub async fn list(&self) -> Vec<T> {
        let mut items: Vec<T> = self.items.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.resource_id().cmp(b.resource_id()));
        items
    }

    /// Resources owned by `user_id`, ordered by id.
    pub async fn list_by_owner(&self, user_id: &str) -> Vec<T> {
        self.list()
            .await
            .into_iter()
            .filter(|item| item.owner_user_id() == user_id)
            .collect()
    }
}

#[async_trait]
impl<T: OwnedResource + Clone> ResourceLookup<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.get(id).await)
    }
}
