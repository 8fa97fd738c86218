// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::document::DocumentStore;
use super::ids::generate_id;
use super::types::{StoreError, Tag};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Manages the tag taxonomy. Mutations serialize through a single in-process
/// lock held across the whole read-modify-write cycle, so two concurrent
/// writers cannot drop each other's changes.
pub struct TagService {
    store: Arc<dyn DocumentStore<Tag>>,
    write_lock: Mutex<()>,
}

impl TagService {
    pub fn new(store: Arc<dyn DocumentStore<Tag>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> Result<Vec<Tag>, StoreError> {
        self.store.load()
    }

    /// Adds a tag from a raw payload. The name must be a JSON string; it is
    /// trimmed and lowercased before the uniqueness check.
    pub async fn add(&self, payload: &Value) -> Result<Tag, StoreError> {
        let name = match payload.get("name") {
            Some(Value::String(text)) => text.trim().to_lowercase(),
            _ => String::new(),
        };
        if name.is_empty() {
            return Err(StoreError::Validation(vec![
                "Tag name is required and it must be a string.".to_string(),
            ]));
        }

        let _guard = self.write_lock.lock().await;
        let mut tags = self.store.load()?;
        if tags.iter().any(|tag| tag.name == name) {
            return Err(StoreError::Conflict("Tag already exists.".to_string()));
        }

        let tag = Tag {
            id: generate_id(),
            name,
        };
        tags.push(tag.clone());
        self.store.save(&tags)?;
        Ok(tag)
    }

    /// Deletes a tag by id and returns the removed record. Recipes that
    /// reference the tag are left untouched; orphaned references are
    /// tolerated.
    pub async fn delete(&self, id: &str) -> Result<Tag, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut tags = self.store.load()?;
        let index = match tags.iter().position(|tag| tag.id == id) {
            Some(index) => index,
            None => return Err(StoreError::NotFound("Tag not found.".to_string())),
        };

        let removed = tags.remove(index);
        self.store.save(&tags)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::document::{FileDocumentStore, MemoryDocumentStore};
    use serde_json::json;

    struct FailingTagStore {
        tags: Vec<Tag>,
    }

    impl DocumentStore<Tag> for FailingTagStore {
        fn load(&self) -> Result<Vec<Tag>, StoreError> {
            Ok(self.tags.clone())
        }

        fn save(&self, _items: &[Tag]) -> Result<(), StoreError> {
            Err(StoreError::Storage(
                "Simulated tags save failure".to_string(),
            ))
        }
    }

    fn seeded_service(tags: Vec<Tag>) -> TagService {
        TagService::new(Arc::new(MemoryDocumentStore::new(tags)))
    }

    fn vegan_tag() -> Tag {
        Tag {
            id: "t1".to_string(),
            name: "vegan".to_string(),
        }
    }

    #[tokio::test]
    async fn add_normalizes_name_and_persists() {
        let service = seeded_service(Vec::new());

        let tag = service.add(&json!({"name": " Vegan "})).await.expect("add");
        assert_eq!(tag.name, "vegan");
        assert!(!tag.id.is_empty());

        let tags = service.list().expect("list");
        assert_eq!(tags, vec![tag]);
    }

    #[tokio::test]
    async fn add_rejects_duplicate_names_case_insensitively() {
        let service = seeded_service(vec![vegan_tag()]);

        let error = service.add(&json!({"name": "VEGAN"})).await.unwrap_err();
        match error {
            StoreError::Conflict(message) => assert_eq!(message, "Tag already exists."),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn add_requires_a_string_name() {
        let service = seeded_service(Vec::new());

        for payload in [json!({}), json!({"name": 42}), json!({"name": "   "})] {
            let error = service.add(&payload).await.unwrap_err();
            match error {
                StoreError::Validation(messages) => {
                    assert_eq!(
                        messages,
                        vec!["Tag name is required and it must be a string.".to_string()]
                    );
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn delete_returns_removed_tag_then_reports_not_found() {
        let service = seeded_service(vec![vegan_tag()]);

        let removed = service.delete("t1").await.expect("delete");
        assert_eq!(removed.name, "vegan");
        assert!(service.list().expect("list").is_empty());

        let error = service.delete("t1").await.unwrap_err();
        match error {
            StoreError::NotFound(message) => assert_eq!(message, "Tag not found."),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_keep_every_tag() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store =
            Arc::new(FileDocumentStore::new(temp.path().join("tags.json"), false).expect("store"));
        let service = Arc::new(TagService::new(store));

        let mut handles = Vec::new();
        for index in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.add(&json!({ "name": format!("tag-{}", index) })).await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("add");
        }

        let tags = service.list().expect("list");
        assert_eq!(tags.len(), 16);
    }

    #[tokio::test]
    async fn add_does_not_persist_on_save_error() {
        let service = TagService::new(Arc::new(FailingTagStore {
            tags: vec![vegan_tag()],
        }));

        let result = service.add(&json!({"name": "dessert"})).await;
        assert!(result.is_err());

        let tags = service.list().expect("list");
        assert_eq!(tags, vec![vegan_tag()]);
    }
}
