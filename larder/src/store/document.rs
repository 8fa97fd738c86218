// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[cfg(test)]
use std::sync::{Arc, RwLock};

pub trait DocumentStore<T>: Send + Sync {
    fn load(&self) -> Result<Vec<T>, StoreError>;
    fn save(&self, items: &[T]) -> Result<(), StoreError>;
}

/// Persists a collection as a single JSON array file. Writes go through a
/// temp file in the same directory followed by an atomic rename, so readers
/// never observe a half-written document.
pub struct FileDocumentStore<T> {
    document_file: PathBuf,
    pretty: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FileDocumentStore<T> {
    pub fn new(document_file: PathBuf, pretty: bool) -> Result<Self, StoreError> {
        if document_file.as_os_str().is_empty() {
            return Err(StoreError::Storage(
                "Document file path is empty".to_string(),
            ));
        }

        Ok(Self {
            document_file,
            pretty,
            _marker: PhantomData,
        })
    }

    fn document_name(&self) -> String {
        self.document_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.document_file.to_string_lossy().into_owned())
    }

    fn write_document_file(&self, content: &str) -> Result<(), StoreError> {
        let name = self.document_name();
        let parent = self.document_file.parent().ok_or_else(|| {
            StoreError::Storage(format!("{} has no parent directory", name))
        })?;
        let file_name = self
            .document_file
            .file_name()
            .ok_or_else(|| StoreError::Storage(format!("{} has no file name", name)))?;
        let (mut file, temp_path) = create_temp_file(parent, file_name)?;

        if let Ok(metadata) = std::fs::metadata(&self.document_file) {
            #[cfg(unix)]
            {
                if let Err(err) = std::fs::set_permissions(&temp_path, metadata.permissions()) {
                    let _ = std::fs::remove_file(&temp_path);
                    return Err(StoreError::Storage(format!(
                        "Failed to set temp file permissions for {}: {}",
                        name, err
                    )));
                }
            }
        }

        if let Err(err) = file.write_all(content.as_bytes()) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::Storage(format!(
                "Failed to write temp file for {}: {}",
                name, err
            )));
        }
        if let Err(err) = file.sync_all() {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::Storage(format!(
                "Failed to sync temp file for {}: {}",
                name, err
            )));
        }

        if let Err(err) = std::fs::rename(&temp_path, &self.document_file) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::Storage(format!(
                "Failed to replace {}: {}",
                name, err
            )));
        }

        #[cfg(unix)]
        {
            if let Err(err) = sync_parent_dir(parent, &name) {
                log::warn!("Directory sync for {} failed: {}", name, err);
            }
        }

        Ok(())
    }
}

fn create_temp_file(
    dir: &Path,
    file_name: &std::ffi::OsStr,
) -> Result<(std::fs::File, PathBuf), StoreError> {
    use std::fs::OpenOptions;
    const MAX_ATTEMPTS: u32 = 100;
    let base = file_name.to_string_lossy();
    for attempt in 0..MAX_ATTEMPTS {
        let candidate = dir.join(format!(".{}.tmp.{}.{}", base, std::process::id(), attempt));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((file, candidate)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(StoreError::Storage(format!(
                    "Failed to create temp file for {}: {}",
                    base, err
                )));
            }
        }
    }
    Err(StoreError::Storage(format!(
        "Failed to create temp file for {} after repeated attempts",
        base
    )))
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path, name: &str) -> Result<(), StoreError> {
    let dir = std::fs::File::open(parent).map_err(|err| {
        StoreError::Storage(format!(
            "Failed to open parent directory of {} for sync: {}",
            name, err
        ))
    })?;
    dir.sync_all().map_err(|err| {
        StoreError::Storage(format!(
            "Failed to sync parent directory of {}: {}",
            name, err
        ))
    })
}

impl<T> DocumentStore<T> for FileDocumentStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        let name = self.document_name();
        let content = match std::fs::read_to_string(&self.document_file) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} is missing; resetting to an empty collection", name);
                self.save(&[])?;
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(StoreError::Storage(format!(
                    "Failed to read {}: {}",
                    name, err
                )));
            }
        };

        match serde_json::from_str(&content) {
            Ok(items) => Ok(items),
            Err(err) => {
                log::warn!(
                    "{} is corrupt ({}); resetting to an empty collection",
                    name,
                    err
                );
                self.save(&[])?;
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let content = if self.pretty {
            serde_json::to_string_pretty(items)
        } else {
            serde_json::to_string(items)
        }
        .map_err(|err| {
            StoreError::Storage(format!(
                "Failed to serialize {}: {}",
                self.document_name(),
                err
            ))
        })?;

        self.write_document_file(&content)
    }
}

#[cfg(test)]
pub struct MemoryDocumentStore<T> {
    items: Arc<RwLock<Vec<T>>>,
}

#[cfg(test)]
impl<T> MemoryDocumentStore<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(initial)),
        }
    }
}

#[cfg(test)]
impl<T> DocumentStore<T> for MemoryDocumentStore<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        match self.items.read() {
            Ok(guard) => Ok(guard.clone()),
            Err(poisoned) => {
                log::error!("MemoryDocumentStore lock poisoned on read; recovering");
                Ok(poisoned.into_inner().clone())
            }
        }
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        match self.items.write() {
            Ok(mut guard) => {
                *guard = items.to_vec();
                Ok(())
            }
            Err(poisoned) => {
                log::error!("MemoryDocumentStore lock poisoned on write; recovering");
                let mut guard = poisoned.into_inner();
                *guard = items.to_vec();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::Tag;

    fn sample_tags() -> Vec<Tag> {
        vec![
            Tag {
                id: "t1".to_string(),
                name: "vegan".to_string(),
            },
            Tag {
                id: "t2".to_string(),
                name: "dessert".to_string(),
            },
        ]
    }

    #[test]
    fn new_rejects_empty_path() {
        let result = FileDocumentStore::<Tag>::new(PathBuf::new(), true);
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tags.json");
        let store = FileDocumentStore::<Tag>::new(path, true).expect("store");

        store.save(&sample_tags()).expect("save tags");
        let loaded = store.load().expect("load tags");
        assert_eq!(loaded, sample_tags());
    }

    #[test]
    fn load_resets_missing_file_to_empty_collection() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tags.json");
        let store = FileDocumentStore::<Tag>::new(path.clone(), false).expect("store");

        let loaded = store.load().expect("load tags");
        assert!(loaded.is_empty());

        let content = std::fs::read_to_string(&path).expect("read tags file");
        assert_eq!(content, "[]");
    }

    #[test]
    fn load_resets_corrupt_file_to_empty_collection() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tags.json");
        std::fs::write(&path, "{not json").expect("write corrupt file");
        let store = FileDocumentStore::<Tag>::new(path.clone(), false).expect("store");

        let loaded = store.load().expect("load tags");
        assert!(loaded.is_empty());

        let content = std::fs::read_to_string(&path).expect("read tags file");
        assert_eq!(content, "[]");
    }

    #[test]
    fn pretty_flag_controls_layout() {
        let temp = tempfile::tempdir().expect("tempdir");

        let pretty_path = temp.path().join("pretty.json");
        let pretty_store =
            FileDocumentStore::<Tag>::new(pretty_path.clone(), true).expect("store");
        pretty_store.save(&sample_tags()).expect("save pretty");
        let pretty_content = std::fs::read_to_string(&pretty_path).expect("read pretty");
        assert!(pretty_content.contains('\n'));

        let compact_path = temp.path().join("compact.json");
        let compact_store =
            FileDocumentStore::<Tag>::new(compact_path.clone(), false).expect("store");
        compact_store.save(&sample_tags()).expect("save compact");
        let compact_content = std::fs::read_to_string(&compact_path).expect("read compact");
        assert!(!compact_content.contains('\n'));
    }

    #[cfg(unix)]
    #[test]
    fn save_does_not_modify_existing_file_on_dir_permission_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tags.json");
        std::fs::write(&path, "[{\"id\":\"t1\",\"name\":\"vegan\"}]").expect("write tags");

        let store = FileDocumentStore::<Tag>::new(path.clone(), false).expect("store");

        let dir = temp.path();
        let original_permissions = std::fs::metadata(dir)
            .expect("metadata")
            .permissions()
            .mode();
        let read_only = std::fs::Permissions::from_mode(original_permissions & 0o555);
        std::fs::set_permissions(dir, read_only).expect("set read-only");

        let result = store.save(&sample_tags());
        assert!(result.is_err());

        let content = std::fs::read_to_string(&path).expect("read tags");
        assert_eq!(content, "[{\"id\":\"t1\",\"name\":\"vegan\"}]");

        let restore = std::fs::Permissions::from_mode(original_permissions);
        std::fs::set_permissions(dir, restore).expect("restore permissions");
    }

    #[test]
    fn memory_store_replaces_contents_on_save() {
        let store = MemoryDocumentStore::new(sample_tags());
        let loaded = store.load().expect("load");
        assert_eq!(loaded.len(), 2);

        let replacement = vec![Tag {
            id: "t3".to_string(),
            name: "quick".to_string(),
        }];
        store.save(&replacement).expect("save");
        assert_eq!(store.load().expect("reload"), replacement);
    }
}
