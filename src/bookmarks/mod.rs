//! Device-local bookmark persistence.
//!
//! Bookmarks are stored as a single JSON object in `localStorage`, keyed by
//! note id. When the browser refuses access to `localStorage` (private mode,
//! disabled storage) the app falls back to an in-memory store for the
//! lifetime of the page.

use crate::models::{BookmarkRecord, Note};
use crate::storage::{try_load_json, try_save_json, StorageError, BOOKMARKS_KEY};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

type BookmarkMap = BTreeMap<String, BookmarkRecord>;

pub(crate) trait BookmarkStore {
    async fn get_all_bookmarked_notes(&self) -> Result<Vec<BookmarkRecord>, StorageError>;
    async fn put_bookmark(&self, note: &Note) -> Result<(), StorageError>;
    async fn delete_bookmark(&self, id: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug)]
pub(crate) struct LocalStorageBookmarks {
    key: &'static str,
}

impl LocalStorageBookmarks {
    pub fn new() -> Self {
        Self { key: BOOKMARKS_KEY }
    }

    /// An unreadable stored value counts as no bookmarks; the next write
    /// replaces it.
    fn load(&self) -> Result<BookmarkMap, StorageError> {
        match try_load_json::<BookmarkMap>(self.key) {
            Ok(map) => Ok(map.unwrap_or_default()),
            Err(StorageError::Serde(e)) => {
                tracing::warn!(key = self.key, error = %e, "discarding unreadable bookmarks");
                Ok(BookmarkMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl BookmarkStore for LocalStorageBookmarks {
    async fn get_all_bookmarked_notes(&self) -> Result<Vec<BookmarkRecord>, StorageError> {
        Ok(self.load()?.into_values().collect())
    }

    async fn put_bookmark(&self, note: &Note) -> Result<(), StorageError> {
        let mut map = self.load()?;
        map.insert(note.id.clone(), BookmarkRecord::from(note.clone()));
        try_save_json(self.key, &map)
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        if map.remove(id).is_some() {
            try_save_json(self.key, &map)?;
        }
        Ok(())
    }
}

/// Page-lifetime bookmark store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryBookmarks {
    records: Arc<Mutex<BookmarkMap>>,
}

impl MemoryBookmarks {
    fn with_map<R>(&self, f: impl FnOnce(&mut BookmarkMap) -> R) -> R {
        // A poisoned lock only means a panic elsewhere; the map itself is still usable.
        let mut guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl BookmarkStore for MemoryBookmarks {
    async fn get_all_bookmarked_notes(&self) -> Result<Vec<BookmarkRecord>, StorageError> {
        Ok(self.with_map(|m| m.values().cloned().collect()))
    }

    async fn put_bookmark(&self, note: &Note) -> Result<(), StorageError> {
        self.with_map(|m| m.insert(note.id.clone(), BookmarkRecord::from(note.clone())));
        Ok(())
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), StorageError> {
        self.with_map(|m| m.remove(id));
        Ok(())
    }
}

/// The store the running app uses.
#[derive(Clone, Debug)]
pub(crate) enum BrowserBookmarks {
    Local(LocalStorageBookmarks),
    Memory(MemoryBookmarks),
}

impl BrowserBookmarks {
    pub fn open() -> Self {
        match crate::storage::local_storage() {
            Ok(_) => Self::Local(LocalStorageBookmarks::new()),
            Err(e) => {
                tracing::warn!(error = %e, "bookmarks will not survive a reload");
                Self::Memory(MemoryBookmarks::default())
            }
        }
    }
}

impl BookmarkStore for BrowserBookmarks {
    async fn get_all_bookmarked_notes(&self) -> Result<Vec<BookmarkRecord>, StorageError> {
        match self {
            Self::Local(s) => s.get_all_bookmarked_notes().await,
            Self::Memory(s) => s.get_all_bookmarked_notes().await,
        }
    }

    async fn put_bookmark(&self, note: &Note) -> Result<(), StorageError> {
        match self {
            Self::Local(s) => s.put_bookmark(note).await,
            Self::Memory(s) => s.put_bookmark(note).await,
        }
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(s) => s.delete_bookmark(id).await,
            Self::Memory(s) => s.delete_bookmark(id).await,
        }
    }
}
