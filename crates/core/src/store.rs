//! Storage accessors for the comment collection.
//!
//! The collection is always read and written as a whole. There is no locking between a `load`
//! and the following `save`, so two concurrent mutations race and the later write wins.

use crate::comment::Comment;
use crate::{CommentError, CommentResult};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Whole-collection load/save interface injected into [`crate::CommentService`].
pub trait CommentStore: Send + Sync {
    /// Read the full collection.
    fn load(&self) -> CommentResult<Vec<Comment>>;

    /// Replace the full collection.
    fn save(&self, comments: &[Comment]) -> CommentResult<()>;
}

/// Collection stored as a single JSON array in a file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CommentStore for JsonFileStore {
    /// # Errors
    ///
    /// Returns `CommentError::FileRead` if the file is missing or unreadable, and
    /// `CommentError::Deserialization` if it is not a JSON array of comments.
    fn load(&self) -> CommentResult<Vec<Comment>> {
        let raw = fs::read_to_string(&self.path).map_err(CommentError::FileRead)?;
        serde_json::from_str(&raw).map_err(CommentError::Deserialization)
    }

    /// Overwrites the file in a single write; a failure part-way can leave it truncated.
    fn save(&self, comments: &[Comment]) -> CommentResult<()> {
        let json = serde_json::to_string(comments).map_err(CommentError::Serialization)?;
        fs::write(&self.path, json).map_err(CommentError::FileWrite)
    }
}

/// Collection held in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    comments: Mutex<Vec<Comment>>,
}

impl InMemoryStore {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments: Mutex::new(comments),
        }
    }

    /// Current contents, bypassing the store interface.
    pub fn snapshot(&self) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CommentStore for InMemoryStore {
    fn load(&self) -> CommentResult<Vec<Comment>> {
        Ok(self.snapshot())
    }

    fn save(&self, comments: &[Comment]) -> CommentResult<()> {
        let mut guard = self
            .comments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = comments.to_vec();
        Ok(())
    }
}

/// Store wrapper that performs every save and then reports it as failed.
///
/// Used to exercise the server-error paths against a real backing store.
#[derive(Debug)]
pub struct FailingSaves<S> {
    inner: S,
}

impl<S> FailingSaves<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: CommentStore> CommentStore for FailingSaves<S> {
    fn load(&self) -> CommentResult<Vec<Comment>> {
        self.inner.load()
    }

    fn save(&self, comments: &[Comment]) -> CommentResult<()> {
        self.inner.save(comments)?;
        Err(CommentError::SimulatedSaveFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comments_types::CommentId;
    use tempfile::TempDir;

    fn sample() -> Vec<Comment> {
        vec![
            Comment {
                name: "a".into(),
                text: "hello".into(),
                extra: Default::default(),
                id: CommentId::from("5f1c"),
            },
            Comment {
                name: "b".into(),
                text: "world".into(),
                extra: Default::default(),
                id: CommentId::from(2),
            },
        ]
    }

    #[test]
    fn file_store_save_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path().join("comments.json"));

        store.save(&sample()).expect("save should succeed");
        assert_eq!(store.load().expect("load should succeed"), sample());
    }

    #[test]
    fn file_store_writes_compact_json_array() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("comments.json");
        let store = JsonFileStore::new(path.clone());

        store.save(&sample()[..1]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"[{"name":"a","text":"hello","id":"5f1c"}]"#);
    }

    #[test]
    fn file_store_missing_file_is_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path().join("absent.json"));

        let err = store.load().expect_err("missing file should fail");
        assert!(matches!(err, CommentError::FileRead(_)));
    }

    #[test]
    fn file_store_corrupt_file_is_deserialization_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("comments.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(path).load().expect_err("corrupt file should fail");
        assert!(matches!(err, CommentError::Deserialization(_)));
    }

    #[test]
    fn file_store_save_into_missing_directory_is_write_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path().join("nope").join("comments.json"));

        let err = store.save(&sample()).expect_err("save should fail");
        assert!(matches!(err, CommentError::FileWrite(_)));
    }

    #[test]
    fn in_memory_store_replaces_contents() {
        let store = InMemoryStore::new(sample());
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn failing_saves_still_writes() {
        let store = FailingSaves::new(InMemoryStore::default());

        let err = store.save(&sample()).expect_err("save should report failure");
        assert!(matches!(err, CommentError::SimulatedSaveFailure));
        assert_eq!(store.inner().snapshot(), sample());
        assert_eq!(store.load().unwrap(), sample());
    }
}
