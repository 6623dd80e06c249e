//! Comment operations.
//!
//! Every operation loads the whole collection from the injected store, applies one change and,
//! if the collection changed, saves it back in full. Nothing is cached between calls.

use crate::comment::{Comment, CommentPatch};
use crate::store::CommentStore;
use crate::validation::{is_unique, validate_comment};
use crate::{CommentError, CommentResult};
use comments_types::CommentId;
use serde_json::Value;
use std::sync::Arc;

/// Result of a merge-or-create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// An existing record matched the body's id and was updated.
    Merged(Comment),
    /// No record matched; the body was stored as a new record.
    Created(Comment),
}

/// Pure comment data operations - no API concerns
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn CommentStore>) -> Self {
        Self { store }
    }

    /// Returns the full collection.
    pub fn list(&self) -> CommentResult<Vec<Comment>> {
        self.store.load()
    }

    /// Finds a record whose id, in string form, equals `id`.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::NotFound` if no record matches, or a storage error if the
    /// collection cannot be loaded.
    pub fn get(&self, id: &str) -> CommentResult<Comment> {
        self.store
            .load()?
            .into_iter()
            .find(|comment| comment.id.matches_path(id))
            .ok_or_else(|| CommentError::NotFound(id.to_owned()))
    }

    /// Validates `body`, checks it against existing content and appends it under a new id.
    ///
    /// Validation runs before the collection is loaded.
    ///
    /// # Errors
    ///
    /// Returns `CommentError` if:
    /// - the payload is invalid (`InvalidInput`),
    /// - a record with the same content exists (`Duplicate`),
    /// - the collection cannot be loaded,
    /// - the collection cannot be saved (`NotPersisted`).
    pub fn create(&self, body: &Value) -> CommentResult<Comment> {
        let draft = validate_comment(body)?;

        let mut comments = self.store.load()?;
        if !is_unique(&draft, &comments) {
            return Err(CommentError::Duplicate);
        }

        let comment = Comment::new(CommentId::generate(), draft);
        comments.push(comment.clone());

        self.store
            .save(&comments)
            .map_err(|e| CommentError::NotPersisted(Box::new(e)))?;

        tracing::info!("Comment {} created", comment.id);
        Ok(comment)
    }

    /// Updates the record whose id strictly equals `body.id`, or creates a new record.
    ///
    /// The id lookup does not coerce types: a numeric stored id is not matched by a string in
    /// the body. When nothing matches, the body is validated as a create payload and stored
    /// under a freshly generated id; no duplicate check is made on this path.
    ///
    /// Save failures are logged and do not change the outcome.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::InvalidInput` if a merged field is not a string or the body is
    /// not a valid create payload, or a storage error if the collection cannot be loaded.
    pub fn merge_or_create(&self, body: &Value) -> CommentResult<PatchOutcome> {
        let mut comments = self.store.load()?;

        let target = body.get("id").and_then(CommentId::from_json);
        let index = target
            .as_ref()
            .and_then(|id| comments.iter().position(|comment| &comment.id == id));

        if let Some(index) = index {
            let patch = CommentPatch::from_body(body)?;
            comments[index].apply(patch);
            self.save_unchecked(&comments, "merge");

            let merged = comments.swap_remove(index);
            tracing::info!("Comment {} merged", merged.id);
            return Ok(PatchOutcome::Merged(merged));
        }

        let draft = validate_comment(body)?;
        let comment = Comment::new(CommentId::generate(), draft);
        comments.push(comment.clone());
        self.save_unchecked(&comments, "create");

        tracing::info!("Comment {} created via patch", comment.id);
        Ok(PatchOutcome::Created(comment))
    }

    /// Removes every record whose id, in string form, equals `id` and returns the removed one.
    ///
    /// Save failures are logged and do not change the outcome.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::NotFound` if no record matches, or a storage error if the
    /// collection cannot be loaded.
    pub fn delete(&self, id: &str) -> CommentResult<Comment> {
        let (mut removed, kept): (Vec<Comment>, Vec<Comment>) = self
            .store
            .load()?
            .into_iter()
            .partition(|comment| comment.id.matches_path(id));

        let Some(removed) = removed.pop() else {
            return Err(CommentError::NotFound(id.to_owned()));
        };

        self.save_unchecked(&kept, "delete");

        tracing::info!("Comment {} deleted", removed.id);
        Ok(removed)
    }

    // PATCH and DELETE respond from memory regardless of whether the write landed.
    fn save_unchecked(&self, comments: &[Comment], operation: &str) {
        if let Err(e) = self.store.save(comments) {
            tracing::warn!("Save after {} failed, responding anyway: {:?}", operation, e);
        }
    }
}
