//! Comment record types.
//!
//! - [`Comment`]: a persisted record, as stored in the backing file.
//! - [`CommentDraft`]: a validated create payload, not yet assigned an id.
//! - [`CommentPatch`]: the fields of a PATCH body, applied as a shallow merge.
//!
//! Keys other than `name`, `text` and `id` are kept in `extra` and written back unchanged, so
//! records carrying additional attributes survive a rewrite of the file.

use crate::{CommentError, CommentResult};
use comments_types::CommentId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub id: CommentId,
}

impl Comment {
    /// Materialise a draft into a record under the given id.
    pub fn new(id: CommentId, draft: CommentDraft) -> Self {
        Self {
            name: draft.name,
            text: draft.text,
            extra: draft.extra,
            id,
        }
    }

    /// Whether this record has exactly the draft's content, ignoring the id.
    pub fn has_content_of(&self, draft: &CommentDraft) -> bool {
        self.name == draft.name && self.text == draft.text && self.extra == draft.extra
    }

    /// Overwrite only the fields supplied in `patch`.
    pub fn apply(&mut self, patch: CommentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
        self.extra.extend(patch.extra);
    }
}

/// A create payload that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub name: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields supplied in a PATCH body. Absent and `null` content fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentPatch {
    /// Extract the mergeable fields from a raw PATCH body. The `id` key is never merged.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::InvalidInput` if a supplied content field is not a string.
    pub fn from_body(body: &Value) -> CommentResult<Self> {
        let mut patch =
            Self::deserialize(body).map_err(|e| CommentError::InvalidInput(e.to_string()))?;
        patch.extra.remove("id");
        Ok(patch)
    }
}
