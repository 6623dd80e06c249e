//! Input validation utilities.
//!
//! This module checks create payloads before they are turned into records, and detects
//! duplicate content against the existing collection.

use crate::comment::{Comment, CommentDraft};
use crate::constants::{COMMENT_CONTENT_FIELDS, MAX_FIELD_LEN};
use crate::{CommentError, CommentResult};
use serde_json::Value;

/// Validates a create payload and returns the draft it describes.
///
/// Each content field must be present, be a string, be non-empty after trimming and be no
/// longer than [`MAX_FIELD_LEN`] characters. Fields are checked in [`COMMENT_CONTENT_FIELDS`]
/// order and the first failure is reported. Values are kept as supplied, untrimmed.
///
/// Other keys are carried into the draft as-is, except `id`, which is always assigned by the
/// service.
///
/// # Errors
///
/// Returns `CommentError::InvalidInput` naming the first failing field and the reason.
pub fn validate_comment(candidate: &Value) -> CommentResult<CommentDraft> {
    let Some(object) = candidate.as_object() else {
        return Err(CommentError::InvalidInput(
            "Comment payload must be a JSON object".into(),
        ));
    };

    for field in COMMENT_CONTENT_FIELDS {
        let value = match object.get(field) {
            None | Some(Value::Null) => {
                return Err(CommentError::InvalidInput(format!(
                    "Field \"{}\" is required",
                    field
                )))
            }
            Some(Value::String(s)) => s,
            Some(_) => {
                return Err(CommentError::InvalidInput(format!(
                    "Field \"{}\" must be a string",
                    field
                )))
            }
        };

        if value.trim().is_empty() {
            return Err(CommentError::InvalidInput(format!(
                "Field \"{}\" cannot be empty",
                field
            )));
        }

        if value.chars().count() > MAX_FIELD_LEN {
            return Err(CommentError::InvalidInput(format!(
                "Field \"{}\" exceeds maximum length of {} characters",
                field, MAX_FIELD_LEN
            )));
        }
    }

    let mut draft: CommentDraft = serde_json::from_value(candidate.clone())
        .map_err(|e| CommentError::InvalidInput(e.to_string()))?;
    draft.extra.remove("id");
    Ok(draft)
}

/// Returns `false` if any existing record has the same content as `draft`, comparing every
/// field except the id.
pub fn is_unique(draft: &CommentDraft, existing: &[Comment]) -> bool {
    !existing.iter().any(|comment| comment.has_content_of(draft))
}
