//! Constants used throughout the comments core crate.

/// Default backing file when no explicit file is configured.
pub const DEFAULT_DATA_FILE: &str = "mock-comments.json";

/// Content fields every comment must carry, in validation order.
pub const COMMENT_CONTENT_FIELDS: [&str; 2] = ["name", "text"];

/// Maximum length of a content field, in characters.
pub const MAX_FIELD_LEN: usize = 255;
