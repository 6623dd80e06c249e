//! # Comments Core
//!
//! Core business logic for the comments service.
//!
//! This crate contains pure data operations over a flat collection of comments:
//! - The comment record model
//! - Whole-collection storage accessors (JSON file, in-memory)
//! - Create-payload validation and duplicate detection
//! - List, get, create, merge-or-create and delete operations
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`.

pub mod comment;
pub mod config;
pub mod constants;
pub mod error;
pub mod service;
pub mod store;
pub mod validation;

pub use comment::{Comment, CommentDraft, CommentPatch};
pub use comments_types::CommentId;
pub use config::CoreConfig;
pub use constants::DEFAULT_DATA_FILE;
pub use error::{CommentError, CommentResult};
pub use service::{CommentService, PatchOutcome};
pub use store::{CommentStore, FailingSaves, InMemoryStore, JsonFileStore};
