//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads process-wide environment variables.

use crate::store::{CommentStore, FailingSaves, JsonFileStore};
use crate::{CommentError, CommentResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
    simulate_save_failure: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::InvalidInput` if `data_file` is empty.
    pub fn new(data_file: PathBuf, simulate_save_failure: bool) -> CommentResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(CommentError::InvalidInput(
                "data file path cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_file,
            simulate_save_failure,
        })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn simulate_save_failure(&self) -> bool {
        self.simulate_save_failure
    }

    /// Build the storage accessor described by this configuration.
    ///
    /// When save failures are simulated the file store is wrapped in [`FailingSaves`], which
    /// still writes the file but reports every save as failed.
    pub fn store(&self) -> Arc<dyn CommentStore> {
        let file_store = JsonFileStore::new(self.data_file.clone());
        if self.simulate_save_failure {
            Arc::new(FailingSaves::new(file_store))
        } else {
            Arc::new(file_store)
        }
    }
}

/// Parse a boolean flag from an optional string value.
///
/// `None`, empty and whitespace-only values are `false`.
pub fn bool_from_env_value(value: Option<String>) -> CommentResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(CommentError::InvalidInput(format!(
            "expected a boolean flag, got {:?}",
            other
        ))),
    }
}
