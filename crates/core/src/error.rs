#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("comment with the same fields already exists")]
    Duplicate,
    #[error("comment with id {0} is not found")]
    NotFound(String),
    #[error("failed to read comments file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write comments file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize comments: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize comments: {0}")]
    Deserialization(serde_json::Error),
    #[error("save failure simulated by configuration")]
    SimulatedSaveFailure,
    #[error("comment was not persisted: {0}")]
    NotPersisted(#[source] Box<CommentError>),
}

pub type CommentResult<T> = std::result::Result<T, CommentError>;
