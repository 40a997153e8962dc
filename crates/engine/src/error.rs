use thiserror::Error;

/// Engine-level error the per-usecase error enums map into. Embeddings
/// (an HTTP layer, a CLI) translate these into their own surface.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Internal error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}
