//! Store driver errors.

/// Errors returned by a [`DocumentStore`](super::DocumentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The identifier is not in the store's id format
    #[error("invalid document id: {0:?}")]
    InvalidId(String),

    /// The store could not serve the request
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A document could not be converted to or from its typed form
    #[error("document decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
