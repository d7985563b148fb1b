use thiserror::Error;

/// Failures surfaced by the record store. Opaque to the graph core, which
/// propagates them to its caller unmodified and never retries.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store is closed")]
    Closed,

    #[error("document must be a JSON object")]
    MalformedDocument,

    #[error("document {0} not found")]
    MissingDocument(String),

    #[error("unique constraint violated on ({fields})")]
    Conflict { fields: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
