use thiserror::Error;

use waypath_store::StoreError;

#[derive(Error, Debug)]
pub enum WaypathError {
    /// Caller-fixable input problem: out-of-range coordinate, non-positive
    /// weight, self-loop, malformed patch.
    #[error("validation error: {0}")]
    Validation(String),

    /// A vertex, edge, or record is absent. Kept distinct from validation so
    /// callers can map it to missing-resource semantics.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An edge already exists for this normalized endpoint pair. A conflict,
    /// not a generic validation failure.
    #[error("edge already exists between {point_a_id} and {point_b_id}")]
    DuplicateEdge {
        point_a_id: String,
        point_b_id: String,
    },

    /// A stored document that does not decode into its record type.
    #[error("malformed record: {0}")]
    Decode(#[from] serde_json::Error),

    /// Store I/O failures pass through unmodified; retry policy belongs to
    /// the store, not to this core.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WaypathError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
