pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::{MemoryCollection, MemoryStore};

use async_trait::async_trait;
use serde_json::Value;

/// One named document collection in the record store.
///
/// Documents are JSON objects; ids are store-assigned opaque strings with a
/// total (lexicographic) order. The interface is deliberately minimal: a
/// per-collection scan, single-field equality queries, and point lookups.
/// There is no OR query and no multi-document transaction; the one
/// conditional primitive is [`Collection::insert_unique`].
#[async_trait]
pub trait Collection: Send + Sync {
    /// Insert a new document and return its assigned id.
    async fn insert(&self, record: Value) -> Result<String, StoreError>;

    /// Insert a new document only if no existing document matches `record`
    /// on every field named in `key_fields`. The check and the insert are
    /// atomic with respect to other writers; a match fails with
    /// [`StoreError::Conflict`].
    async fn insert_unique(
        &self,
        key_fields: &[&str],
        record: Value,
    ) -> Result<String, StoreError>;

    /// Point lookup. Absence is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: &str) -> Result<Option<Value>, StoreError>;

    /// Full collection scan, in id order.
    async fn scan_all(&self) -> Result<Vec<(String, Value)>, StoreError>;

    /// All documents whose `field` equals `value`, in id order.
    async fn query_equals(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Value)>, StoreError>;

    /// Shallow-merge `fields` into an existing document.
    async fn merge_update(&self, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Unconditional removal. Deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
