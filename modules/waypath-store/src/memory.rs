//! In-process reference backend for the [`Collection`] interface.
//!
//! Documents live in a `BTreeMap` per named collection so scans come back in
//! id order. The whole store sits behind one async `RwLock`, which is also
//! what makes `insert_unique` an atomic check-and-insert: the uniqueness
//! probe and the write happen under a single write guard.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Collection, StoreError};

type Documents = BTreeMap<String, Value>;

struct Inner {
    collections: RwLock<HashMap<String, Documents>>,
    closed: AtomicBool,
}

/// Process-wide store handle with an explicit lifecycle: constructed once at
/// startup via [`MemoryStore::open`], injected into whatever needs it, and
/// shut down with [`MemoryStore::close`]. Operations on a closed store fail
/// with [`StoreError::Closed`].
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn open() -> Self {
        Self {
            inner: Arc::new(Inner {
                collections: RwLock::new(HashMap::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Handle to a named collection. Collections spring into existence on
    /// first write; a handle to an untouched collection just scans empty.
    pub fn collection(&self, name: &str) -> MemoryCollection {
        MemoryCollection {
            name: name.to_string(),
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}

/// Handle to one named collection inside a [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryCollection {
    name: String,
    inner: Arc<Inner>,
}

impl MemoryCollection {
    fn check_open(&self) -> Result<(), StoreError> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

fn matches_on(doc: &Value, record: &Value, key_fields: &[&str]) -> bool {
    key_fields.iter().all(|field| {
        doc.get(*field).unwrap_or(&Value::Null) == record.get(*field).unwrap_or(&Value::Null)
    })
}

#[async_trait]
impl Collection for MemoryCollection {
    async fn insert(&self, record: Value) -> Result<String, StoreError> {
        self.check_open()?;
        if !record.is_object() {
            return Err(StoreError::MalformedDocument);
        }
        let mut collections = self.inner.collections.write().await;
        let docs = collections.entry(self.name.clone()).or_default();
        let id = Self::new_id();
        docs.insert(id.clone(), record);
        Ok(id)
    }

    async fn insert_unique(
        &self,
        key_fields: &[&str],
        record: Value,
    ) -> Result<String, StoreError> {
        self.check_open()?;
        if !record.is_object() {
            return Err(StoreError::MalformedDocument);
        }
        let mut collections = self.inner.collections.write().await;
        let docs = collections.entry(self.name.clone()).or_default();
        if docs.values().any(|doc| matches_on(doc, &record, key_fields)) {
            return Err(StoreError::Conflict {
                fields: key_fields.join(", "),
            });
        }
        let id = Self::new_id();
        docs.insert(id.clone(), record);
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Value>, StoreError> {
        self.check_open()?;
        let collections = self.inner.collections.read().await;
        Ok(collections
            .get(&self.name)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn scan_all(&self) -> Result<Vec<(String, Value)>, StoreError> {
        self.check_open()?;
        let collections = self.inner.collections.read().await;
        Ok(collections
            .get(&self.name)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query_equals(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        self.check_open()?;
        let collections = self.inner.collections.read().await;
        Ok(collections
            .get(&self.name)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| doc.get(field) == Some(value))
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn merge_update(&self, id: &str, fields: Value) -> Result<(), StoreError> {
        self.check_open()?;
        let updates = match fields {
            Value::Object(map) => map,
            _ => return Err(StoreError::MalformedDocument),
        };
        let mut collections = self.inner.collections.write().await;
        let doc = collections
            .get_mut(&self.name)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::MissingDocument(id.to_string()))?;
        let Some(existing) = doc.as_object_mut() else {
            return Err(StoreError::MalformedDocument);
        };
        for (key, value) in updates {
            existing.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_open()?;
        let mut collections = self.inner.collections.write().await;
        if let Some(docs) = collections.get_mut(&self.name) {
            docs.remove(id);
        }
        Ok(())
    }
}
