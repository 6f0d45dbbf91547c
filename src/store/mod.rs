//! Document Store Driver
//!
//! This module defines the contract commentd uses to talk to a document
//! store, plus one in-process implementation of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ CommentRepository   │  (comments module)
//! └──────────┬──────────┘
//!            │ Arc<dyn DocumentStore>
//!            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DocumentStore                           │
//! │                                                             │
//! │   find_all · insert · find_by_id_and_update · ..._delete    │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//!                            ▼
//!              ┌───────────────────────────┐
//!              │       MemoryStore         │
//!              │  64 RwLock shards by id   │
//!              └───────────────────────────┘
//! ```
//!
//! Documents are schemaless JSON objects addressed by a [`DocumentId`] that
//! the store generates on insert. Every operation is a single round trip;
//! the driver never retries.
//!
//! ## Example
//!
//! ```
//! use commentd::store::{DocumentStore, Fields, MemoryStore};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//!
//! let mut fields = Fields::new();
//! fields.insert("text".into(), json!("hello"));
//! let doc = store.insert("comments", fields).await.unwrap();
//!
//! let all = store.find_all("comments").await.unwrap();
//! assert_eq!(all[0].id, doc.id);
//! # });
//! ```

pub mod error;
pub mod id;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

pub use error::StoreError;
pub use id::DocumentId;
pub use memory::{MemoryStore, StoreStats};

/// The field map of a document, excluding its id.
pub type Fields = serde_json::Map<String, Value>;

/// A stored document: its generated id plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    /// Flattens the document into a single JSON object with an `id` key.
    pub fn into_value(self) -> Value {
        let mut object = self.fields;
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        Value::Object(object)
    }
}

/// Id-keyed access to collections of documents.
///
/// Implementations must give read-your-writes consistency for a single
/// document across sequential calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection`, in insertion order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Stores a new document and returns it with its generated id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Merges `changes` into the document with the given id and returns the
    /// document as it is after the update.
    ///
    /// Returns `Ok(None)` when no document matches.
    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: &str,
        changes: Fields,
    ) -> Result<Option<Document>, StoreError>;

    /// Removes the document with the given id and returns it.
    ///
    /// Returns `Ok(None)` when no document matches.
    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;
}
