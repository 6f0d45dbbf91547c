//! Thread-Safe In-Memory Document Store
//!
//! This module implements [`DocumentStore`] on top of a sharded, concurrent
//! HashMap. It is what the `commentd` binary runs against when no external
//! store is configured, and what the tests use.
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: Documents are spread over shards by id hash, so
//!    requests on different comments rarely contend.
//! 2. **Arc<RwLock>**: Listing takes read locks only; writes lock one shard.
//! 3. **Insertion Sequence**: A global counter stamps each insert, so listing
//!    can restore insertion order after gathering from every shard.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MemoryStore                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ Shard N │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ RwLock  │           │
//! │  │ HashMap │ │ HashMap │ │ HashMap │ │ HashMap │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A poisoned shard lock is reported as [`StoreError::Unavailable`] instead
//! of propagating the panic into request handlers.

use super::{Document, DocumentId, DocumentStore, Fields, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::trace;

/// Number of shards for the store.
const NUM_SHARDS: usize = 64;

/// A document as held in a shard.
#[derive(Debug, Clone)]
struct StoredDocument {
    collection: String,
    fields: Fields,
    /// Position in the global insertion order
    seq: u64,
}

impl StoredDocument {
    fn to_document(&self, id: DocumentId) -> Document {
        Document {
            id,
            fields: self.fields.clone(),
        }
    }
}

/// A single shard containing a portion of the documents.
#[derive(Debug, Default)]
struct Shard {
    docs: RwLock<HashMap<DocumentId, StoredDocument>>,
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("shard lock poisoned".to_string())
}

/// Snapshot of store counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub documents: u64,
    pub finds: u64,
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
}

/// An in-memory [`DocumentStore`].
///
/// Designed to be wrapped in an `Arc` and shared by every request task.
///
/// # Example
///
/// ```
/// use commentd::store::{DocumentStore, Fields, MemoryStore};
///
/// # tokio_test::block_on(async {
/// let store = MemoryStore::new();
/// let doc = store.insert("comments", Fields::new()).await.unwrap();
///
/// let removed = store
///     .find_by_id_and_delete("comments", &doc.id.to_string())
///     .await
///     .unwrap();
/// assert!(removed.is_some());
/// assert!(store.is_empty());
/// # });
/// ```
pub struct MemoryStore {
    shards: Vec<Shard>,

    /// Next insertion sequence number
    next_seq: AtomicU64,

    /// Statistics: number of stored documents
    doc_count: AtomicU64,

    /// Statistics: total find_all operations
    find_count: AtomicU64,

    /// Statistics: total insert operations
    insert_count: AtomicU64,

    /// Statistics: total update operations
    update_count: AtomicU64,

    /// Statistics: total delete operations
    delete_count: AtomicU64,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("shards", &self.shards.len())
            .field("doc_count", &self.doc_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let shards = (0..NUM_SHARDS).map(|_| Shard::default()).collect();

        Self {
            shards,
            next_seq: AtomicU64::new(0),
            doc_count: AtomicU64::new(0),
            find_count: AtomicU64::new(0),
            insert_count: AtomicU64::new(0),
            update_count: AtomicU64::new(0),
            delete_count: AtomicU64::new(0),
        }
    }

    /// Determines which shard an id belongs to.
    #[inline]
    fn shard_index(&self, id: &DocumentId) -> usize {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    #[inline]
    fn get_shard(&self, id: &DocumentId) -> &Shard {
        &self.shards[self.shard_index(id)]
    }

    /// Returns the number of documents across all collections.
    pub fn len(&self) -> usize {
        self.doc_count.load(Ordering::Relaxed) as usize
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the operation counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            documents: self.doc_count.load(Ordering::Relaxed),
            finds: self.find_count.load(Ordering::Relaxed),
            inserts: self.insert_count.load(Ordering::Relaxed),
            updates: self.update_count.load(Ordering::Relaxed),
            deletes: self.delete_count.load(Ordering::Relaxed),
        }
    }

    fn find_all_sync(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.find_count.fetch_add(1, Ordering::Relaxed);

        let mut found = Vec::new();
        for shard in &self.shards {
            let docs = shard.docs.read().map_err(poisoned)?;
            found.extend(
                docs.iter()
                    .filter(|(_, stored)| stored.collection == collection)
                    .map(|(id, stored)| (stored.seq, stored.to_document(*id))),
            );
        }

        found.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(found.into_iter().map(|(_, doc)| doc).collect())
    }

    fn insert_sync(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        self.insert_count.fetch_add(1, Ordering::Relaxed);

        let id = DocumentId::generate();
        let stored = StoredDocument {
            collection: collection.to_string(),
            fields,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        let document = stored.to_document(id);

        let mut docs = self.get_shard(&id).docs.write().map_err(poisoned)?;
        docs.insert(id, stored);
        self.doc_count.fetch_add(1, Ordering::Relaxed);

        trace!(collection, %id, "Inserted document");
        Ok(document)
    }

    fn update_sync(
        &self,
        collection: &str,
        id: &str,
        changes: Fields,
    ) -> Result<Option<Document>, StoreError> {
        self.update_count.fetch_add(1, Ordering::Relaxed);

        let id: DocumentId = id.parse()?;
        let mut docs = self.get_shard(&id).docs.write().map_err(poisoned)?;

        match docs.get_mut(&id) {
            Some(stored) if stored.collection == collection => {
                stored.fields.extend(changes);
                Ok(Some(stored.to_document(id)))
            }
            _ => Ok(None),
        }
    }

    fn delete_sync(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.delete_count.fetch_add(1, Ordering::Relaxed);

        let id: DocumentId = id.parse()?;
        let mut docs = self.get_shard(&id).docs.write().map_err(poisoned)?;

        let matches = docs
            .get(&id)
            .map(|stored| stored.collection == collection)
            .unwrap_or(false);
        if !matches {
            return Ok(None);
        }

        let removed = docs.remove(&id).map(|stored| stored.to_document(id));
        if removed.is_some() {
            self.doc_count.fetch_sub(1, Ordering::Relaxed);
        }
        Ok(removed)
    }
}

// Each operation holds a shard lock only for a map access, so the sync
// bodies run inline on the calling task.
#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.find_all_sync(collection)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        self.insert_sync(collection, fields)
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: &str,
        changes: Fields,
    ) -> Result<Option<Document>, StoreError> {
        self.update_sync(collection, id, changes)
    }

    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.delete_sync(collection, id)
    }
}
