//! Comment Repository
//!
//! Translates comment operations into single calls on the injected
//! [`DocumentStore`]. Every method is exactly one store round trip.

use super::model::{Comment, CommentInput};
use crate::store::{DocumentStore, StoreError};
use std::sync::Arc;
use tracing::debug;

/// Collection that comment documents live in.
pub const COLLECTION: &str = "comments";

/// Typed access to stored comments.
#[derive(Clone)]
pub struct CommentRepository {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for CommentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentRepository")
            .field("collection", &COLLECTION)
            .finish()
    }
}

impl CommentRepository {
    /// Creates a repository over the given store handle.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns every comment in the order the store yields them.
    pub async fn list_all(&self) -> Result<Vec<Comment>, StoreError> {
        self.store
            .find_all(COLLECTION)
            .await?
            .into_iter()
            .map(Comment::try_from)
            .collect()
    }

    /// Stores a new comment. Absent fields are passed through unchecked.
    pub async fn create(&self, input: CommentInput) -> Result<Comment, StoreError> {
        let doc = self.store.insert(COLLECTION, input.into_fields()).await?;
        Comment::try_from(doc)
    }

    /// Overwrites the present fields of a comment.
    ///
    /// Returns `Ok(None)` if no comment has this id.
    pub async fn update_by_id(
        &self,
        id: &str,
        input: CommentInput,
    ) -> Result<Option<Comment>, StoreError> {
        self.store
            .find_by_id_and_update(COLLECTION, id, input.into_fields())
            .await?
            .map(Comment::try_from)
            .transpose()
    }

    /// Deletes a comment. Succeeds whether or not the comment existed.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.store.find_by_id_and_delete(COLLECTION, id).await?;
        debug!(id, existed = removed.is_some(), "Deleted comment");
        Ok(())
    }
}
