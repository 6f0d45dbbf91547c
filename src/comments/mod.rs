//! Comment Resource Module
//!
//! This module implements the comment API: a repository over the document
//! store, four HTTP handlers, and the router binding them.
//!
//! ## Architecture
//!
//! ```text
//! HTTP request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ comment_routes  │  method + path dispatch
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    handlers     │  extract, call, map result to status + JSON
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │CommentRepository│  one store round trip per call
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  DocumentStore  │  (store module)
//! └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use commentd::comments::{comment_routes, CommentRepository};
//! use commentd::store::MemoryStore;
//! use std::sync::Arc;
//!
//! let repo = CommentRepository::new(Arc::new(MemoryStore::new()));
//! let app = axum::Router::new().nest("/comments", comment_routes(repo));
//! # let _ = app;
//! ```

pub mod handlers;
pub mod model;
pub mod repository;
pub mod routes;

pub use handlers::ApiError;
pub use model::{Comment, CommentInput};
pub use repository::CommentRepository;
pub use routes::comment_routes;
