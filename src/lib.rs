//! # commentd - A Comment Resource API
//!
//! commentd exposes a single resource, the comment, over HTTP with four
//! operations: list, create, update and delete. Comments live in a document
//! store reached through the [`DocumentStore`] driver trait.
//!
//! ## Features
//!
//! - **Small Contract**: `{id, text, author}` documents, fixed error bodies
//! - **Pluggable Store**: the repository only sees `Arc<dyn DocumentStore>`
//! - **In-Memory Driver**: a sharded [`MemoryStore`] for standalone runs
//! - **Async I/O**: Built on Tokio and axum for concurrent requests
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              commentd                                   │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│   Router    │───>│  Comment    │                  │
//! │  │ (axum)      │    │ /comments   │    │  Handlers   │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                                    ┌─────────────────────┐              │
//! │                                    │ CommentRepository   │              │
//! │                                    └──────────┬──────────┘              │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                     ┌──────────────────────────────────────────────┐   │
//! │                     │        DocumentStore (MemoryStore)           │   │
//! │                     │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ │   │
//! │                     │  │Shard 0 │ │Shard 1 │ │Shard 2 │ │...N    │ │   │
//! │                     │  └────────┘ └────────┘ └────────┘ └────────┘ │   │
//! │                     └──────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use commentd::server::{build_app, serve, RequestStats};
//! use commentd::store::MemoryStore;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let stats = Arc::new(RequestStats::new());
//!     let app = build_app(store, "/comments", stats);
//!
//!     let listener = TcpListener::bind("127.0.0.1:3000").await?;
//!     serve(listener, app, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! }
//! ```
//!
//! ## HTTP API
//!
//! - `GET /comments` - list all comments
//! - `POST /comments` - create from `{text, author}`, answers 201
//! - `PUT /comments/{id}` - update, answers the comment or `null`
//! - `DELETE /comments/{id}` - delete, succeeds even if nothing matched
//!
//! Any store failure answers 500 with `{"error": "<fixed message>"}`.
//!
//! ## Module Overview
//!
//! - [`store`]: driver trait, ids, errors and the in-memory store
//! - [`comments`]: model, repository, handlers and routes
//! - [`server`]: application assembly, request logging, serving
//! - [`config`]: command-line and environment configuration

pub mod comments;
pub mod config;
pub mod server;
pub mod store;

// Re-export commonly used types for convenience
pub use comments::{comment_routes, Comment, CommentInput, CommentRepository};
pub use config::Config;
pub use server::{build_app, serve, RequestStats};
pub use store::{DocumentStore, MemoryStore, StoreError};

/// The default port commentd listens on
pub const DEFAULT_PORT: u16 = 3000;

/// The default host commentd binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// The default path the comment routes are mounted under
pub const DEFAULT_MOUNT: &str = "/comments";

/// Version of commentd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
