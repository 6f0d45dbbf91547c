//! Comment routes.

use super::handlers::{create_comment, delete_comment, list_comments, update_comment};
use super::repository::CommentRepository;
use axum::routing::{get, put};
use axum::Router;

/// Builds the comment router, relative to wherever it gets mounted.
///
/// ```text
/// GET    /       list_comments
/// POST   /       create_comment
/// PUT    /{id}   update_comment
/// DELETE /{id}   delete_comment
/// ```
pub fn comment_routes(repo: CommentRepository) -> Router {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/{id}", put(update_comment).delete(delete_comment))
        .with_state(repo)
}
