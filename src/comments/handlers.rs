//! Comment Handler Set
//!
//! One axum handler per operation. Each handler makes a single repository
//! call and maps the outcome to a response:
//!
//! ```text
//! Operation   Success                        Failure (500)
//! ─────────   ────────────────────────────   ─────────────────────────────
//! list        200 [Comment, ...]             "Failed to fetch comments"
//! create      201 Comment                    "Failed to add comment"
//! update      200 Comment | null             "Failed to update comment"
//! delete      200 {"message": ...}           "Failed to delete comment"
//! ```
//!
//! Store failures never reach the client; they are logged here and replaced
//! by the fixed message of the operation.

use super::model::{Comment, CommentInput};
use super::repository::CommentRepository;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, error};

pub const FETCH_FAILED: &str = "Failed to fetch comments";
pub const ADD_FAILED: &str = "Failed to add comment";
pub const UPDATE_FAILED: &str = "Failed to update comment";
pub const DELETE_FAILED: &str = "Failed to delete comment";
pub const DELETED: &str = "Comment deleted successfully";

/// Body of every failure response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub message: &'static str,
}

/// A failed operation, rendered as a 500 with a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    message: &'static str,
}

impl ApiError {
    /// Logs `cause` and returns the client-facing error for an operation.
    fn caused_by(message: &'static str, cause: impl Display) -> Self {
        error!(error = %cause, "{}", message);
        Self { message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Returns true if the request declares a JSON body.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Reads the request body the way a permissive JSON body parser would.
///
/// A request without a JSON content type, or with an empty body, carries no
/// fields at all. A non-empty JSON body that does not decode is a failure of
/// the operation.
fn read_input(
    headers: &HeaderMap,
    body: &Bytes,
    on_error: &'static str,
) -> Result<CommentInput, ApiError> {
    if !is_json(headers) || body.is_empty() {
        return Ok(CommentInput::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::caused_by(on_error, e))
}

/// `GET /`
pub async fn list_comments(
    State(repo): State<CommentRepository>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = repo
        .list_all()
        .await
        .map_err(|e| ApiError::caused_by(FETCH_FAILED, e))?;
    debug!(count = comments.len(), "Listed comments");
    Ok(Json(comments))
}

/// `POST /`
pub async fn create_comment(
    State(repo): State<CommentRepository>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let input = read_input(&headers, &body, ADD_FAILED)?;
    let comment = repo
        .create(input)
        .await
        .map_err(|e| ApiError::caused_by(ADD_FAILED, e))?;
    debug!(id = %comment.id, "Created comment");
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `PUT /{id}`
///
/// An unknown id is not an error: the response is `200 null`.
pub async fn update_comment(
    State(repo): State<CommentRepository>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Option<Comment>>, ApiError> {
    let input = read_input(&headers, &body, UPDATE_FAILED)?;
    let comment = repo
        .update_by_id(&id, input)
        .await
        .map_err(|e| ApiError::caused_by(UPDATE_FAILED, format_args!("{} (id {})", e, id)))?;
    debug!(%id, found = comment.is_some(), "Updated comment");
    Ok(Json(comment))
}

/// `DELETE /{id}`
pub async fn delete_comment(
    State(repo): State<CommentRepository>,
    Path(id): Path<String>,
) -> Result<Json<DeletedBody>, ApiError> {
    repo.delete_by_id(&id)
        .await
        .map_err(|e| ApiError::caused_by(DELETE_FAILED, format_args!("{} (id {})", e, id)))?;
    Ok(Json(DeletedBody { message: DELETED }))
}
