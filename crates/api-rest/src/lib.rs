//! # API REST
//!
//! REST API implementation for the comments service.
//!
//! Handles:
//! - HTTP endpoints with axum under `/api/comments`
//! - OpenAPI documentation served as JSON
//! - REST-specific concerns (status codes, plain-text error bodies, CORS, request tracing)
//!
//! All data operations are delegated to `comments-core`.

#![warn(rust_2018_idioms)]

pub mod health;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use comments_core::{CommentError, CommentService, PatchOutcome};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};

pub use health::{HealthRes, HealthService};

/// Base path of the comments resource.
pub const COMMENTS_PATH: &str = "/api/comments";

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    comment_service: CommentService,
}

impl AppState {
    pub fn new(comment_service: CommentService) -> Self {
        Self { comment_service }
    }
}

/// A stored comment as documented in the OpenAPI schema.
///
/// Stored records may carry a numeric `id` and additional keys, which are returned unchanged.
#[derive(Debug, ToSchema)]
pub struct CommentRes {
    pub name: String,
    pub text: String,
    pub id: String,
}

/// POST request body as documented in the OpenAPI schema. Any `id` supplied is ignored.
#[derive(Debug, ToSchema)]
pub struct CreateCommentReq {
    pub name: String,
    pub text: String,
}

/// PATCH request body as documented in the OpenAPI schema.
///
/// With an `id` matching a stored comment, the supplied fields are merged into it. Otherwise the
/// body must be a complete create payload.
#[derive(Debug, ToSchema)]
pub struct PatchCommentReq {
    pub id: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_comments,
        get_comment,
        create_comment,
        patch_comment,
        delete_comment,
    ),
    components(schemas(HealthRes, CommentRes, CreateCommentReq, PatchCommentReq))
)]
pub struct ApiDoc;

/// Build the REST router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .route(
            COMMENTS_PATH,
            get(list_comments)
                .post(create_comment)
                .patch(patch_comment),
        )
        .route(
            &format!("{}/:id", COMMENTS_PATH),
            get(get_comment).delete(delete_comment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/api/comments",
    responses(
        (status = 200, description = "All comments", body = [CommentRes]),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
/// List every stored comment.
#[axum::debug_handler]
async fn list_comments(State(state): State<AppState>) -> Response {
    match state.comment_service.list() {
        Ok(comments) => Json(comments).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    params(("id" = String, Path, description = "Comment id; numeric ids match their decimal form")),
    responses(
        (status = 200, description = "Comment found", body = CommentRes),
        (status = 404, description = "Comment not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
/// Fetch one comment by id.
///
/// The stored id is compared in its string form, so `/api/comments/1` finds a comment stored
/// with the numeric id `1`.
#[axum::debug_handler]
async fn get_comment(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.comment_service.get(&id) {
        Ok(comment) => Json(comment).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentReq,
    responses(
        (status = 201, description = "Comment created", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid payload", body = String, content_type = "text/plain"),
        (status = 422, description = "Duplicate comment", body = String, content_type = "text/plain"),
        (status = 500, description = "Comment not persisted", body = String, content_type = "text/plain")
    )
)]
/// Create a new comment
///
/// The payload is validated before the collection is read. A comment whose `name` and `text`
/// and other fields all equal an existing comment's is rejected. The id is generated by the
/// server. The body is read as JSON whatever its `Content-Type`; an empty body reads as `{}`.
///
/// # Errors
/// - `400 Bad Request` if the body is not JSON, or a field is missing, not a string, blank or
///   too long.
/// - `422 Unprocessable Entity` if the same content already exists.
/// - `500 Internal Server Error` if the collection could not be saved.
#[axum::debug_handler]
async fn create_comment(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    match state.comment_service.create(&body) {
        Ok(comment) => (
            StatusCode::CREATED,
            format!("Comment id:{} has been added!", comment.id),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/comments",
    request_body = PatchCommentReq,
    responses(
        (status = 200, description = "Existing comment merged", body = CommentRes),
        (status = 201, description = "New comment created", body = CommentRes),
        (status = 400, description = "Invalid payload", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
/// Merge into an existing comment, or create one
///
/// The body's `id` is compared with stored ids without type coercion. On a match the supplied
/// fields overwrite the stored ones; otherwise the body is validated and stored as a new comment
/// under a generated id. The outcome of the save is not reflected in the response.
///
/// As with POST, the body is read as JSON whatever its `Content-Type`.
#[axum::debug_handler]
async fn patch_comment(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    match state.comment_service.merge_or_create(&body) {
        Ok(PatchOutcome::Merged(comment)) => (StatusCode::OK, Json(comment)).into_response(),
        Ok(PatchOutcome::Created(comment)) => (StatusCode::CREATED, Json(comment)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(("id" = String, Path, description = "Comment id; numeric ids match their decimal form")),
    responses(
        (status = 200, description = "Removed comment", body = CommentRes),
        (status = 404, description = "Comment not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
/// Delete a comment by id and return it.
#[axum::debug_handler]
async fn delete_comment(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.comment_service.delete(&id) {
        Ok(comment) => Json(comment).into_response(),
        Err(e) => error_response(e),
    }
}

/// Read a request body as JSON whatever its `Content-Type`. An empty body reads as `{}`.
fn parse_body(bytes: &Bytes) -> Result<Value, Response> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|e| {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e)).into_response()
    })
}

fn error_response(err: CommentError) -> Response {
    match err {
        CommentError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        CommentError::Duplicate => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Comment with the same fields already exists",
        )
            .into_response(),
        CommentError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            format!("Comment with id {} is not found", id),
        )
            .into_response(),
        CommentError::NotPersisted(source) => {
            tracing::error!("Create comment save error: {:?}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error. Comment has not been created",
            )
                .into_response()
        }
        other => {
            tracing::error!("Comment store error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}
