//! Post handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::PostResponse;
use crate::errors::AppResult;

/// Post creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Post title
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[schema(example = "Hello world")]
    pub title: String,
}

/// Post update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    /// New post title
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[schema(example = "Updated title")]
    pub title: String,
}

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

/// List all posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    responses(
        (status = 200, description = "All posts, newest first", body = Vec<PostResponse>)
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<PostResponse>>> {
    let posts = state.post_service.list_posts().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Create a new post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let post = state.post_service.create_post(payload.title).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    let post = state.post_service.get_post(id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Update a post's title
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> AppResult<Json<PostResponse>> {
    let post = state.post_service.update_post(id, payload.title).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
