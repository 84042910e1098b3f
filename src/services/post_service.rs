//! Post service - post-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Post;
use crate::errors::{AppResult, OptionExt};
use crate::infra::PostRepository;

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a new post
    async fn create_post(&self, title: String) -> AppResult<Post>;

    /// Get a post by ID
    async fn get_post(&self, id: Uuid) -> AppResult<Post>;

    /// List all posts, newest first
    async fn list_posts(&self) -> AppResult<Vec<Post>>;

    /// Update a post's title
    async fn update_post(&self, id: Uuid, title: String) -> AppResult<Post>;

    /// Delete a post
    async fn delete_post(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PostService using the post repository.
pub struct PostManager {
    posts: Arc<dyn PostRepository>,
}

impl PostManager {
    /// Create new post service instance
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn create_post(&self, title: String) -> AppResult<Post> {
        self.posts.create(title).await
    }

    async fn get_post(&self, id: Uuid) -> AppResult<Post> {
        self.posts.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_posts(&self) -> AppResult<Vec<Post>> {
        self.posts.list().await
    }

    async fn update_post(&self, id: Uuid, title: String) -> AppResult<Post> {
        self.posts.update(id, title).await
    }

    async fn delete_post(&self, id: Uuid) -> AppResult<()> {
        self.posts.delete(id).await
    }
}
