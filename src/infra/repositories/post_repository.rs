//! Post repository - persistence for post records.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use crate::domain::Post;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post store contract
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post
    async fn create(&self, title: String) -> AppResult<Post>;

    /// Find a post by identifier
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>>;

    /// List all posts, newest first
    async fn list(&self) -> AppResult<Vec<Post>>;

    /// Update a post's title
    async fn update(&self, id: Uuid, title: String) -> AppResult<Post>;

    /// Delete a post
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PostRepository backed by SeaORM
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn create(&self, title: String) -> AppResult<Post> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Post::from))
    }

    async fn list(&self) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Post::from).collect())
    }

    async fn update(&self, id: Uuid, title: String) -> AppResult<Post> {
        let post = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = post.into();
        active.title = Set(title);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
