//! Post domain entity and response types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Post domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post response for clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    /// Unique post identifier
    pub id: Uuid,
    /// Post title
    pub title: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
