use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, BlogPostChanges, NewBlogPost};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a fully formed entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog post store.
#[async_trait]
pub trait BlogPostRepository: BaseRepository<BlogPost, Uuid> {
    /// All posts, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Assign an id and creation time, then persist.
    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::from_new(post, Uuid::new_v4(), chrono::Utc::now());
        self.save(post).await
    }

    /// Apply a partial update. Returns `RepoError::NotFound` if no post matched.
    async fn update(&self, id: Uuid, changes: BlogPostChanges) -> Result<(), RepoError>;

    /// Release the underlying connection.
    async fn close(&self) -> Result<(), RepoError>;
}
