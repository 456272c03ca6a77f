//! In-memory blog post store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, BlogPostChanges};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, BlogPostRepository};

/// Blog post store kept in a `Vec` behind an async RwLock.
///
/// Posts are returned in insertion order.
/// Note: Data is lost on process restart.
pub struct InMemoryBlogPostRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryBlogPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryBlogPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryBlogPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == entity.id) {
            return Err(RepoError::Query(format!("duplicate id {}", entity.id)));
        }
        posts.push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn update(&self, id: Uuid, changes: BlogPostChanges) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.apply(changes);
        Ok(())
    }

    async fn close(&self) -> Result<(), RepoError> {
        tracing::debug!("In-memory store closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{Author, NewBlogPost};

    fn new_post(title: &str) -> NewBlogPost {
        NewBlogPost::new(
            title.to_string(),
            Some("Body".to_string()),
            Some(Author::new("Octavia", "Butler")),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryBlogPostRepository::new();
        let created = repo.create(new_post("Kindred")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_all_insertion_order() {
        let repo = InMemoryBlogPostRepository::new();
        repo.create(new_post("One")).await.unwrap();
        repo.create(new_post("Two")).await.unwrap();
        repo.create(new_post("Three")).await.unwrap();

        let titles: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn test_update_partial() {
        let repo = InMemoryBlogPostRepository::new();
        let created = repo.create(new_post("Dawn")).await.unwrap();

        let changes = BlogPostChanges {
            title: Some(Some("Adulthood Rites".to_string())),
            ..Default::default()
        };
        repo.update(created.id, changes).await.unwrap();

        let updated = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "Adulthood Rites");
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.author, created.author);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryBlogPostRepository::new();
        let err = repo
            .update(Uuid::new_v4(), BlogPostChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryBlogPostRepository::new();
        let created = repo.create(new_post("Imago")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await.unwrap_err(),
            RepoError::NotFound
        ));
    }
}
