//! Startup and shutdown against a real listening socket.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use blog_api::{AppState, ServerError, start_server};
use blog_core::domain::{BlogPost, BlogPostChanges};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, BlogPostRepository};
use blog_infra::InMemoryBlogPostRepository;

/// In-memory store that records whether it was closed.
#[derive(Default)]
struct TrackedRepository {
    inner: InMemoryBlogPostRepository,
    closed: AtomicBool,
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for TrackedRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        self.inner.save(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl BlogPostRepository for TrackedRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        self.inner.find_all().await
    }

    async fn update(&self, id: Uuid, changes: BlogPostChanges) -> Result<(), RepoError> {
        self.inner.update(id, changes).await
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[actix_web::test]
async fn test_serves_until_closed() {
    let repo = Arc::new(TrackedRepository::default());
    let server = start_server(AppState::new(repo.clone()), "127.0.0.1", 0)
        .await
        .unwrap();
    let base = format!("http://{}", server.addrs()[0]);

    let created: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/posts", base))
        .json(&serde_json::json!({
            "title": "Dune",
            "content": "A beginning is the time...",
            "author": { "firstName": "Frank", "lastName": "Herbert" }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["author"], "Frank Herbert");

    let resp = reqwest::get(format!("{}/posts", base)).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let listed: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(listed.len(), 1);

    server.close().await.unwrap();
    assert!(repo.closed.load(Ordering::SeqCst));
    assert!(reqwest::get(format!("{}/posts", base)).await.is_err());
}

#[actix_web::test]
async fn test_bind_failure_closes_store() {
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let repo = Arc::new(TrackedRepository::default());
    let result = start_server(AppState::new(repo.clone()), "127.0.0.1", port).await;

    assert!(matches!(result, Err(ServerError::Bind { .. })));
    assert!(repo.closed.load(Ordering::SeqCst));
}
