//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::error::RepoError;
use blog_core::ports::BlogPostRepository;
use blog_infra::{DatabaseConfig, InMemoryBlogPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::PostgresBlogPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn BlogPostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn BlogPostRepository>) -> Self {
        Self { posts }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBlogPostRepository::new()))
    }

    /// Open the configured store.
    ///
    /// Without a database configuration the in-memory store is used; a
    /// configured database that cannot be reached is an error.
    pub async fn connect(db_config: Option<&DatabaseConfig>) -> Result<Self, RepoError> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        #[cfg(feature = "postgres")]
        {
            let repo = PostgresBlogPostRepository::connect(config).await?;
            tracing::info!("Application state initialized");
            Ok(Self::new(Arc::new(repo)))
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            tracing::warn!("Built without postgres feature - using in-memory repository");
            Ok(Self::in_memory())
        }
    }
}
