//! PostgreSQL blog post store.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use blog_core::domain::{BlogPost, BlogPostChanges};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, BlogPostRepository};

use super::connections::{DatabaseConfig, connect};
use super::entity::blog_post::{self, Entity as BlogPostEntity};

/// Blog post repository backed by a SeaORM connection pool.
pub struct PostgresBlogPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresBlogPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Connect using `config` and wrap the resulting pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let db = connect(config)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for PostgresBlogPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let result = BlogPostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        let active_model: blog_post::ActiveModel = entity.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = BlogPostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogPostEntity::find()
            .order_by_asc(blog_post::Column::Created)
            .order_by_asc(blog_post::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, changes: BlogPostChanges) -> Result<(), RepoError> {
        // An UPDATE with no SET clause is invalid SQL; only report existence.
        if changes.is_empty() {
            return match self.find_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            };
        }

        let active_model: blog_post::ActiveModel = changes.into();
        let result = BlogPostEntity::update_many()
            .set(active_model)
            .filter(blog_post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Blog post updated");
        Ok(())
    }

    async fn close(&self) -> Result<(), RepoError> {
        tracing::info!("Closing database connection");
        self.db
            .close_by_ref()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}
