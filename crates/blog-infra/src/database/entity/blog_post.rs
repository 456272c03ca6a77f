//! Blog post entity for SeaORM.
//!
//! The embedded author is flattened into two nullable columns.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use blog_core::domain::{Author, BlogPost, BlogPostChanges};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: Author {
                first_name: model.author_first_name,
                last_name: model.author_last_name,
            },
            created: model.created.into(),
        }
    }
}

/// Conversion from domain BlogPost to SeaORM ActiveModel.
impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author_first_name: Set(post.author.first_name),
            author_last_name: Set(post.author.last_name),
            created: Set(post.created.into()),
        }
    }
}

/// Only supplied fields are `Set`; everything else stays out of the UPDATE.
impl From<BlogPostChanges> for ActiveModel {
    fn from(changes: BlogPostChanges) -> Self {
        let (author_first_name, author_last_name) = match changes.author {
            Some(author) => (Set(author.first_name), Set(author.last_name)),
            None => (NotSet, NotSet),
        };

        Self {
            id: NotSet,
            title: match changes.title {
                Some(Some(title)) => Set(title),
                _ => NotSet,
            },
            content: match changes.content {
                Some(content) => Set(content),
                None => NotSet,
            },
            author_first_name,
            author_last_name,
            created: NotSet,
        }
    }
}
