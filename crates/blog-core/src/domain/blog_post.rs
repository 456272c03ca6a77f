use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Author;
use crate::error::DomainError;

/// Blog post document as persisted by the store.
///
/// Not serializable on purpose: responses go through [`BlogPost::serialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub author: Author,
    pub created: DateTime<Utc>,
}

/// Public projection of a blog post.
///
/// `author` is the derived display name, never the structured sub-document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicBlogPost {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub author: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Materialize a validated post with its store-assigned identity.
    pub fn from_new(new: NewBlogPost, id: Uuid, created: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            author: new.author,
            created,
        }
    }

    /// Build the public representation, recomputing the author name.
    pub fn serialize(&self) -> PublicBlogPost {
        PublicBlogPost {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.display_name(),
            created: self.created,
        }
    }

    /// Apply a partial update. Fields absent from `changes` stay untouched.
    pub fn apply(&mut self, changes: BlogPostChanges) {
        if let Some(Some(title)) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
    }
}

/// A blog post that has passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: Option<String>,
    pub author: Author,
}

impl NewBlogPost {
    pub fn new(
        title: String,
        content: Option<String>,
        author: Option<Author>,
    ) -> Result<Self, DomainError> {
        ensure_title(&title)?;
        Ok(Self {
            title,
            content,
            author: author.unwrap_or_default(),
        })
    }
}

/// Partial update set.
///
/// The outer `Option` says whether a field was supplied at all; for
/// `title` and `content` the inner `Option` carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostChanges {
    pub title: Option<Option<String>>,
    pub content: Option<Option<String>>,
    pub author: Option<Author>,
}

impl BlogPostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }

    /// A supplied title must be present and non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.title {
            None => Ok(()),
            Some(None) => Err(DomainError::Validation(
                "`title` must not be null".to_string(),
            )),
            Some(Some(title)) => ensure_title(title),
        }
    }
}

fn ensure_title(title: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::Validation(
            "`title` must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> BlogPost {
        let new = NewBlogPost::new(
            "Walden".to_string(),
            Some("Life in the woods".to_string()),
            Some(Author::new("Henry", "Thoreau")),
        )
        .unwrap();
        BlogPost::from_new(new, Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_serialize_projects_author_name() {
        let post = sample_post();
        let public = post.serialize();

        assert_eq!(public.id, post.id);
        assert_eq!(public.title, "Walden");
        assert_eq!(public.content.as_deref(), Some("Life in the woods"));
        assert_eq!(public.author, "Henry Thoreau");
        assert_eq!(public.created, post.created);
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let post = sample_post();
        assert_eq!(post.serialize(), post.serialize());
    }

    #[test]
    fn test_public_json_has_flat_author() {
        let json = serde_json::to_value(sample_post().serialize()).unwrap();
        assert_eq!(json["author"], "Henry Thoreau");
        assert!(json.get("content").is_some());

        let mut post = sample_post();
        post.content = None;
        let json = serde_json::to_value(post.serialize()).unwrap();
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_new_post_rejects_empty_title() {
        let err = NewBlogPost::new(String::new(), None, None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_new_post_defaults_author() {
        let new = NewBlogPost::new("Untitled draft".to_string(), None, None).unwrap();
        assert_eq!(new.author, Author::default());
    }

    #[test]
    fn test_apply_leaves_unspecified_fields() {
        let mut post = sample_post();
        let original = post.clone();

        post.apply(BlogPostChanges {
            title: Some(Some("Civil Disobedience".to_string())),
            ..Default::default()
        });

        assert_eq!(post.title, "Civil Disobedience");
        assert_eq!(post.content, original.content);
        assert_eq!(post.author, original.author);
        assert_eq!(post.id, original.id);
        assert_eq!(post.created, original.created);
    }

    #[test]
    fn test_apply_clears_content() {
        let mut post = sample_post();
        post.apply(BlogPostChanges {
            content: Some(None),
            ..Default::default()
        });
        assert_eq!(post.content, None);
    }

    #[test]
    fn test_changes_validation() {
        assert!(BlogPostChanges::default().validate().is_ok());
        assert!(BlogPostChanges::default().is_empty());

        let null_title = BlogPostChanges {
            title: Some(None),
            ..Default::default()
        };
        assert!(null_title.validate().is_err());

        let empty_title = BlogPostChanges {
            title: Some(Some(String::new())),
            ..Default::default()
        };
        assert!(empty_title.validate().is_err());
    }
}
