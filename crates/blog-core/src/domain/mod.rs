//! Domain entities - the blog post document model.

mod author;
mod blog_post;

pub use author::Author;
pub use blog_post::{BlogPost, BlogPostChanges, NewBlogPost, PublicBlogPost};
