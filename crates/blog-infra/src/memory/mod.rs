//! In-memory store - used when no database is configured, and in tests.

mod blog_post;

pub use blog_post::InMemoryBlogPostRepository;
