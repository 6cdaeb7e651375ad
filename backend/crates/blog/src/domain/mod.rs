//! Domain Layer

pub mod entity;
pub mod query;
pub mod repository;
pub mod slug;

// Re-exports
pub use entity::{Author, BlogCategory, BlogPost, BlogTag, NewPost, PostUpdate, Seo};
pub use query::{BlogFilter, BlogQuery, BlogSort, RawBlogFilter};
pub use repository::BlogRepository;
pub use slug::slugify;
