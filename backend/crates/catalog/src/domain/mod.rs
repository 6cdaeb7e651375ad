//! Domain Layer
//!
//! Contains entities, the discovery query model, and repository traits.

pub mod entity;
pub mod query;
pub mod repository;

// Re-exports
pub use entity::{Author, Chapter, Content, ContentDetail, Genre, Tag};
pub use query::{ContentQuery, ContentStatus, ContentType, FilterClause, SortField, SortOrder};
pub use repository::ContentRepository;
