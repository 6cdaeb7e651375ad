//! Catalog (Content Discovery) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the discovery query model, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Filtered, sorted, paginated listing of novels/manga/manhwa
//! - Predicate modeled as an explicit tagged union of clauses; the sort
//!   key is whitelist-checked before any query executes
//! - Single-item detail with author, genres, tags and ordered chapters
//! - Genre/tag vocabulary endpoints

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::query::{
    ContentQuery, ContentStatus, ContentType, FilterClause, RawContentFilter, SortField, SortOrder,
};
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::catalog_router;
