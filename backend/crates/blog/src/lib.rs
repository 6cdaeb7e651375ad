//! Blog (Posts & Publishing) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, slug derivation, the listing query model,
//!   repository traits
//! - `application/` - Use cases; mutations enforce the author check
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Public listing of published posts with category/tag/featured/search
//!   filters and latest/oldest/popular sorting
//! - Slugs derived from titles on create and on every title change
//! - Create/update/delete guarded by the stateless session: 401 without
//!   a session, 404 for a missing post, 403 for a non-author
//! - Categories and tags connect-or-create by name inside the write
//!   transaction; admins may manage any post

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::query::{BlogFilter, BlogQuery, BlogSort, RawBlogFilter};
pub use domain::slug::slugify;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;
