//! Application Layer
//!
//! Use cases for the blog subsystem. Mutating use cases take the
//! caller's verified session claims and enforce the author check.

pub mod categories;
pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod update_post;

pub use categories::ListCategoriesUseCase;
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use get_post::GetPostUseCase;
pub use list_posts::{ListPostsUseCase, PostPage};
pub use update_post::{UpdatePostInput, UpdatePostUseCase};

use auth::SessionClaims;
use auth::models::UserRole;

use crate::domain::entity::BlogPost;
use crate::error::{BlogError, BlogResult};

/// The author check shared by update and delete
///
/// Admins may manage any post; everyone else only their own.
fn ensure_author(post: &BlogPost, claims: &SessionClaims) -> BlogResult<()> {
    if claims.role == UserRole::Admin {
        return Ok(());
    }
    if post.author.id.as_uuid() != &claims.sub {
        return Err(BlogError::NotAuthor);
    }
    Ok(())
}
