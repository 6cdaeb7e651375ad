//! Update Post Use Case
//!
//! Auth ladder: 401 handled at the presentation layer (no claims means
//! this use case is never reached), 404 when the post is missing, 403
//! when the caller is not the stored author.

use std::sync::Arc;

use auth::SessionClaims;

use crate::application::ensure_author;
use crate::domain::entity::{BlogPost, PostUpdate, Seo};
use crate::domain::repository::BlogRepository;
use crate::domain::slug::slugify;
use crate::error::{BlogError, BlogResult};
use kernel::id::BlogPostId;

/// Update post input; absent fields keep their stored value
#[derive(Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub seo: Option<Seo>,
}

/// Update post use case
pub struct UpdatePostUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePostUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        claims: &SessionClaims,
        id: &BlogPostId,
        input: UpdatePostInput,
    ) -> BlogResult<BlogPost> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        ensure_author(&existing, claims)?;

        // A new title re-derives the slug
        let (title, slug) = match input.title {
            Some(raw) => {
                let title = raw.trim().to_string();
                if title.is_empty() {
                    return Err(BlogError::Validation("Title cannot be empty".to_string()));
                }
                let slug = slugify(&title);
                if slug.is_empty() {
                    return Err(BlogError::Validation(
                        "Title must contain at least one letter or digit".to_string(),
                    ));
                }
                (Some(title), Some(slug))
            }
            None => (None, None),
        };

        let changes = PostUpdate {
            title,
            slug,
            content: input.content,
            excerpt: input.excerpt,
            cover_image_url: input.cover_image_url,
            published: input.published,
            featured: input.featured,
            categories: input.categories,
            tags: input.tags,
            seo: input.seo,
        };

        let post = self.repo.update(id, &changes).await?;

        tracing::info!(post_id = %post.id, "Blog post updated");

        Ok(post)
    }
}
