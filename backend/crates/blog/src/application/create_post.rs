//! Create Post Use Case
//!
//! Derives the slug from the title and hands the repository a complete
//! draft; category/tag connect-or-create happens inside one transaction
//! at the persistence layer.

use std::sync::Arc;

use auth::SessionClaims;

use crate::domain::entity::{BlogPost, NewPost, Seo};
use crate::domain::repository::BlogRepository;
use crate::domain::slug::slugify;
use crate::error::{BlogError, BlogResult};
use kernel::id::UserId;

/// Create post input
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub seo: Option<Seo>,
}

/// Create post use case
pub struct CreatePostUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        claims: &SessionClaims,
        input: CreatePostInput,
    ) -> BlogResult<BlogPost> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(BlogError::Validation("Title cannot be empty".to_string()));
        }
        if input.content.trim().is_empty() {
            return Err(BlogError::Validation(
                "Content cannot be empty".to_string(),
            ));
        }

        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(BlogError::Validation(
                "Title must contain at least one letter or digit".to_string(),
            ));
        }

        let draft = NewPost {
            slug,
            title,
            content: input.content,
            excerpt: input.excerpt,
            cover_image_url: input.cover_image_url,
            published: input.published,
            featured: input.featured,
            author_id: UserId::from_uuid(claims.sub),
            categories: dedup_names(input.categories),
            tags: dedup_names(input.tags),
            seo: input.seo,
        };

        let post = self.repo.create(&draft).await?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");

        Ok(post)
    }
}

/// Trim, drop blanks, and dedup case-insensitively preserving order
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for name in names {
        let name = name.trim().to_string();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_names() {
        let names = vec![
            " Rust ".to_string(),
            "rust".to_string(),
            String::new(),
            "Webdev".to_string(),
        ];
        assert_eq!(dedup_names(names), vec!["Rust", "Webdev"]);
    }
}
