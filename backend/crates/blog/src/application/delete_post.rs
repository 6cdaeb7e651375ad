//! Delete Post Use Case

use std::sync::Arc;

use auth::SessionClaims;

use crate::application::ensure_author;
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};
use kernel::id::BlogPostId;

pub struct DeletePostUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, claims: &SessionClaims, id: &BlogPostId) -> BlogResult<()> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        ensure_author(&existing, claims)?;

        self.repo.delete(id).await?;

        tracing::info!(post_id = %id, "Blog post deleted");

        Ok(())
    }
}
