//! Get Post Use Case

use std::sync::Arc;

use crate::domain::entity::BlogPost;
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};
use kernel::id::BlogPostId;

pub struct GetPostUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> GetPostUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &BlogPostId) -> BlogResult<BlogPost> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BlogError::PostNotFound)
    }
}
