//! Vocabulary Use Case
//!
//! Serves the genre and tag reference lists used by filter UIs.

use std::sync::Arc;

use crate::domain::entity::{Genre, Tag};
use crate::domain::repository::ContentRepository;
use crate::error::CatalogResult;

pub struct VocabularyUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> VocabularyUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        self.repo.list_genres().await
    }

    pub async fn tags(&self) -> CatalogResult<Vec<Tag>> {
        self.repo.list_tags().await
    }
}
