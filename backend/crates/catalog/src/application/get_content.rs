//! Get Content Use Case

use std::sync::Arc;

use crate::domain::entity::ContentDetail;
use crate::domain::query::ContentType;
use crate::domain::repository::ContentRepository;
use crate::error::{CatalogError, CatalogResult};
use kernel::id::ContentId;

/// Get content use case
pub struct GetContentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> GetContentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a single item by id
    ///
    /// When `required_type` is set (the novels route), an item of a
    /// different type is treated as not found rather than leaked.
    pub async fn execute(
        &self,
        id: &ContentId,
        required_type: Option<ContentType>,
    ) -> CatalogResult<ContentDetail> {
        let detail = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ContentNotFound)?;

        if let Some(required) = required_type
            && detail.content.content_type != required
        {
            return Err(CatalogError::ContentNotFound);
        }

        Ok(detail)
    }
}
